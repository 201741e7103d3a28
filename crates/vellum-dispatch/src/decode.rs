// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Decoding procedure: turns a script-returned command value into the
//! host's own native command tree (spec §4.5 "Decoding procedure").

use tracing::trace;
use vellum_model::{CommandDescriptor, CommandKind};

use crate::handle_table::HandleTable;

/// The host-native command tree a decoded [`CommandDescriptor`] resolves
/// to. `Native` is whatever type the host uses for its own commands
/// (e.g. a boxed future, per `bubbletea_rs::Cmd`'s shape).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCmd<Native> {
    Quit,
    ClearScreen,
    EnterAltScreen,
    ExitAltScreen,
    HideCursor,
    ShowCursor,
    EnableBracketedPaste,
    DisableBracketedPaste,
    EnableReportFocus,
    DisableReportFocus,
    WindowSize,
    SetWindowTitle(String),
    Tick { duration_ms: i64, id: String },
    Batch(Vec<NativeCmd<Native>>),
    Sequence(Vec<NativeCmd<Native>>),
    /// A native command recovered from the host's handle table.
    Host(Native),
}

/// Decode a typed descriptor into its native command tree.
///
/// `batch`/`sequence` children that decode to nothing are dropped, per the
/// spec's decoding procedure; an opaque handle no longer present in
/// `table` also decodes to nothing (it can only have been consumed once).
pub fn decode<Native: Clone>(
    descriptor: &CommandDescriptor,
    table: &HandleTable<Native>,
) -> Option<NativeCmd<Native>> {
    Some(match &descriptor.kind {
        CommandKind::Quit => NativeCmd::Quit,
        CommandKind::ClearScreen => NativeCmd::ClearScreen,
        CommandKind::EnterAltScreen => NativeCmd::EnterAltScreen,
        CommandKind::ExitAltScreen => NativeCmd::ExitAltScreen,
        CommandKind::HideCursor => NativeCmd::HideCursor,
        CommandKind::ShowCursor => NativeCmd::ShowCursor,
        CommandKind::EnableBracketedPaste => NativeCmd::EnableBracketedPaste,
        CommandKind::DisableBracketedPaste => NativeCmd::DisableBracketedPaste,
        CommandKind::EnableReportFocus => NativeCmd::EnableReportFocus,
        CommandKind::DisableReportFocus => NativeCmd::DisableReportFocus,
        CommandKind::WindowSize => NativeCmd::WindowSize,
        CommandKind::SetWindowTitle { title } => NativeCmd::SetWindowTitle(title.clone()),
        CommandKind::Tick { duration_ms, id } => NativeCmd::Tick {
            duration_ms: *duration_ms,
            id: id.clone(),
        },
        CommandKind::Batch { children } => {
            let decoded: Vec<_> = children.iter().filter_map(|c| decode(c, table)).collect();
            NativeCmd::Batch(decoded)
        }
        CommandKind::Sequence { children } => {
            let decoded: Vec<_> = children.iter().filter_map(|c| decode(c, table)).collect();
            NativeCmd::Sequence(decoded)
        }
        CommandKind::WrappedHostCmd { handle } => {
            return table.get(*handle).map(NativeCmd::Host);
        }
    })
}

/// Top-level entry point mirroring `null`/`undefined` returns from a
/// script's `update`: `None` means "no command".
pub fn decode_opt<Native: Clone>(
    descriptor: Option<&CommandDescriptor>,
    table: &HandleTable<Native>,
) -> Option<NativeCmd<Native>> {
    descriptor.and_then(|d| decode(d, table))
}

/// Decode an arbitrary, untyped JSON value as a script might return it.
///
/// Values that don't parse as a [`CommandDescriptor`] are tolerated, not
/// errors (spec §4.5: "unknown shapes are tolerated so user scripts can
/// pass state objects without the dispatcher choking").
pub fn decode_value<Native: Clone>(
    value: &serde_json::Value,
    table: &HandleTable<Native>,
) -> Option<NativeCmd<Native>> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<CommandDescriptor>(value.clone()) {
        Ok(descriptor) => decode(&descriptor, table),
        Err(err) => {
            trace!(%err, "command value did not match any known descriptor shape; ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_model::HandleId;

    fn table() -> HandleTable<&'static str> {
        HandleTable::new()
    }

    #[test]
    fn terminal_kinds_decode_to_matching_variant() {
        let t = table();
        let d = crate::factory::quit();
        assert_eq!(decode(&d, &t), Some(NativeCmd::Quit));
    }

    #[test]
    fn batch_of_one_is_semantically_the_child() {
        let t = table();
        let child = crate::factory::quit();
        let wrapped = crate::factory::batch(vec![child.clone()]);
        assert_eq!(
            decode(&wrapped, &t),
            Some(NativeCmd::Batch(vec![NativeCmd::Quit]))
        );
        assert_eq!(decode(&child, &t), Some(NativeCmd::Quit));
    }

    #[test]
    fn sequence_of_one_is_semantically_the_child() {
        let t = table();
        let child = crate::factory::clear_screen();
        let wrapped = crate::factory::sequence(vec![child]);
        assert_eq!(
            decode(&wrapped, &t),
            Some(NativeCmd::Sequence(vec![NativeCmd::ClearScreen]))
        );
    }

    #[test]
    fn empty_batch_and_sequence_decode_to_empty_containers() {
        let t = table();
        assert_eq!(
            decode(&crate::factory::batch(vec![]), &t),
            Some(NativeCmd::Batch(vec![]))
        );
        assert_eq!(
            decode(&crate::factory::sequence(vec![]), &t),
            Some(NativeCmd::Sequence(vec![]))
        );
    }

    #[test]
    fn opaque_handle_recovers_original_native_command() {
        let t = table();
        let handle = t.insert("native-quit");
        let d = crate::factory::wrapped_host_cmd(handle);
        assert_eq!(decode(&d, &t), Some(NativeCmd::Host("native-quit")));
    }

    #[test]
    fn stale_handle_decodes_to_nothing() {
        let t = table();
        let handle = t.insert("native-quit");
        t.remove(handle);
        let d = crate::factory::wrapped_host_cmd(handle);
        assert_eq!(decode(&d, &t), None);
    }

    #[test]
    fn batch_drops_stale_handle_children() {
        let t = table();
        let handle = t.insert("x");
        t.remove(handle);
        let wrapped = crate::factory::batch(vec![
            crate::factory::wrapped_host_cmd(handle),
            crate::factory::quit(),
        ]);
        assert_eq!(decode(&wrapped, &t), Some(NativeCmd::Batch(vec![NativeCmd::Quit])));
    }

    #[test]
    fn null_value_decodes_to_no_command() {
        let t: HandleTable<&'static str> = table();
        assert_eq!(decode_value(&serde_json::Value::Null, &t), None);
    }

    #[test]
    fn unknown_shape_is_tolerated_not_an_error() {
        let t: HandleTable<&'static str> = table();
        let v = serde_json::json!({"foo": "bar"});
        assert_eq!(decode_value(&v, &t), None);
    }

    #[test]
    fn handle_id_type_round_trips_through_json() {
        // Confirms HandleId survives a JSON round trip unchanged, which is
        // what lets a script stash it and return it later (invariant 7).
        let h = HandleId(7);
        let json = serde_json::to_value(h).unwrap();
        let back: HandleId = serde_json::from_value(json).unwrap();
        assert_eq!(h, back);
    }
}
