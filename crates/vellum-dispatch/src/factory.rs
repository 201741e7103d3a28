// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Command factories: the constructors a script's `update` return value is
//! built from (spec §3 "Command descriptor", §4.5 "Validation").

use vellum_model::{CommandDescriptor, CommandKind, HandleId};

use crate::error::DispatchError;
use crate::handle_table::next_id;

fn describe(kind: CommandKind) -> CommandDescriptor {
    CommandDescriptor {
        id: next_id(),
        kind,
    }
}

pub fn quit() -> CommandDescriptor {
    describe(CommandKind::Quit)
}

pub fn clear_screen() -> CommandDescriptor {
    describe(CommandKind::ClearScreen)
}

pub fn enter_alt_screen() -> CommandDescriptor {
    describe(CommandKind::EnterAltScreen)
}

pub fn exit_alt_screen() -> CommandDescriptor {
    describe(CommandKind::ExitAltScreen)
}

pub fn hide_cursor() -> CommandDescriptor {
    describe(CommandKind::HideCursor)
}

pub fn show_cursor() -> CommandDescriptor {
    describe(CommandKind::ShowCursor)
}

pub fn enable_bracketed_paste() -> CommandDescriptor {
    describe(CommandKind::EnableBracketedPaste)
}

pub fn disable_bracketed_paste() -> CommandDescriptor {
    describe(CommandKind::DisableBracketedPaste)
}

pub fn enable_report_focus() -> CommandDescriptor {
    describe(CommandKind::EnableReportFocus)
}

pub fn disable_report_focus() -> CommandDescriptor {
    describe(CommandKind::DisableReportFocus)
}

pub fn window_size() -> CommandDescriptor {
    describe(CommandKind::WindowSize)
}

/// Coerces `title` to a string; accepts anything `Into<String>` (spec
/// §4.5: "`setWindowTitle` coerces its argument to string").
pub fn set_window_title(title: impl Into<String>) -> CommandDescriptor {
    describe(CommandKind::SetWindowTitle { title: title.into() })
}

/// `tick` rejects non-positive durations with `BT001` (spec §4.5,
/// invariant 8). `id` correlates the eventual `TickMsg` back to this call.
pub fn tick(duration_ms: i64, id: impl Into<String>) -> Result<CommandDescriptor, DispatchError> {
    if duration_ms <= 0 {
        return Err(DispatchError::InvalidTickDuration { duration_ms });
    }
    Ok(describe(CommandKind::Tick {
        duration_ms,
        id: id.into(),
    }))
}

pub fn batch(children: Vec<CommandDescriptor>) -> CommandDescriptor {
    describe(CommandKind::Batch { children })
}

pub fn sequence(children: Vec<CommandDescriptor>) -> CommandDescriptor {
    describe(CommandKind::Sequence { children })
}

/// Wraps a host-native command behind an opaque, JSON-round-trippable id
/// (spec §4.5 "Opaque handle"). The native command itself is already
/// stored in the host's `HandleTable` under `handle`.
pub fn wrapped_host_cmd(handle: HandleId) -> CommandDescriptor {
    describe(CommandKind::WrappedHostCmd { handle })
}
