// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! The command descriptor tree scripts build and `vellum-dispatch` decodes.
//!
//! See spec §3 "Command descriptor" and §4.5 "Command Dispatch".

use serde::{Deserialize, Serialize};

/// A process-unique id naming a host-owned native command, stored in the
/// host's own handle table (see `vellum-dispatch::HandleTable`). The core
/// never dereferences it; it only carries the id through scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub u64);

impl HandleId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A tagged record carrying one node of the command tree.
///
/// `id` is the monotone `_cmdId` from spec §3/§4.5, assigned once when the
/// descriptor is constructed; every factory call produces a distinct id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    #[serde(rename = "_cmdId")]
    pub id: u64,
    #[serde(flatten)]
    pub kind: CommandKind,
}

/// The command kinds enumerated in spec §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_cmdType", rename_all = "camelCase")]
pub enum CommandKind {
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
    SetWindowTitle {
        title: String,
    },
    Tick {
        duration_ms: i64,
        id: String,
    },
    Batch {
        children: Vec<CommandDescriptor>,
    },
    Sequence {
        children: Vec<CommandDescriptor>,
    },
    WrappedHostCmd {
        handle: HandleId,
    },
}

impl CommandKind {
    /// `batch()`/`sequence()` with zero children are valid no-op commands
    /// (spec §4.5 "Identity invariants").
    pub fn is_empty_container(&self) -> bool {
        matches!(
            self,
            CommandKind::Batch { children } | CommandKind::Sequence { children }
                if children.is_empty()
        )
    }
}
