// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Command Dispatch (C5): descriptor factories, the decoding procedure,
//! and the opaque handle table that lets a host command cross a
//! script/JSON boundary without losing its identity.

pub mod decode;
pub mod error;
pub mod factory;
pub mod handle_table;

pub use decode::{decode, decode_opt, decode_value, NativeCmd};
pub use error::DispatchError;
pub use factory::{
    batch, clear_screen, disable_bracketed_paste, disable_report_focus, enable_bracketed_paste,
    enable_report_focus, enter_alt_screen, exit_alt_screen, hide_cursor, quit, sequence,
    set_window_title, show_cursor, tick, window_size, wrapped_host_cmd,
};
pub use handle_table::HandleTable;
