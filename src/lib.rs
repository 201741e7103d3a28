// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! `vellum`: a soft-wrapping multi-line text editor and scrollable
//! viewport engine for scripted terminal UIs, plus the Elm-style command
//! dispatch layer (descriptor decoding and opaque host-command handles)
//! that lets a host drive both from its own event loop.
//!
//! The engine itself never touches a terminal. `Textarea` and `Viewport`
//! hold their state behind a mutex and expose pure `update`/`view`
//! methods; rendering crosses the [`Styler`] trait boundary, and I/O
//! commands cross [`vellum_dispatch`] as opaque descriptors. A host wires
//! these to a real terminal backend and an async runtime of its choosing.

mod error;
mod styler;
mod textarea;
mod viewport;

pub use error::LifecycleError;
pub use styler::{PlainStyler, Styler};
pub use textarea::{Textarea, TextareaStyleConfig};
pub use viewport::Viewport;

pub use vellum_core::{
    cell_width, get_scroll_sync_info, handle_click, handle_click_at_screen_coords,
    perform_hit_test, visual_col_for_logical, Buffer, HitTest, LineInfo, LogicalPosition,
    ScrollSyncInfo, ViewportController, WheelDirection,
};
pub use vellum_dispatch::{
    batch, clear_screen, decode, decode_opt, decode_value, disable_bracketed_paste,
    disable_report_focus, enable_bracketed_paste, enable_report_focus, enter_alt_screen,
    exit_alt_screen, hide_cursor, quit, sequence, set_window_title, show_cursor, tick,
    window_size, wrapped_host_cmd, DispatchError, HandleTable, NativeCmd,
};
pub use vellum_model::{
    CommandDescriptor, CommandKind, Geometry, HandleId, Key, KeyMsg, MouseButton, MouseEvent,
    MouseMsg, Msg, OuterContext, TextareaOptions, TickMsg, ViewportOptions, WindowSizeMsg,
};
