// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Pure soft-wrap/coordinate/scroll logic (C1-C4) with no I/O and no
//! locking. The facade crate wraps these types behind a mutex and exposes
//! the host-facing operation surface.

mod buffer;
mod coords;
mod viewport;
mod width;
mod wrap;

pub use buffer::{Buffer, LineInfo};
pub use coords::{
    get_scroll_sync_info, handle_click, handle_click_at_screen_coords, perform_hit_test,
    visual_col_for_logical, HitTest, LogicalPosition, ScrollSyncInfo,
};
pub use viewport::{ViewportController, WheelDirection};
pub use width::cell_width;
pub use wrap::{segment_index_for_col, visual_segment_count, visual_width_prefix, wrap_line, Segment};
