// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Coordinate Translator (spec §4.3): screen → viewport → visual → logical.
//!
//! Grounded on `sven-tui::layout::AppLayout::compute`'s nested-rect math
//! (screen coordinates are resolved relative to enclosing rects before any
//! content-level lookup happens) and `sven-tui::input_wrap::byte_offset_at_row_col`'s
//! approach of re-deriving a position by re-running the wrap loop rather
//! than trusting any cached index.

use crate::buffer::Buffer;
use crate::width::cell_width;
use crate::wrap::{visual_width_prefix, wrap_line};
use vellum_model::OuterContext;

/// A resolved logical position: a line index and a code-point column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalPosition {
    pub row: usize,
    pub col: usize,
}

/// The result of mapping a screen coordinate down through the outer
/// viewport and the wrap map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTest {
    /// The coordinate lands inside editable content.
    Hit(LogicalPosition),
    /// The coordinate is outside the textarea's content rect, or the outer
    /// context hasn't been initialized yet (spec §8 invariant 9).
    Miss,
}

/// Resolve a raw terminal coordinate into a logical position by walking it
/// through the outer viewport (spec §4.3 "handleClickAtScreenCoords").
///
/// `screen_x`/`screen_y` are absolute terminal cells.
pub fn handle_click_at_screen_coords(
    buffer: &Buffer,
    outer: &OuterContext,
    screen_x: usize,
    screen_y: usize,
) -> HitTest {
    // Step 1.
    if !outer.initialized {
        return HitTest::Miss;
    }

    // Step 2: viewportRelativeY := screenY - titleHeight; must land inside
    // [0, outerViewportHeight).
    let viewport_relative_y = match screen_y.checked_sub(outer.title_height) {
        Some(v) => v,
        None => return HitTest::Miss,
    };
    if viewport_relative_y >= outer.outer_viewport_height {
        return HitTest::Miss;
    }

    // Step 3: contentY := viewportRelativeY + outerYOffset.
    let content_y = viewport_relative_y + outer.outer_y_offset;

    // Step 4: visualY := contentY - textareaContentTop; visualX := max(0, screenX - textareaContentLeft).
    let visual_y = match content_y.checked_sub(outer.textarea_content_top) {
        Some(v) => v,
        None => return HitTest::Miss,
    };
    let visual_x = screen_x.saturating_sub(outer.textarea_content_left);

    let total_visual_lines = buffer.visual_line_count();

    // Step 5.
    if visual_y < total_visual_lines {
        return perform_hit_test(buffer, visual_y, visual_x);
    }

    // Step 6: clicking empty space directly below content places the
    // cursor at end-of-document.
    if visual_y == total_visual_lines {
        let last_row = buffer.line_count() - 1;
        return HitTest::Hit(LogicalPosition {
            row: last_row,
            col: buffer.line_len(last_row),
        });
    }

    // Step 7.
    HitTest::Miss
}

/// Resolve a `(visual_row, visual_x)` pair — already relative to the
/// textarea's own content origin and scroll offset — into a logical
/// position (spec §4.3 steps 3-4).
///
/// Total function: `visual_row` is clamped into `[0, totalVisualLines-1]`
/// before resolution, so a stale or out-of-range row (e.g. after the
/// document shrinks) always resolves to the last visual row instead of
/// missing (spec §4.3 "Failure semantics"; §8 invariant 2).
pub fn perform_hit_test(buffer: &Buffer, visual_row: usize, visual_x: usize) -> HitTest {
    let width = buffer.inner_width();
    let total_visual_lines = buffer.visual_line_count();
    let mut remaining = visual_row.min(total_visual_lines.saturating_sub(1));

    for row in 0..buffer.line_count() {
        let line = buffer.line_chars(row);
        let segments = wrap_line(line, width);
        if remaining >= segments.len() {
            remaining -= segments.len();
            continue;
        }

        let seg = segments[remaining];
        let seg_end = if remaining + 1 < segments.len() {
            segments[remaining + 1].start
        } else {
            line.len()
        };

        let col = column_in_segment(line, seg.start, seg_end, visual_x);
        return HitTest::Hit(LogicalPosition { row, col });
    }

    HitTest::Miss
}

/// Resolve `visual_x` to a code-point column within `line[seg_start..seg_end]`.
///
/// Walks the segment's code points tracking cumulative consumed width. For
/// the code point whose span `[char_start, char_end)` contains `visual_x`:
/// if it is two cells wide and the click falls in its right half
/// (`visual_x > char_start`), the column advances past the character;
/// otherwise the column stays at the character itself. A click beyond the
/// last code point in the segment clamps to `seg_end`.
fn column_in_segment(line: &[char], seg_start: usize, seg_end: usize, visual_x: usize) -> usize {
    let mut consumed: usize = 0;
    for i in seg_start..seg_end {
        let w = cell_width(line[i]) as usize;
        let char_start = consumed;
        let char_end = consumed + w;
        if visual_x < char_end {
            if w == 2 && visual_x > char_start {
                return i + 1;
            }
            return i;
        }
        consumed = char_end;
    }
    seg_end
}

/// Legacy `handleClick` shim (spec §4.3 "handleClick legacy shim"):
/// resolves a click given already-known visual coordinates, with no
/// outer-context translation. Kept for hosts that manage their own outer
/// layout and only want the wrap-aware column resolution.
pub fn handle_click(buffer: &Buffer, visual_row: usize, visual_x: usize) -> Option<LogicalPosition> {
    match perform_hit_test(buffer, visual_row, visual_x) {
        HitTest::Hit(pos) => Some(pos),
        HitTest::Miss => None,
    }
}

/// Information a viewport needs to keep its own scroll offset in sync with
/// the cursor after a buffer mutation (spec §4.4 "scroll sync").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSyncInfo {
    pub cursor_visual_line: usize,
    pub total_visual_lines: usize,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub line_count: usize,
    pub cursor_abs_y: usize,
    /// The outer-viewport `yOffset` that keeps the cursor visible. `None`
    /// when the outer context hasn't been initialized yet — there is
    /// nothing to suggest against.
    pub suggested_y_offset: Option<usize>,
}

/// Gather everything a viewport needs to keep itself in sync with the
/// cursor after a buffer mutation (spec §4.3 "getScrollSyncInfo").
pub fn get_scroll_sync_info(buffer: &Buffer, outer: &OuterContext) -> ScrollSyncInfo {
    let cursor_visual_line = buffer.cursor_visual_line();
    let cursor_abs_y = outer.pre_content_height + cursor_visual_line;

    let suggested_y_offset = outer.initialized.then(|| {
        if cursor_abs_y < outer.outer_y_offset {
            cursor_abs_y
        } else if cursor_abs_y >= outer.outer_y_offset + outer.outer_viewport_height {
            cursor_abs_y + 1 - outer.outer_viewport_height
        } else {
            outer.outer_y_offset
        }
    });

    ScrollSyncInfo {
        cursor_visual_line,
        total_visual_lines: buffer.visual_line_count(),
        cursor_row: buffer.line(),
        cursor_col: buffer.col(),
        line_count: buffer.line_count(),
        cursor_abs_y,
        suggested_y_offset,
    }
}

/// Visual column (cell offset) of a logical `(row, col)`'s segment start,
/// used when a viewport needs to translate a known logical cursor back to
/// a visual column for rendering (the mirror image of [`column_in_segment`]).
pub fn visual_col_for_logical(buffer: &Buffer, row: usize, col: usize) -> u16 {
    let line = buffer.line_chars(row);
    let segments = wrap_line(line, buffer.inner_width());
    let idx = crate::wrap::segment_index_for_col(&segments, col);
    let seg_start = segments[idx].start;
    visual_width_prefix(line, col) - visual_width_prefix(line, seg_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(content: &str, width: u16) -> Buffer {
        let mut b = Buffer::new();
        b.set_total_width(width);
        b.set_value(content);
        b
    }

    #[test]
    fn scenario_a_wrap_and_hit_ascii() {
        // innerWidth = 10, one logical line of 20 'A'..'T' letters.
        let b = buffer_with("ABCDEFGHIJKLMNOPQRST", 10);
        match perform_hit_test(&b, 1, 3) {
            HitTest::Hit(pos) => assert_eq!(pos, LogicalPosition { row: 0, col: 13 }),
            HitTest::Miss => panic!("expected hit"),
        }
    }

    #[test]
    fn scenario_b_long_single_segment_run() {
        let content: String = std::iter::repeat('x').take(100).collect();
        let b = buffer_with(&content, 40);
        match perform_hit_test(&b, 2, 19) {
            HitTest::Hit(pos) => assert_eq!(pos, LogicalPosition { row: 0, col: 99 }),
            HitTest::Miss => panic!("expected hit"),
        }
    }

    #[test]
    fn scenario_c_wide_char_tie_break() {
        // "A你好B": A=1, 你=2, 好=2, B=1 -> cumulative [0,1,3,5,6]
        let b = buffer_with("A你好B", 80);
        // visualX=1 lands exactly at the start of 你 (left half) -> col 1
        match perform_hit_test(&b, 0, 1) {
            HitTest::Hit(pos) => assert_eq!(pos.col, 1),
            HitTest::Miss => panic!("expected hit"),
        }
        // visualX=2 lands in the right half of 你 -> col 2 (past it)
        match perform_hit_test(&b, 0, 2) {
            HitTest::Hit(pos) => assert_eq!(pos.col, 2),
            HitTest::Miss => panic!("expected hit"),
        }
    }

    #[test]
    fn uninitialized_outer_context_always_misses() {
        let b = buffer_with("hello", 40);
        let outer = OuterContext::default();
        assert_eq!(
            handle_click_at_screen_coords(&b, &outer, 1, 1),
            HitTest::Miss
        );
    }

    #[test]
    fn screen_coords_above_outer_offset_miss() {
        let b = buffer_with("hello", 40);
        let mut outer = OuterContext::default();
        outer.set(5, 0, 0, 24, 0, 0);
        assert_eq!(
            handle_click_at_screen_coords(&b, &outer, 1, 2),
            HitTest::Miss
        );
    }

    #[test]
    fn screen_coords_resolve_through_full_chain() {
        let b = buffer_with("hello world", 40);
        let mut outer = OuterContext::default();
        outer.set(1, 3, 4, 20, 0, 0);
        let hit = handle_click_at_screen_coords(&b, &outer, 8, 2);
        assert_eq!(hit, HitTest::Hit(LogicalPosition { row: 0, col: 4 }));
    }

    #[test]
    fn click_below_content_clamps_to_end_of_document() {
        // title_height=0, outer_y_offset=0, textarea_content_top=0: the
        // textarea's single visual line occupies visualY==0; visualY==1
        // (totalVisualLines) is "just below content".
        let b = buffer_with("hi", 40);
        let mut outer = OuterContext::default();
        outer.set(0, 0, 0, 20, 0, 0);
        let hit = handle_click_at_screen_coords(&b, &outer, 0, 1);
        assert_eq!(hit, HitTest::Hit(LogicalPosition { row: 0, col: 2 }));
    }

    #[test]
    fn perform_hit_test_clamps_an_out_of_range_visual_row() {
        let b = buffer_with("hello\nworld", 40);
        // Only 2 visual rows exist (0 and 1); a stale row far past the end
        // must clamp to the last row rather than miss.
        match perform_hit_test(&b, 50, 2) {
            HitTest::Hit(pos) => assert_eq!(pos, LogicalPosition { row: 1, col: 2 }),
            HitTest::Miss => panic!("perform_hit_test must be total, never miss"),
        }
    }

    #[test]
    fn handle_click_legacy_shim_matches_perform_hit_test() {
        let b = buffer_with("hello world", 40);
        assert_eq!(
            handle_click(&b, 0, 4),
            Some(LogicalPosition { row: 0, col: 4 })
        );
    }

    #[test]
    fn visual_col_for_logical_round_trips_ascii() {
        let b = buffer_with("hello world", 40);
        assert_eq!(visual_col_for_logical(&b, 0, 6), 6);
    }

    #[test]
    fn scroll_sync_info_is_none_when_outer_uninitialized() {
        let b = buffer_with("hello", 40);
        let outer = OuterContext::default();
        let info = get_scroll_sync_info(&b, &outer);
        assert_eq!(info.suggested_y_offset, None);
    }

    #[test]
    fn scroll_sync_info_suggests_scrolling_down_to_reveal_cursor() {
        let mut b = buffer_with("a\nb\nc\nd\ne\nf\ng\nh", 40);
        b.set_position(7, 0);
        let mut outer = OuterContext::default();
        outer.set(0, 0, 0, 4, 0, 0);
        let info = get_scroll_sync_info(&b, &outer);
        assert_eq!(info.cursor_abs_y, 7);
        assert_eq!(info.suggested_y_offset, Some(4));
    }

    #[test]
    fn hit_test_is_left_inverse_of_cursor_to_visual_projection() {
        // Invariant 2: performHitTest(cellWidthPrefix, cursorVisualLine) == (row,col)
        let b = buffer_with("ABCDEFGHIJKLMNOPQRST\nXYZ", 10);
        for row in 0..b.line_count() {
            for col in 0..=b.line_len(row) {
                let mut probe = b.clone();
                probe.set_position(row, col);
                let visual_row = probe.cursor_visual_line();
                let visual_x = visual_col_for_logical(&probe, row, col);
                match perform_hit_test(&probe, visual_row, visual_x as usize) {
                    HitTest::Hit(pos) => assert_eq!(pos, LogicalPosition { row, col }),
                    HitTest::Miss => panic!("expected hit at ({row},{col})"),
                }
            }
        }
    }
}
