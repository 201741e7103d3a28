// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Buffer & Wrap Engine (spec §4.2): the rune grid, cursor, and geometry.
//!
//! Grounded on `sven-tui::input_wrap` (soft-wrap + cursor bookkeeping over
//! an editable string) and `sven-tui::keys::Action`'s input-editing
//! vocabulary (backspace/delete/word-motion), generalized from a
//! byte-offset-over-`String` model to the logical rune-grid-over-`Vec<char>`
//! model the spec's cursor invariants require.

use vellum_model::Geometry;

use crate::wrap::{segment_index_for_col, visual_width_prefix, wrap_line, Segment};

/// Classification used by word-motion and word-deletion operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Word,
    Punctuation,
}

fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// A single logical-line summary, as returned by [`Buffer::line_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub row: usize,
    /// Which wrapped visual segment of `row` the cursor sits in.
    pub segment_index: usize,
    /// Code-point index the cursor's segment starts at.
    pub segment_start: usize,
    /// Accumulated cell width of the cursor's segment.
    pub segment_width: u16,
    /// Code points in `row`.
    pub char_count: usize,
}

/// The logical text buffer: an ordered sequence of logical lines, a
/// cursor, and the geometry that determines `innerWidth` (spec §3).
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Vec<char>>,
    cursor_row: usize,
    cursor_col: usize,
    last_char_offset: u16,
    geometry: Geometry,
    max_width: Option<u16>,
    char_limit: Option<usize>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor_row: 0,
            cursor_col: 0,
            last_char_offset: 0,
            geometry: Geometry::default(),
            max_width: None,
            char_limit: None,
        }
    }

    // ── Geometry ─────────────────────────────────────────────────────────

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn inner_width(&self) -> u16 {
        self.geometry.inner_width()
    }

    pub fn set_total_width(&mut self, width: u16) {
        self.geometry.total_width = self.max_width.map_or(width, |m| width.min(m));
        self.clamp_cursor();
    }

    pub fn set_prompt_width(&mut self, width: u16) {
        self.geometry.prompt_width = width;
        self.clamp_cursor();
    }

    pub fn set_line_number_width(&mut self, width: u16) {
        self.geometry.line_number_width = width;
        self.clamp_cursor();
    }

    pub fn set_reserved_outer(&mut self, width: u16) {
        self.geometry.reserved_outer = width;
        self.clamp_cursor();
    }

    pub fn set_max_width(&mut self, max: Option<u16>) {
        self.max_width = max;
        if let Some(m) = max {
            if self.geometry.total_width > m {
                self.geometry.total_width = m;
            }
        }
        self.clamp_cursor();
    }

    pub fn set_char_limit(&mut self, limit: Option<usize>) {
        self.char_limit = limit;
    }

    pub fn char_limit(&self) -> Option<usize> {
        self.char_limit
    }

    fn remaining_capacity(&self) -> Option<usize> {
        self.char_limit.map(|limit| limit.saturating_sub(self.length()))
    }

    fn clamp_cursor(&mut self) {
        self.cursor_row = self.cursor_row.min(self.lines.len() - 1);
        self.cursor_col = self.cursor_col.min(self.lines[self.cursor_row].len());
    }

    // ── Content round-trip ───────────────────────────────────────────────

    pub fn set_value(&mut self, s: &str) {
        self.lines = split_lines(s);
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = self.lines[self.cursor_row].len();
        self.last_char_offset = 0;
    }

    pub fn value(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn reset(&mut self) {
        self.lines = vec![Vec::new()];
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.last_char_offset = 0;
    }

    // ── Insertion ────────────────────────────────────────────────────────

    pub fn insert_string(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let s = match self.remaining_capacity() {
            Some(room) => s.chars().take(room).collect::<String>(),
            None => s.to_string(),
        };
        if s.is_empty() {
            return;
        }

        let mut incoming = split_lines(&s);
        let tail: Vec<char> = self.lines[self.cursor_row].split_off(self.cursor_col);

        // Append the first incoming line to what's left before the cursor.
        self.lines[self.cursor_row].extend(incoming.remove(0));

        let last_incoming_len;
        if incoming.is_empty() {
            // Single-line insert: cursor lands right after the inserted text.
            self.cursor_col = self.lines[self.cursor_row].len();
            self.lines[self.cursor_row].extend(tail);
            last_incoming_len = 0;
        } else {
            let n = incoming.len();
            last_incoming_len = incoming[n - 1].len();
            let mut last_line = std::mem::take(&mut incoming[n - 1]);
            last_line.extend(tail);
            incoming[n - 1] = last_line;

            let insert_at = self.cursor_row + 1;
            for (offset, line) in incoming.into_iter().enumerate() {
                self.lines.insert(insert_at + offset, line);
            }
            self.cursor_row = insert_at + n - 1;
            self.cursor_col = last_incoming_len;
        }
        self.last_char_offset = 0;
    }

    pub fn insert_rune(&mut self, r: char) {
        let mut buf = [0u8; 4];
        self.insert_string(r.encode_utf8(&mut buf));
    }

    // ── Observers ────────────────────────────────────────────────────────

    /// Total code points across all lines (separators excluded).
    pub fn length(&self) -> usize {
        self.lines.iter().map(|l| l.len()).sum()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Current cursor row, mirroring `textarea.Model.Line()` in the
    /// upstream bubble — an index, not content.
    pub fn line(&self) -> usize {
        self.cursor_row
    }

    pub fn col(&self) -> usize {
        self.cursor_col
    }

    pub fn line_content(&self, row: usize) -> Option<String> {
        self.lines.get(row).map(|l| l.iter().collect())
    }

    pub fn line_chars(&self, row: usize) -> &[char] {
        &self.lines[row]
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.len()).unwrap_or(0)
    }

    pub fn segments_for_line(&self, row: usize) -> Vec<Segment> {
        wrap_line(&self.lines[row], self.inner_width())
    }

    pub fn line_info(&self) -> LineInfo {
        let row = self.cursor_row;
        let segments = self.segments_for_line(row);
        let idx = segment_index_for_col(&segments, self.cursor_col);
        let seg = segments[idx];
        LineInfo {
            row,
            segment_index: idx,
            segment_start: seg.start,
            segment_width: seg.width,
            char_count: self.lines[row].len(),
        }
    }

    pub fn visual_line_count(&self) -> usize {
        let w = self.inner_width();
        self.lines.iter().map(|l| wrap_line(l, w).len()).sum()
    }

    pub fn cursor_visual_line(&self) -> usize {
        let w = self.inner_width();
        let lines_before: usize = self.lines[..self.cursor_row]
            .iter()
            .map(|l| wrap_line(l, w).len())
            .sum();
        let segments = self.segments_for_line(self.cursor_row);
        lines_before + segment_index_for_col(&segments, self.cursor_col)
    }

    /// Cumulative visual width of the code points preceding the cursor on
    /// its own logical line, counted from column 0 of the line (not from
    /// the cursor's own wrapped segment — see `coords::visual_col_for_logical`
    /// for the segment-relative version the hit-tester needs).
    pub fn cursor_cell_prefix(&self) -> u16 {
        visual_width_prefix(&self.lines[self.cursor_row], self.cursor_col)
    }

    // ── Cursor motion ────────────────────────────────────────────────────

    pub fn cursor_start(&mut self) {
        self.cursor_col = 0;
        self.last_char_offset = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_col = self.lines[self.cursor_row].len();
        self.last_char_offset = 0;
    }

    pub fn set_cursor(&mut self, col: usize) {
        self.cursor_col = col.min(self.lines[self.cursor_row].len());
        self.last_char_offset = 0;
    }

    pub fn set_position(&mut self, row: usize, col: usize) {
        let row = row.min(self.lines.len() - 1);
        let col = col.min(self.lines[row].len());
        self.cursor_row = row;
        self.cursor_col = col;
        self.last_char_offset = 0;
    }

    pub fn select_all(&mut self) {
        // No selection range is maintained (spec §9 open question): collapse
        // to cursor-at-end-of-document, matching the upstream approximation.
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = self.lines[self.cursor_row].len();
        self.last_char_offset = 0;
    }

    fn desired_visual_col(&self) -> u16 {
        if self.last_char_offset > 0 {
            self.last_char_offset
        } else {
            visual_width_prefix(&self.lines[self.cursor_row], self.cursor_col)
        }
    }

    /// Place `cursor_col` on `row` at the code point closest to, but not
    /// exceeding, `want` visual columns.
    fn land_at_visual_col(&mut self, row: usize, want: u16) {
        let line = &self.lines[row];
        let mut acc: u16 = 0;
        let mut col = line.len();
        for (i, &ch) in line.iter().enumerate() {
            let w = crate::width::cell_width(ch) as u16;
            if acc + w > want {
                col = i;
                break;
            }
            acc += w;
        }
        self.cursor_row = row;
        self.cursor_col = col;
    }

    pub fn cursor_up(&mut self) {
        if self.cursor_row == 0 {
            return;
        }
        let want = self.desired_visual_col();
        self.last_char_offset = want;
        self.land_at_visual_col(self.cursor_row - 1, want);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor_row + 1 >= self.lines.len() {
            return;
        }
        let want = self.desired_visual_col();
        self.last_char_offset = want;
        self.land_at_visual_col(self.cursor_row + 1, want);
    }

    pub fn cursor_word_left(&mut self) {
        let (row, col) = self.word_left_position();
        self.cursor_row = row;
        self.cursor_col = col;
        self.last_char_offset = 0;
    }

    pub fn cursor_word_right(&mut self) {
        let (row, col) = self.word_right_position();
        self.cursor_row = row;
        self.cursor_col = col;
        self.last_char_offset = 0;
    }

    fn word_left_position(&self) -> (usize, usize) {
        if self.cursor_col == 0 {
            if self.cursor_row == 0 {
                return (0, 0);
            }
            return (self.cursor_row - 1, self.lines[self.cursor_row - 1].len());
        }
        let line = &self.lines[self.cursor_row];
        let mut i = self.cursor_col;
        while i > 0 && classify(line[i - 1]) == CharClass::Whitespace {
            i -= 1;
        }
        if i > 0 {
            let class = classify(line[i - 1]);
            while i > 0 && classify(line[i - 1]) == class {
                i -= 1;
            }
        }
        (self.cursor_row, i)
    }

    fn word_right_position(&self) -> (usize, usize) {
        let line = &self.lines[self.cursor_row];
        let len = line.len();
        if self.cursor_col >= len {
            if self.cursor_row + 1 >= self.lines.len() {
                return (self.cursor_row, len);
            }
            return (self.cursor_row + 1, 0);
        }
        let mut i = self.cursor_col;
        let class = classify(line[i]);
        while i < len && classify(line[i]) == class {
            i += 1;
        }
        while i < len && classify(line[i]) == CharClass::Whitespace {
            i += 1;
        }
        (self.cursor_row, i)
    }

    // ── Deletion ─────────────────────────────────────────────────────────

    /// Delete `n` code points ending at the cursor, merging with the
    /// previous logical line at a line boundary.
    pub fn delete_backward(&mut self, n: usize) {
        for _ in 0..n {
            if self.cursor_col > 0 {
                self.cursor_col -= 1;
                self.lines[self.cursor_row].remove(self.cursor_col);
            } else if self.cursor_row > 0 {
                let removed = self.lines.remove(self.cursor_row);
                self.cursor_row -= 1;
                self.cursor_col = self.lines[self.cursor_row].len();
                self.lines[self.cursor_row].extend(removed);
            } else {
                break;
            }
        }
        self.last_char_offset = 0;
    }

    /// Delete `n` code points starting at the cursor, merging with the
    /// next logical line at a line boundary.
    pub fn delete_forward(&mut self, n: usize) {
        for _ in 0..n {
            if self.cursor_col < self.lines[self.cursor_row].len() {
                self.lines[self.cursor_row].remove(self.cursor_col);
            } else if self.cursor_row + 1 < self.lines.len() {
                let next = self.lines.remove(self.cursor_row + 1);
                self.lines[self.cursor_row].extend(next);
            } else {
                break;
            }
        }
        self.last_char_offset = 0;
    }

    pub fn delete_word_backward(&mut self) {
        let (row, col) = self.word_left_position();
        self.delete_range(row, col, self.cursor_row, self.cursor_col);
    }

    pub fn delete_word_right(&mut self) {
        let (row, col) = self.word_right_position();
        self.delete_range(self.cursor_row, self.cursor_col, row, col);
    }

    pub fn delete_line_to_start(&mut self) {
        self.delete_range(self.cursor_row, 0, self.cursor_row, self.cursor_col);
    }

    pub fn delete_line_to_end(&mut self) {
        let end = self.lines[self.cursor_row].len();
        self.delete_range(self.cursor_row, self.cursor_col, self.cursor_row, end);
    }

    /// Delete the code points between `(from_row,from_col)` and
    /// `(to_row,to_col)` (order-independent), leaving the cursor at the
    /// start of the deleted range.
    fn delete_range(&mut self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) {
        let ((r0, c0), (r1, c1)) = if (from_row, from_col) <= (to_row, to_col) {
            ((from_row, from_col), (to_row, to_col))
        } else {
            ((to_row, to_col), (from_row, from_col))
        };
        if r0 == r1 {
            self.lines[r0].splice(c0..c1, std::iter::empty());
        } else {
            let tail: Vec<char> = self.lines[r1].split_off(c1);
            self.lines[r0].truncate(c0);
            self.lines[r0].extend(tail);
            self.lines.drain(r0 + 1..=r1);
        }
        self.cursor_row = r0;
        self.cursor_col = c0;
        self.last_char_offset = 0;
    }
}

fn split_lines(s: &str) -> Vec<Vec<char>> {
    let mut lines: Vec<Vec<char>> = s.split('\n').map(|l| l.chars().collect()).collect();
    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_with_width(w: u16) -> Buffer {
        let mut b = Buffer::new();
        b.set_total_width(w);
        b
    }

    #[test]
    fn set_value_round_trips() {
        for s in ["", "hello", "a\nb\nc", "trailing\n", "\nleading"] {
            let mut b = Buffer::new();
            b.set_value(s);
            assert_eq!(b.value(), s, "round-trip failed for {s:?}");
        }
    }

    #[test]
    fn insert_string_splits_on_newline() {
        let mut b = Buffer::new();
        b.insert_string("hello\nworld");
        assert_eq!(b.value(), "hello\nworld");
        assert_eq!(b.line(), 1);
        assert_eq!(b.col(), 5);
    }

    #[test]
    fn insert_in_middle_of_line() {
        let mut b = Buffer::new();
        b.set_value("helloworld");
        b.set_cursor(5);
        b.insert_string(" ");
        assert_eq!(b.value(), "hello world");
    }

    #[test]
    fn set_position_clamps() {
        let mut b = Buffer::new();
        b.set_value("ab\ncdef");
        b.set_position(0, 99);
        assert_eq!((b.line(), b.col()), (0, 2));
        b.set_position(99, 0);
        assert_eq!((b.line(), b.col()), (1, 0));
    }

    #[test]
    fn empty_buffer_accepts_zero_zero() {
        let mut b = Buffer::new();
        b.set_position(0, 0);
        assert_eq!((b.line(), b.col()), (0, 0));
    }

    #[test]
    fn visual_line_count_at_least_line_count() {
        let mut b = buf_with_width(10);
        b.set_value("ABCDEFGHIJKLMNOPQRST\nXYZ");
        assert_eq!(b.visual_line_count(), 3);
        assert!(b.visual_line_count() >= b.line_count());
    }

    #[test]
    fn select_all_collapses_to_end() {
        let mut b = Buffer::new();
        b.set_value("a\nbb\nccc");
        b.select_all();
        assert_eq!((b.line(), b.col()), (2, 3));
    }

    #[test]
    fn delete_backward_merges_lines_at_boundary() {
        let mut b = Buffer::new();
        b.set_value("foo\nbar");
        b.set_position(1, 0);
        b.delete_backward(1);
        assert_eq!(b.value(), "foobar");
        assert_eq!((b.line(), b.col()), (0, 3));
    }

    #[test]
    fn delete_forward_merges_next_line() {
        let mut b = Buffer::new();
        b.set_value("foo\nbar");
        b.set_position(0, 3);
        b.delete_forward(1);
        assert_eq!(b.value(), "foobar");
    }

    #[test]
    fn word_motion_skips_whitespace_runs() {
        let mut b = Buffer::new();
        b.set_value("foo   bar");
        b.set_position(0, 9);
        b.cursor_word_left();
        assert_eq!(b.col(), 6);
        b.cursor_word_left();
        assert_eq!(b.col(), 0);
    }

    #[test]
    fn char_limit_truncates_insert() {
        let mut b = Buffer::new();
        b.set_char_limit(Some(3));
        b.insert_string("hello");
        assert_eq!(b.value(), "hel");
    }

    #[test]
    fn cursor_up_down_uses_last_char_offset() {
        let mut b = buf_with_width(0); // disable wrapping for this test
        b.set_value("short\nlongerline");
        b.set_position(1, 8); // visual col 8
        b.cursor_up();
        assert_eq!(b.line(), 0);
        assert_eq!(b.col(), 5); // clamped to "short".len()
        b.cursor_down();
        assert_eq!((b.line(), b.col()), (1, 8)); // remembered desired column
    }
}
