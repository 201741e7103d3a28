// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Width Oracle (spec §4.1): maps a code point to its visual cell count.

use unicode_width::UnicodeWidthChar;

/// Visual cell width of `ch`: 2 for east-asian-wide/emoji, 1 otherwise.
///
/// Zero-width code points (combining marks, etc.) are reported as width 1
/// rather than 0 — a deliberate approximation (spec §9 "Open questions"):
/// a proper grapheme-cluster walker would change hit-test fixed points, so
/// the engine keeps the simpler per-code-point model.
pub fn cell_width(ch: char) -> u8 {
    match UnicodeWidthChar::width(ch) {
        None => 1,
        Some(0) => 1,
        Some(w) => w.min(2) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_width_one() {
        assert_eq!(cell_width('a'), 1);
        assert_eq!(cell_width('!'), 1);
    }

    #[test]
    fn cjk_is_width_two() {
        assert_eq!(cell_width('你'), 2);
        assert_eq!(cell_width('好'), 2);
    }

    #[test]
    fn combining_mark_is_width_one_not_zero() {
        // U+0301 COMBINING ACUTE ACCENT
        assert_eq!(cell_width('\u{0301}'), 1);
    }

    #[test]
    fn control_char_is_width_one() {
        assert_eq!(cell_width('\u{0000}'), 1);
    }

    #[test]
    fn never_exceeds_two() {
        for c in ['a', '你', '\u{0301}', '€', '\t'] {
            let w = cell_width(c);
            assert!(w == 1 || w == 2, "unexpected width {w} for {c:?}");
        }
    }
}
