// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! The `Textarea` facade: a [`vellum_core::Buffer`] plus its own inner
//! [`vellum_core::ViewportController`] and [`OuterContext`], serialised
//! behind a mutex per the spec's concurrency model (§5).

use std::sync::Mutex;

use tracing::trace;
use vellum_core::{
    cell_width, get_scroll_sync_info, handle_click, handle_click_at_screen_coords, Buffer,
    HitTest, LineInfo, LogicalPosition, ScrollSyncInfo, ViewportController,
};
use vellum_model::{Key, Msg, MouseButton, MouseEvent, OuterContext, TextareaOptions};

use crate::error::LifecycleError;
use crate::styler::{PlainStyler, Styler};

/// Host-facing style hooks (spec §6's `setFocusedStyle`/.../`setCursorLineForeground`).
///
/// These are opaque to the engine: they're just named slots a host-provided
/// [`Styler`] may consult when asked to render. `vellum` never interprets
/// their contents.
#[derive(Debug, Clone, Default)]
pub struct TextareaStyleConfig {
    pub focused_style: Option<String>,
    pub blurred_style: Option<String>,
    pub cursor_style: Option<String>,
    pub text_foreground: Option<String>,
    pub placeholder_foreground: Option<String>,
    pub cursor_foreground: Option<String>,
    pub cursor_line_foreground: Option<String>,
}

struct Inner {
    buffer: Buffer,
    viewport: ViewportController,
    outer: OuterContext,
    prompt: String,
    placeholder: String,
    show_line_numbers: bool,
    focused: bool,
    max_height: Option<u16>,
    style: TextareaStyleConfig,
    styler: Box<dyn Styler>,
    disposed: bool,
}

/// A soft-wrapping, multi-line text editor driven by a script's
/// `update`/`view` cycle.
pub struct Textarea {
    inner: Mutex<Inner>,
}

macro_rules! guard {
    ($lock:expr) => {{
        let guard = $lock.lock().expect("textarea mutex poisoned");
        if guard.disposed {
            return Err(LifecycleError::Disposed);
        }
        guard
    }};
}

impl Textarea {
    pub fn new() -> Self {
        Self::with_options(TextareaOptions::default())
    }

    pub fn with_options(options: TextareaOptions) -> Self {
        let mut buffer = Buffer::new();
        buffer.set_prompt_width(prompt_cell_width(&options.prompt));
        buffer.set_total_width(options.initial_width);
        buffer.set_max_width(options.max_width);
        buffer.set_char_limit(options.char_limit);

        let mut viewport = ViewportController::new(buffer.inner_width(), options.initial_height);
        viewport.set_content(buffer.visual_line_count(), 0);

        Self {
            inner: Mutex::new(Inner {
                buffer,
                viewport,
                outer: OuterContext::default(),
                prompt: options.prompt,
                placeholder: String::new(),
                show_line_numbers: options.show_line_numbers,
                focused: false,
                max_height: options.max_height,
                style: TextareaStyleConfig::default(),
                styler: Box::new(PlainStyler),
                disposed: false,
            }),
        }
    }

    /// Permanently detach this textarea. Every operation afterward returns
    /// [`LifecycleError::Disposed`] (spec §7).
    pub fn dispose(&self) {
        self.inner.lock().expect("textarea mutex poisoned").disposed = true;
    }

    fn resync(inner: &mut Inner) {
        inner.viewport.set_width(inner.buffer.inner_width());
        inner.viewport.set_content(inner.buffer.visual_line_count(), 0);
        inner.viewport.sync_to_cursor(inner.buffer.cursor_visual_line());
    }

    // ── Content ──────────────────────────────────────────────────────────

    pub fn set_value(&self, value: &str) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.set_value(value);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn value(&self) -> Result<String, LifecycleError> {
        Ok(guard!(self.inner).buffer.value())
    }

    pub fn insert_string(&self, s: &str) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.insert_string(s);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn insert_rune(&self, r: char) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.insert_rune(r);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn length(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).buffer.length())
    }

    pub fn line_count(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).buffer.line_count())
    }

    pub fn line(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).buffer.line())
    }

    pub fn line_info(&self) -> Result<LineInfo, LifecycleError> {
        Ok(guard!(self.inner).buffer.line_info())
    }

    pub fn select_all(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.select_all();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn reset(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.reset();
        Self::resync(&mut inner);
        Ok(())
    }

    // ── Geometry ─────────────────────────────────────────────────────────

    pub fn set_width(&self, width: u16) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.set_total_width(width);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn width(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).buffer.geometry().total_width)
    }

    pub fn set_height(&self, height: u16) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        let clamped = match inner.max_height {
            Some(max) => height.min(max),
            None => height,
        };
        inner.viewport.set_height(clamped);
        Ok(())
    }

    pub fn height(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).viewport.height())
    }

    pub fn set_max_width(&self, max: Option<u16>) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.set_max_width(max);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn set_max_height(&self, max: Option<u16>) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.max_height = max;
        if let Some(max) = max {
            let current = inner.viewport.height();
            if current > max {
                inner.viewport.set_height(max);
            }
        }
        Ok(())
    }

    pub fn prompt_width(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).buffer.geometry().prompt_width)
    }

    pub fn content_width(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).buffer.inner_width())
    }

    pub fn reserved_inner_width(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).buffer.geometry().reserved_outer)
    }

    pub fn y_offset(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).viewport.y_offset())
    }

    // ── Cursor ───────────────────────────────────────────────────────────

    pub fn set_cursor(&self, col: usize) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.set_cursor(col);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn set_row(&self, row: usize) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        let col = inner.buffer.col();
        inner.buffer.set_position(row, col);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn set_position(&self, row: usize, col: usize) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.set_position(row, col);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn col(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).buffer.col())
    }

    pub fn cursor_up(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.cursor_up();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn cursor_down(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.cursor_down();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn cursor_start(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.cursor_start();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn cursor_end(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.cursor_end();
        Self::resync(&mut inner);
        Ok(())
    }

    // ── Deletion & word motion (SPEC_FULL §4.2, added) ──────────────────

    pub fn delete_backward(&self, n: usize) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.delete_backward(n);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn delete_forward(&self, n: usize) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.delete_forward(n);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn delete_word_backward(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.delete_word_backward();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn delete_word_right(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.delete_word_right();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn delete_line_to_start(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.delete_line_to_start();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn delete_line_to_end(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.delete_line_to_end();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn cursor_word_left(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.cursor_word_left();
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn cursor_word_right(&self) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.buffer.cursor_word_right();
        Self::resync(&mut inner);
        Ok(())
    }

    // ── Coordinate translation ───────────────────────────────────────────

    pub fn visual_line_count(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).buffer.visual_line_count())
    }

    pub fn cursor_visual_line(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).buffer.cursor_visual_line())
    }

    pub fn perform_hit_test(
        &self,
        visual_x: usize,
        visual_y: usize,
    ) -> Result<HitTest, LifecycleError> {
        let inner = guard!(self.inner);
        Ok(vellum_core::perform_hit_test(&inner.buffer, visual_y, visual_x))
    }

    /// Legacy shim (spec §4.3): resolves a click already given in
    /// textarea-relative visual coordinates.
    pub fn handle_click(
        &self,
        visual_x: usize,
        visual_y: usize,
    ) -> Result<Option<LogicalPosition>, LifecycleError> {
        let inner = guard!(self.inner);
        Ok(handle_click(&inner.buffer, visual_y, visual_x))
    }

    pub fn handle_click_at_screen_coords(
        &self,
        screen_x: usize,
        screen_y: usize,
    ) -> Result<HitTest, LifecycleError> {
        let mut inner = guard!(self.inner);
        let hit = handle_click_at_screen_coords(&inner.buffer, &inner.outer, screen_x, screen_y);
        if let HitTest::Hit(pos) = hit {
            inner.buffer.set_position(pos.row, pos.col);
            Self::resync(&mut inner);
        }
        trace!(screen_x, screen_y, ?hit, "handle_click_at_screen_coords");
        Ok(hit)
    }

    pub fn get_scroll_sync_info(&self) -> Result<ScrollSyncInfo, LifecycleError> {
        let inner = guard!(self.inner);
        Ok(get_scroll_sync_info(&inner.buffer, &inner.outer))
    }

    /// Atomically set the six outer-context fields (spec §3 "Outer
    /// context"). Must be called before any `handleClickAtScreenCoords`
    /// reflecting a new outer scroll position (spec §8 scenario d).
    #[allow(clippy::too_many_arguments)]
    pub fn set_viewport_context(
        &self,
        outer_y_offset: usize,
        textarea_content_top: usize,
        textarea_content_left: usize,
        outer_viewport_height: usize,
        pre_content_height: usize,
        title_height: usize,
    ) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.outer.set(
            outer_y_offset,
            textarea_content_top,
            textarea_content_left,
            outer_viewport_height,
            pre_content_height,
            title_height,
        );
        Ok(())
    }

    // ── Focus & presentation ─────────────────────────────────────────────

    pub fn focus(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).focused = true;
        Ok(())
    }

    pub fn blur(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).focused = false;
        Ok(())
    }

    pub fn focused(&self) -> Result<bool, LifecycleError> {
        Ok(guard!(self.inner).focused)
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.prompt = prompt.into();
        let width = prompt_cell_width(&inner.prompt);
        inner.buffer.set_prompt_width(width);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).placeholder = placeholder.into();
        Ok(())
    }

    pub fn set_char_limit(&self, limit: Option<usize>) -> Result<(), LifecycleError> {
        guard!(self.inner).buffer.set_char_limit(limit);
        Ok(())
    }

    pub fn set_show_line_numbers(&self, show: bool) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        inner.show_line_numbers = show;
        let width = if show { 4 } else { 0 };
        inner.buffer.set_line_number_width(width);
        Self::resync(&mut inner);
        Ok(())
    }

    pub fn set_focused_style(&self, style: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.focused_style = Some(style.into());
        Ok(())
    }

    pub fn set_blurred_style(&self, style: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.blurred_style = Some(style.into());
        Ok(())
    }

    pub fn set_cursor_style(&self, style: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.cursor_style = Some(style.into());
        Ok(())
    }

    pub fn set_text_foreground(&self, color: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.text_foreground = Some(color.into());
        Ok(())
    }

    pub fn set_placeholder_foreground(&self, color: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.placeholder_foreground = Some(color.into());
        Ok(())
    }

    pub fn set_cursor_foreground(&self, color: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.cursor_foreground = Some(color.into());
        Ok(())
    }

    pub fn set_cursor_line_foreground(&self, color: impl Into<String>) -> Result<(), LifecycleError> {
        guard!(self.inner).style.cursor_line_foreground = Some(color.into());
        Ok(())
    }

    pub fn set_styler(&self, styler: Box<dyn Styler>) -> Result<(), LifecycleError> {
        guard!(self.inner).styler = styler;
        Ok(())
    }

    // ── Update / view ────────────────────────────────────────────────────

    /// Apply one message to the textarea (spec §6's `update(msg) -> [self, cmd]`).
    ///
    /// Returns `true` if the message was consumed. The textarea never
    /// itself produces a command descriptor — it only mutates buffer and
    /// viewport state — so the `cmd` half of the Elm pair is always
    /// `None` at this layer; a host composing richer behavior (e.g. a
    /// cursor-blink tick) builds that command around this call.
    pub fn update(&self, msg: &Msg) -> Result<bool, LifecycleError> {
        let mut inner = guard!(self.inner);
        if !inner.focused {
            return Ok(false);
        }
        match msg {
            Msg::Key(key_msg) => {
                let consumed = Self::apply_key(&mut inner, key_msg.parsed());
                Self::resync(&mut inner);
                Ok(consumed)
            }
            Msg::Mouse(mouse) if mouse.event == MouseEvent::Press && mouse.button == MouseButton::Left => {
                drop(inner);
                let hit = self.handle_click_at_screen_coords(mouse.x.max(0) as usize, mouse.y.max(0) as usize)?;
                Ok(matches!(hit, HitTest::Hit(_)))
            }
            _ => Ok(false),
        }
    }

    fn apply_key(inner: &mut Inner, key: Key) -> bool {
        match key {
            Key::Enter => inner.buffer.insert_rune('\n'),
            Key::Backspace => inner.buffer.delete_backward(1),
            Key::Tab => inner.buffer.insert_rune('\t'),
            Key::Up => inner.buffer.cursor_up(),
            Key::Down => inner.buffer.cursor_down(),
            Key::Left => {
                if inner.buffer.col() > 0 {
                    let col = inner.buffer.col() - 1;
                    inner.buffer.set_cursor(col);
                } else if inner.buffer.line() > 0 {
                    let row = inner.buffer.line() - 1;
                    let col = inner.buffer.line_len(row);
                    inner.buffer.set_position(row, col);
                }
            }
            Key::Right => {
                let line_len = inner.buffer.line_len(inner.buffer.line());
                if inner.buffer.col() < line_len {
                    let col = inner.buffer.col() + 1;
                    inner.buffer.set_cursor(col);
                } else if inner.buffer.line() + 1 < inner.buffer.line_count() {
                    inner.buffer.set_position(inner.buffer.line() + 1, 0);
                }
            }
            Key::Home => inner.buffer.cursor_start(),
            Key::End => inner.buffer.cursor_end(),
            Key::PgUp | Key::PgDown => return false,
            Key::Esc => return false,
            Key::Ctrl('a') => inner.buffer.cursor_start(),
            Key::Ctrl('e') => inner.buffer.cursor_end(),
            Key::Ctrl('w') => inner.buffer.delete_word_backward(),
            Key::Ctrl('u') => inner.buffer.delete_line_to_start(),
            Key::Ctrl('k') => inner.buffer.delete_line_to_end(),
            Key::Ctrl(_) => return false,
            Key::Char(c) => inner.buffer.insert_rune(c),
        }
        true
    }

    /// Render the buffer's visible rows through the configured styler
    /// (spec §6 `view()`).
    pub fn view(&self) -> Result<String, LifecycleError> {
        let inner = guard!(self.inner);
        let height = inner.viewport.height() as usize;
        let y_offset = inner.viewport.y_offset();

        if inner.buffer.length() == 0 && inner.buffer.line_count() == 1 {
            return Ok(inner.styler.style_placeholder(&inner.placeholder));
        }

        let mut rows = Vec::with_capacity(height);
        let mut visual_row = 0usize;
        'outer: for row in 0..inner.buffer.line_count() {
            let segments = inner.buffer.segments_for_line(row);
            let line = inner.buffer.line_chars(row);
            for seg in &segments {
                if visual_row >= y_offset && rows.len() < height {
                    let seg_end = segments
                        .iter()
                        .find(|s| s.start > seg.start)
                        .map(|s| s.start)
                        .unwrap_or(line.len());
                    let text: String = line[seg.start..seg_end].iter().collect();
                    let prefix = if inner.show_line_numbers && seg.start == 0 {
                        inner.styler.style_line_number(row + 1)
                    } else {
                        String::new()
                    };
                    rows.push(format!("{prefix}{}", inner.styler.style_text(&text)));
                } else if rows.len() >= height {
                    break 'outer;
                }
                visual_row += 1;
            }
        }
        Ok(rows.join("\n"))
    }
}

impl Default for Textarea {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_cell_width(prompt: &str) -> u16 {
    prompt.chars().map(|c| cell_width(c) as u16).sum()
}
