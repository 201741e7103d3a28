// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! The standalone `Viewport` facade: a scrollable window over pre-rendered
//! content lines, independent of any `Textarea` (spec §4.4 / §6).

use std::sync::Mutex;

use vellum_core::{ViewportController, WheelDirection};
use vellum_model::{Msg, MouseButton, MouseEvent, MouseMsg, ViewportOptions};

use crate::error::LifecycleError;
use crate::styler::{PlainStyler, Styler};

struct Inner {
    controller: ViewportController,
    lines: Vec<String>,
    styler: Box<dyn Styler>,
    disposed: bool,
}

/// A pure scrolling window: holds rendered lines, tracks `(x_offset,
/// y_offset)`, and answers the same mouse-wheel/page/goto vocabulary as
/// the textarea's inner viewport, but addressable directly by a host.
pub struct Viewport {
    inner: Mutex<Inner>,
}

macro_rules! guard {
    ($lock:expr) => {{
        let guard = $lock.lock().expect("viewport mutex poisoned");
        if guard.disposed {
            return Err(LifecycleError::Disposed);
        }
        guard
    }};
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            inner: Mutex::new(Inner {
                controller: ViewportController::new(width, height),
                lines: Vec::new(),
                styler: Box::new(PlainStyler),
                disposed: false,
            }),
        }
    }

    pub fn with_options(options: ViewportOptions) -> Self {
        let mut controller = ViewportController::new(options.width, options.height);
        controller.set_mouse_wheel_enabled(options.mouse_wheel_enabled);
        controller.set_mouse_wheel_delta(options.mouse_wheel_delta);
        Self {
            inner: Mutex::new(Inner {
                controller,
                lines: Vec::new(),
                styler: Box::new(PlainStyler),
                disposed: false,
            }),
        }
    }

    pub fn dispose(&self) {
        self.inner.lock().expect("viewport mutex poisoned").disposed = true;
    }

    pub fn set_content(&self, lines: Vec<String>) -> Result<(), LifecycleError> {
        let mut inner = guard!(self.inner);
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        inner.controller.set_content(lines.len(), longest);
        inner.lines = lines;
        Ok(())
    }

    pub fn set_width(&self, width: u16) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.set_width(width);
        Ok(())
    }

    pub fn set_height(&self, height: u16) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.set_height(height);
        Ok(())
    }

    pub fn width(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).controller.width())
    }

    pub fn height(&self) -> Result<u16, LifecycleError> {
        Ok(guard!(self.inner).controller.height())
    }

    pub fn scroll_up(&self, n: usize) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.scroll_up(n);
        Ok(())
    }

    pub fn scroll_down(&self, n: usize) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.scroll_down(n);
        Ok(())
    }

    pub fn scroll_left(&self, n: usize) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.scroll_left(n);
        Ok(())
    }

    pub fn scroll_right(&self, n: usize) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.scroll_right(n);
        Ok(())
    }

    pub fn page_up(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.page_up();
        Ok(())
    }

    pub fn page_down(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.page_down();
        Ok(())
    }

    pub fn half_page_up(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.half_page_up();
        Ok(())
    }

    pub fn half_page_down(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.half_page_down();
        Ok(())
    }

    pub fn goto_top(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.goto_top();
        Ok(())
    }

    pub fn goto_bottom(&self) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.goto_bottom();
        Ok(())
    }

    pub fn set_y_offset(&self, n: usize) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.set_y_offset(n);
        Ok(())
    }

    pub fn y_offset(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).controller.y_offset())
    }

    pub fn set_x_offset(&self, n: usize) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.set_x_offset(n);
        Ok(())
    }

    pub fn x_offset(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).controller.x_offset())
    }

    pub fn scroll_percent(&self) -> Result<f64, LifecycleError> {
        Ok(guard!(self.inner).controller.scroll_percent())
    }

    pub fn horizontal_scroll_percent(&self) -> Result<f64, LifecycleError> {
        Ok(guard!(self.inner).controller.horizontal_scroll_percent())
    }

    pub fn at_top(&self) -> Result<bool, LifecycleError> {
        Ok(guard!(self.inner).controller.at_top())
    }

    pub fn at_bottom(&self) -> Result<bool, LifecycleError> {
        Ok(guard!(self.inner).controller.at_bottom())
    }

    pub fn past_bottom(&self) -> Result<bool, LifecycleError> {
        Ok(guard!(self.inner).controller.past_bottom())
    }

    pub fn total_line_count(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).controller.total_line_count())
    }

    pub fn visible_line_count(&self) -> Result<usize, LifecycleError> {
        Ok(guard!(self.inner).controller.visible_line_count())
    }

    pub fn set_mouse_wheel_enabled(&self, enabled: bool) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.set_mouse_wheel_enabled(enabled);
        Ok(())
    }

    pub fn set_mouse_wheel_delta(&self, delta: u16) -> Result<(), LifecycleError> {
        guard!(self.inner).controller.set_mouse_wheel_delta(delta);
        Ok(())
    }

    pub fn set_styler(&self, styler: Box<dyn Styler>) -> Result<(), LifecycleError> {
        guard!(self.inner).styler = styler;
        Ok(())
    }

    /// Apply a mouse-wheel message, scrolling by the configured delta
    /// (spec §4.4 "mouse wheel"). Non-wheel messages are ignored — a
    /// viewport has no cursor and no key handling of its own.
    pub fn update(&self, msg: &Msg) -> Result<bool, LifecycleError> {
        let mut inner = guard!(self.inner);
        if !inner.controller.mouse_wheel_enabled() {
            return Ok(false);
        }
        let Msg::Mouse(MouseMsg { button, event: MouseEvent::Press, .. }) = msg else {
            return Ok(false);
        };
        let direction = match button {
            MouseButton::WheelUp => WheelDirection::Up,
            MouseButton::WheelDown => WheelDirection::Down,
            MouseButton::WheelLeft => WheelDirection::Left,
            MouseButton::WheelRight => WheelDirection::Right,
            _ => return Ok(false),
        };
        inner.controller.apply_wheel(direction);
        Ok(true)
    }

    pub fn view(&self) -> Result<String, LifecycleError> {
        let inner = guard!(self.inner);
        let height = inner.controller.height() as usize;
        let y_offset = inner.controller.y_offset();
        let x_offset = inner.controller.x_offset();

        let rows: Vec<String> = inner
            .lines
            .iter()
            .skip(y_offset)
            .take(height)
            .map(|line| {
                let visible: String = line.chars().skip(x_offset).collect();
                inner.styler.style_text(&visible)
            })
            .collect();
        Ok(rows.join("\n"))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn new_viewport_is_empty_and_at_top() {
        let v = Viewport::new(20, 5);
        assert_eq!(v.total_line_count().unwrap(), 0);
        assert!(v.at_top().unwrap());
    }

    #[test]
    fn set_content_tracks_total_line_count() {
        let v = Viewport::new(20, 5);
        v.set_content(sample_lines(30)).unwrap();
        assert_eq!(v.total_line_count().unwrap(), 30);
    }

    #[test]
    fn goto_bottom_reaches_last_page() {
        let v = Viewport::new(20, 5);
        v.set_content(sample_lines(30)).unwrap();
        v.goto_bottom().unwrap();
        assert!(v.at_bottom().unwrap());
    }

    #[test]
    fn view_renders_only_visible_window() {
        let v = Viewport::new(20, 3);
        v.set_content(sample_lines(10)).unwrap();
        let rendered = v.view().unwrap();
        assert_eq!(rendered.lines().count(), 3);
        assert_eq!(rendered.lines().next().unwrap(), "line 0");
    }

    #[test]
    fn wheel_down_message_scrolls_when_enabled() {
        let v = Viewport::new(20, 3);
        v.set_content(sample_lines(10)).unwrap();
        let consumed = v
            .update(&Msg::Mouse(MouseMsg {
                x: 0,
                y: 0,
                button: MouseButton::WheelDown,
                event: MouseEvent::Press,
                alt: false,
                ctrl: false,
                shift: false,
            }))
            .unwrap();
        assert!(consumed);
        assert!(v.y_offset().unwrap() > 0);
    }

    #[test]
    fn wheel_ignored_when_disabled() {
        let v = Viewport::new(20, 3);
        v.set_content(sample_lines(10)).unwrap();
        v.set_mouse_wheel_enabled(false).unwrap();
        let consumed = v
            .update(&Msg::Mouse(MouseMsg {
                x: 0,
                y: 0,
                button: MouseButton::WheelDown,
                event: MouseEvent::Press,
                alt: false,
                ctrl: false,
                shift: false,
            }))
            .unwrap();
        assert!(!consumed);
        assert_eq!(v.y_offset().unwrap(), 0);
    }

    #[test]
    fn dispose_fails_every_subsequent_operation() {
        let v = Viewport::new(20, 3);
        v.dispose();
        assert_eq!(v.y_offset().unwrap_err(), LifecycleError::Disposed);
    }
}
