// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Host-facing config bundles (spec §3.1, added to mirror `sven-config`'s
//! schema/loader split without giving the engine its own file format).
//!
//! The engine never reads or writes these — a host deserializes them from
//! its own config file and passes the result to `Textarea::with_options` /
//! `Viewport::with_options`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextareaOptions {
    pub initial_width: u16,
    pub initial_height: u16,
    pub prompt: String,
    pub show_line_numbers: bool,
    pub char_limit: Option<usize>,
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
}

impl Default for TextareaOptions {
    fn default() -> Self {
        Self {
            initial_width: 40,
            initial_height: 6,
            prompt: String::from("> "),
            show_line_numbers: false,
            char_limit: None,
            max_width: None,
            max_height: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    pub width: u16,
    pub height: u16,
    pub mouse_wheel_enabled: bool,
    pub mouse_wheel_delta: u16,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            mouse_wheel_enabled: true,
            mouse_wheel_delta: 3,
        }
    }
}
