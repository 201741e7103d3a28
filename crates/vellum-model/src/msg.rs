// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Message descriptors produced by the host I/O driver and consumed by
//! `update` (spec §6 "Message descriptors").

use serde::{Deserialize, Serialize};

/// A parsed key, decoded from the raw `key` string the host sends.
///
/// Named keys match spec §6 verbatim; anything else is treated as a
/// single printable character (`Char`) or, when prefixed `ctrl+`, a
/// control chord (`Ctrl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PgUp,
    PgDown,
    Home,
    End,
    Ctrl(char),
    Char(char),
}

impl Key {
    /// Parse the raw key string the host sends. Unknown multi-character
    /// strings fall back to `Char` on their first character — the host is
    /// expected to only ever send single characters or the named keys.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "enter" => Key::Enter,
            "esc" => Key::Esc,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "pgup" => Key::PgUp,
            "pgdown" => Key::PgDown,
            "home" => Key::Home,
            "end" => Key::End,
            _ => {
                if let Some(rest) = raw.strip_prefix("ctrl+") {
                    if let Some(c) = rest.chars().next() {
                        return Key::Ctrl(c);
                    }
                }
                Key::Char(raw.chars().next().unwrap_or('\0'))
            }
        }
    }
}

/// `{type:"Key", key:<string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMsg {
    pub key: String,
}

impl KeyMsg {
    pub fn parsed(&self) -> Key {
        Key::parse(&self.key)
    }
}

/// Mouse buttons named in spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[serde(rename = "wheel up")]
    WheelUp,
    #[serde(rename = "wheel down")]
    WheelDown,
    #[serde(rename = "wheel left")]
    WheelLeft,
    #[serde(rename = "wheel right")]
    WheelRight,
    None,
}

/// The mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEvent {
    Press,
    Release,
    Motion,
}

/// `{type:"Mouse", x, y, button, event, alt, ctrl, shift}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseMsg {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub event: MouseEvent,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

/// `{type:"WindowSize", width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSizeMsg {
    pub width: u16,
    pub height: u16,
}

/// `{type:"Tick", id}` — correlates to a prior `tick` command descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickMsg {
    pub id: String,
}

/// Any message the host event loop may deliver to `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Msg {
    Key(KeyMsg),
    Mouse(MouseMsg),
    WindowSize(WindowSizeMsg),
    Tick(TickMsg),
}
