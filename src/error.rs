// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Raised by every public `Textarea`/`Viewport` method once `dispose()`
/// has run (spec §7 "Rust realization").
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("model has been disposed")]
    Disposed,
}
