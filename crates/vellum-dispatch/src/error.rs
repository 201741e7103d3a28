// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Errors the dispatcher's own factories and decoder can raise.
///
/// Unknown descriptor shapes are tolerated, not errors (spec §4.5): this
/// enum only covers validation failures on otherwise well-formed command
/// factory calls.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("BT001: tick duration must be positive, got {duration_ms}ms")]
    InvalidTickDuration { duration_ms: i64 },

    /// Reserved for forward-compatible descriptor kinds the decoder
    /// declines to treat as an error; never returned from [`crate::decode`]
    /// — present for `Debug`/tracing purposes only.
    #[error("unknown command kind: {0}")]
    Unknown(String),
}
