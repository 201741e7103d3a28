// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! The host-side table mapping [`HandleId`]s to native commands (spec
//! §4.5 "Handle table lifecycle").
//!
//! Grounded on the §5 concurrency model's "serialise behind a mutex" rule,
//! applied here to the one piece of process-wide shared state the command
//! protocol needs: the opaque handle table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use vellum_model::HandleId;

/// Process-wide monotone id source for both `_cmdId` and [`HandleId`]
/// allocation (spec §4.5 "Identity invariants": distinct ids per call).
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Stores native, non-serialisable command closures keyed by a
/// process-unique [`HandleId`], so only the id needs to cross a
/// script/JSON boundary.
pub struct HandleTable<Native> {
    entries: Mutex<HashMap<u64, Native>>,
}

impl<Native> Default for HandleTable<Native> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<Native> HandleTable<Native> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `native` and return the handle that names it.
    pub fn insert(&self, native: Native) -> HandleId {
        let id = next_id();
        self.entries
            .lock()
            .expect("handle table mutex poisoned")
            .insert(id, native);
        HandleId(id)
    }

    /// Remove and return the native command named by `handle`, if present.
    pub fn remove(&self, handle: HandleId) -> Option<Native> {
        self.entries
            .lock()
            .expect("handle table mutex poisoned")
            .remove(&handle.get())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("handle table mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<Native: Clone> HandleTable<Native> {
    /// Look up the native command named by `handle` without removing it.
    pub fn get(&self, handle: HandleId) -> Option<Native> {
        self.entries
            .lock()
            .expect("handle table mutex poisoned")
            .get(&handle.get())
            .cloned()
    }
}
