// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A small single-value TTL cache.
//!
//! The cache is owned and injected by the caller (the server holds one
//! for the schools overview), which keeps expiry testable: `get` takes
//! the current instant instead of reading the clock itself.

use std::time::{Duration, Instant};

/// A single cached value with a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T> TtlCache<T> {
    /// Creates an empty cache with the given time-to-live.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached value if it is still fresh at `now`.
    #[must_use]
    pub fn get(&self, now: Instant) -> Option<&T> {
        match &self.entry {
            Some((stored_at, value)) if now.duration_since(*stored_at) < self.ttl => Some(value),
            _ => None,
        }
    }

    /// Stores a value, stamping it with `now`.
    pub fn put(&mut self, value: T, now: Instant) {
        self.entry = Some((now, value));
    }

    /// Drops the cached value so the next read goes to storage.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
