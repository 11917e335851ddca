// SPDX-License-Identifier: MPL-2.0
//! Monotonic unique-id generation.
//!
//! Ids are `"{prefix}-{n}"` strings with a separate counter per prefix,
//! so a process can hand out `toast-1`, `toast-2`, ... alongside
//! `field-1`, `field-2`, ... without interference. The counter table is
//! owned by the generator instance rather than hidden in module state,
//! which lets tests create isolated generators and lets embedders reset
//! counters deterministically (e.g. before server-side rendering).

use std::collections::HashMap;

/// Generator of process-unique, monotonically increasing string ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counters: HashMap<String, u64>,
}

impl IdGenerator {
    /// Creates a generator with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id for `prefix`, starting at `"{prefix}-1"`.
    ///
    /// Ids are never reused within the lifetime of this generator.
    pub fn generate(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{}-{}", prefix, counter)
    }

    /// Reinitializes every counter.
    ///
    /// After a reset, previously issued ids will be issued again; callers
    /// that depend on process-wide uniqueness must not reset mid-flight.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}
