//! Simulation statistics collection and reporting.
//!
//! This module tracks the three counters a replay produces:
//! 1. **Hits:** Accesses whose tag was resident.
//! 2. **Misses:** Accesses whose tag was absent.
//! 3. **Evictions:** Misses that displaced a resident line from a full set.
//!
//! Counters only ever grow. No derived metrics (hit rate, etc.) are computed.

use std::fmt;

use serde::Serialize;

use crate::core::outcome::AccessOutcome;

/// Running hit/miss/eviction counters for one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheStats {
    /// Creates zeroed counters.
    pub const fn new() -> Self {
        Self {
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Accounts for one access outcome.
    ///
    /// A `MissEviction` counts as one miss and one eviction.
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
            AccessOutcome::MissEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Hit count so far.
    #[inline]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Miss count so far.
    #[inline]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Eviction count so far.
    #[inline]
    pub const fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Snapshot of the counters.
    pub const fn summary(&self) -> Summary {
        Summary {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// Final `(hits, misses, evictions)` tuple of a replay.
///
/// Displays as `hits:<n> misses:<n> evictions:<n>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of hits.
    pub hits: u64,
    /// Number of misses.
    pub misses: u64,
    /// Number of evictions.
    pub evictions: u64,
}

impl Summary {
    /// Renders the summary as a JSON object.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
