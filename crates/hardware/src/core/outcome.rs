//! Access outcomes.
//!
//! The result of a single simulated access, and the (at most two) results produced
//! by one trace record. Outcomes are advisory: counters are updated by the simulator
//! when the access happens, never from these values.

use std::fmt;

/// What one access did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The tag was resident.
    Hit,
    /// The tag was absent and installed into a free slot.
    Miss,
    /// The tag was absent and the set was full; the LRU line was displaced.
    MissEviction,
}

impl AccessOutcome {
    /// True for [`AccessOutcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// True if the access displaced a resident line.
    #[inline]
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEviction)
    }

    /// Outcome tags as printed by the verbose echo.
    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Hit => &["hit"],
            Self::Miss => &["miss"],
            Self::MissEviction => &["miss", "eviction"],
        }
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags().join(" "))
    }
}

/// Outcomes of the accesses triggered by one trace record.
///
/// Instruction fetches and unknown operations produce none, loads and stores one,
/// modifies two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordOutcomes {
    buf: [Option<AccessOutcome>; 2],
    len: usize,
}

impl RecordOutcomes {
    /// No access was performed.
    pub const NONE: Self = Self {
        buf: [None, None],
        len: 0,
    };

    /// A single access.
    pub const fn one(outcome: AccessOutcome) -> Self {
        Self {
            buf: [Some(outcome), None],
            len: 1,
        }
    }

    /// Two back-to-back accesses.
    pub const fn two(first: AccessOutcome, second: AccessOutcome) -> Self {
        Self {
            buf: [Some(first), Some(second)],
            len: 2,
        }
    }

    /// Number of accesses performed.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if the record performed no access.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Outcomes in access order.
    pub fn iter(&self) -> impl Iterator<Item = AccessOutcome> + '_ {
        self.buf[..self.len].iter().flatten().copied()
    }
}
