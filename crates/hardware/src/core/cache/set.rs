//! Per-set LRU line store.
//!
//! A set holds exactly `E` slots ordered from most-recently-used (index 0) to
//! least-recently-used (index `E - 1`). Occupied lines always form a contiguous
//! prefix of the slots: every insertion and every hit re-splices the touched line
//! to the front, so empty slots can only trail the occupied ones.
//!
//! # Performance
//!
//! - `lookup()`: O(E) linear scan over the occupied prefix
//! - `promote()`: O(E) rotation
//! - `is_full()`, `evict_lru()`: O(1)

use std::collections::TryReserveError;

/// A single cache line slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Line {
    /// No block resident.
    #[default]
    Empty,
    /// A block with the given tag is resident.
    Occupied(u64),
}

impl Line {
    /// Returns the resident tag, if any.
    #[inline]
    pub const fn tag(self) -> Option<u64> {
        match self {
            Self::Empty => None,
            Self::Occupied(tag) => Some(tag),
        }
    }
}

/// Bounded, recency-ordered collection of resident tags for one set.
#[derive(Clone, Debug)]
pub struct CacheSet {
    /// Slots ordered MRU → LRU; `slots[..occupied]` are all `Occupied`.
    slots: Box<[Line]>,
    occupied: usize,
}

impl CacheSet {
    /// Creates an empty set with `ways` slots, reporting allocation failure instead of aborting.
    ///
    /// `ways` is validated to be at least 1 by `CacheConfig`.
    ///
    /// # Errors
    ///
    /// Returns the allocator error if the slot storage cannot be reserved.
    pub fn try_new(ways: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(ways)?;
        slots.resize(ways, Line::Empty);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            occupied: 0,
        })
    }

    /// Returns the position of `tag` in the recency order, or `None` if it is not resident.
    pub fn lookup(&self, tag: u64) -> Option<usize> {
        self.slots[..self.occupied]
            .iter()
            .position(|line| *line == Line::Occupied(tag))
    }

    /// Moves the line at `position` to the MRU slot.
    ///
    /// Every line ahead of `position` shifts back by one; lines behind it keep their place.
    pub fn promote(&mut self, position: usize) {
        debug_assert!(position < self.slots.len());
        self.slots[..=position].rotate_right(1);
    }

    /// True iff all `E` slots hold a line.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Removes the least-recently-used line and returns its tag.
    ///
    /// Only meaningful when the set is full; on a set with free slots nothing is
    /// evicted and `None` is returned.
    pub fn evict_lru(&mut self) -> Option<u64> {
        if !self.is_full() {
            return None;
        }
        let last = self.occupied - 1;
        let victim = std::mem::take(&mut self.slots[last]);
        self.occupied = last;
        victim.tag()
    }

    /// Installs `tag` as the most-recently-used line.
    ///
    /// The tag is written into the first free slot and then promoted to the front.
    /// The caller must have made room with [`CacheSet::evict_lru`] if the set was
    /// full and must have checked with [`CacheSet::lookup`] that the tag is absent.
    pub fn insert_mru(&mut self, tag: u64) {
        debug_assert!(!self.is_full(), "insert into a full set without eviction");
        debug_assert!(self.lookup(tag).is_none(), "duplicate tag {tag:#x}");
        let slot = self.occupied;
        self.slots[slot] = Line::Occupied(tag);
        self.occupied += 1;
        self.promote(slot);
    }

    /// Number of resident lines.
    #[inline]
    pub const fn len(&self) -> usize {
        self.occupied
    }

    /// True if no line is resident.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Associativity of this set.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.slots.len()
    }

    /// Resident tags from most- to least-recently-used.
    pub fn tags(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots[..self.occupied].iter().filter_map(|line| line.tag())
    }
}
