//! Set-Associative LRU Cache Model.
//!
//! This module implements the cache the simulator replays traces against. It models
//! which blocks are resident and in what recency order; it does not model data,
//! dirtiness, or latency. Each access is classified as a hit, a miss into a free
//! slot, or a miss that evicts the least-recently-used line of a full set.

/// Per-set recency-ordered line store.
pub mod set;

use tracing::trace;

use self::set::CacheSet;
use crate::common::addr::decode;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::core::outcome::AccessOutcome;

/// A set-associative cache with `2^s` sets of `E` lines each, using LRU replacement.
#[derive(Debug, Clone)]
pub struct Cache {
    config: CacheConfig,
    sets: Vec<CacheSet>,
}

impl Cache {
    /// Allocates the full line table for `config`.
    ///
    /// The table is sized once and never grows or shrinks during a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Allocation`] if `2^s` sets of `E` lines cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let alloc_err = || ConfigError::Allocation {
            lines: config.total_lines(),
        };
        let num_sets = usize::try_from(config.num_sets()).map_err(|_| alloc_err())?;
        let lines = num_sets.checked_mul(config.ways()).ok_or_else(alloc_err)?;

        let mut sets = Vec::new();
        sets.try_reserve_exact(num_sets).map_err(|_| alloc_err())?;
        for _ in 0..num_sets {
            sets.push(CacheSet::try_new(config.ways()).map_err(|_| alloc_err())?);
        }

        tracing::debug!(
            sets = num_sets,
            lines,
            ways = config.ways(),
            block_bytes = config.block_size(),
            "allocated cache"
        );

        Ok(Self {
            config: *config,
            sets,
        })
    }

    /// Performs one access at `addr` and updates the recency order of its set.
    ///
    /// On a hit the line is promoted to MRU. On a miss the LRU line is evicted first if
    /// the set is full, then the new tag is installed as MRU.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let fields = decode(addr, &self.config);
        let set = &mut self.sets[fields.set_index];

        if let Some(position) = set.lookup(fields.tag) {
            set.promote(position);
            trace!(addr, set = fields.set_index, tag = fields.tag, "hit");
            return AccessOutcome::Hit;
        }

        let outcome = match set.evict_lru() {
            Some(victim) => {
                trace!(
                    addr,
                    set = fields.set_index,
                    tag = fields.tag,
                    victim,
                    "miss, evicted"
                );
                AccessOutcome::MissEviction
            }
            None => {
                trace!(addr, set = fields.set_index, tag = fields.tag, "miss");
                AccessOutcome::Miss
            }
        };
        set.insert_mru(fields.tag);
        outcome
    }

    /// Checks whether the block containing `addr` is resident, without touching recency.
    pub fn contains(&self, addr: u64) -> bool {
        let fields = decode(addr, &self.config);
        self.sets[fields.set_index].lookup(fields.tag).is_some()
    }

    /// The geometry this cache was built from.
    #[inline]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// All sets in index order.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Total number of resident lines across all sets.
    pub fn resident_lines(&self) -> usize {
        self.sets.iter().map(CacheSet::len).sum()
    }
}
