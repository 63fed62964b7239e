//! Cache Access Tests.
//!
//! Verifies `Cache::access` end to end: cold misses, warm hits, same-block hits,
//! LRU victim selection, and direct-mapped conflicts.
//!
//! Unless stated otherwise the cache is s = 1, E = 2, b = 4:
//!   - 2 sets, 2 lines each, 16-byte blocks
//!   - set index = (addr >> 4) & 1
//!   - tag       = addr >> 5

use crate::common::harness::config;
use csim_core::common::error::ConfigError;
use csim_core::core::{AccessOutcome, Cache};
use pretty_assertions::assert_eq;

fn two_way() -> Cache {
    Cache::new(&config(1, 2, 4)).unwrap()
}

/// Tags resident in `set`, MRU first.
fn resident(cache: &Cache, set: usize) -> Vec<u64> {
    cache.set(set).unwrap().tags().collect()
}

// ══════════════════════════════════════════════════════════
// 1. Cold and warm accesses
// ══════════════════════════════════════════════════════════

#[test]
fn cold_miss_then_warm_hit() {
    let mut cache = two_way();
    assert_eq!(cache.access(0x100), AccessOutcome::Miss);
    assert_eq!(cache.access(0x100), AccessOutcome::Hit);
}

#[test]
fn same_block_different_offset_hits() {
    let mut cache = two_way();
    assert_eq!(cache.access(0x100), AccessOutcome::Miss);
    assert_eq!(cache.access(0x10f), AccessOutcome::Hit);
}

#[test]
fn neighbouring_blocks_use_different_sets() {
    let mut cache = two_way();
    let _ = cache.access(0x00); // set 0
    let _ = cache.access(0x10); // set 1
    assert_eq!(resident(&cache, 0), vec![0]);
    assert_eq!(resident(&cache, 1), vec![0]);
    assert_eq!(cache.resident_lines(), 2);
}

#[test]
fn contains_does_not_change_recency() {
    let mut cache = two_way();
    let _ = cache.access(0x00); // tag 0
    let _ = cache.access(0x20); // tag 1
    assert!(cache.contains(0x00));
    assert!(!cache.contains(0x40));
    assert_eq!(resident(&cache, 0), vec![1, 0]);
}

// ══════════════════════════════════════════════════════════
// 2. LRU replacement
// ══════════════════════════════════════════════════════════

/// Addresses 0x00, 0x20, 0x40 all map to set 0 with tags 0, 1, 2.
#[test]
fn third_tag_evicts_least_recently_used() {
    let mut cache = two_way();
    assert_eq!(cache.access(0x00), AccessOutcome::Miss);
    assert_eq!(cache.access(0x20), AccessOutcome::Miss);
    assert_eq!(cache.access(0x40), AccessOutcome::MissEviction);
    assert_eq!(resident(&cache, 0), vec![2, 1]);
    assert!(!cache.contains(0x00));
}

#[test]
fn reaccess_protects_line_from_eviction() {
    let mut cache = two_way();
    let _ = cache.access(0x00); // [0]
    let _ = cache.access(0x20); // [1, 0]
    assert_eq!(cache.access(0x00), AccessOutcome::Hit); // [0, 1]
    assert_eq!(cache.access(0x40), AccessOutcome::MissEviction); // [2, 0]
    assert_eq!(resident(&cache, 0), vec![2, 0]);
    assert_eq!(cache.access(0x00), AccessOutcome::Hit);
    assert_eq!(cache.access(0x20), AccessOutcome::MissEviction);
}

#[test]
fn evictions_stay_within_their_set() {
    let mut cache = two_way();
    let _ = cache.access(0x10); // set 1
    for addr in [0x00, 0x20, 0x40, 0x60] {
        let _ = cache.access(addr); // set 0 thrashes
    }
    assert_eq!(resident(&cache, 1), vec![0]);
    assert_eq!(resident(&cache, 0), vec![3, 2]);
}

// ══════════════════════════════════════════════════════════
// 3. Direct-mapped
// ══════════════════════════════════════════════════════════

#[test]
fn direct_mapped_conflict_always_evicts() {
    let mut cache = Cache::new(&config(2, 1, 2)).unwrap();
    assert_eq!(cache.access(0), AccessOutcome::Miss);
    assert_eq!(cache.access(16), AccessOutcome::MissEviction);
    assert_eq!(cache.access(0), AccessOutcome::MissEviction);
    assert_eq!(cache.access(0), AccessOutcome::Hit);
}

#[test]
fn fully_associative_holds_e_blocks() {
    let mut cache = Cache::new(&config(0, 4, 0)).unwrap();
    for addr in 0..4 {
        assert_eq!(cache.access(addr), AccessOutcome::Miss);
    }
    for addr in 0..4 {
        assert_eq!(cache.access(addr), AccessOutcome::Hit);
    }
    assert_eq!(cache.access(4), AccessOutcome::MissEviction);
    assert_eq!(cache.sets().len(), 1);
}

#[test]
fn allocation_matches_geometry() {
    let cache = Cache::new(&config(3, 2, 0)).unwrap();
    assert_eq!(cache.sets().len(), 8);
    assert!(cache.sets().iter().all(|s| s.ways() == 2 && s.is_empty()));
    assert_eq!(cache.config().ways(), 2);
    assert!(cache.set(8).is_none());
}

#[test]
fn unallocatable_line_table_is_a_config_error() {
    let err = Cache::new(&config(63, 1, 0)).unwrap_err();
    assert_eq!(err, ConfigError::Allocation { lines: 1 << 63 });
}
