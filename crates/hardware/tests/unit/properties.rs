//! # Property Tests
//!
//! Invariants that must hold for every access sequence and every legal geometry:
//! capacity bound, repeat-access law, LRU victim choice, eviction gating, counter
//! conservation, and instruction-fetch neutrality.

use csim_core::common::addr::decode;
use csim_core::common::error::TraceError;
use csim_core::config::CacheConfig;
use csim_core::core::AccessOutcome;
use csim_core::sim::{NullObserver, Simulator, TraceOp, TraceRecord};
use proptest::prelude::*;

/// Small geometries so that conflicts actually happen.
fn geometry() -> impl Strategy<Value = (i64, i64, i64)> {
    (0i64..=3, 1i64..=4, 0i64..=3)
}

/// Addresses drawn from a narrow range, again to force conflicts.
fn addresses() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..512, 0..200)
}

fn build((s, e, b): (i64, i64, i64)) -> (CacheConfig, Simulator) {
    let cfg = CacheConfig::new(s, e, b).unwrap();
    let sim = Simulator::new(&cfg).unwrap();
    (cfg, sim)
}

proptest! {
    /// No set ever holds more than E tags, and never the same tag twice.
    #[test]
    fn capacity_bound_holds(geom in geometry(), addrs in addresses()) {
        let (cfg, mut sim) = build(geom);
        for addr in addrs {
            let _ = sim.access(addr);
            for set in sim.cache().sets() {
                prop_assert!(set.len() <= cfg.ways());
                let mut tags: Vec<u64> = set.tags().collect();
                let len = tags.len();
                tags.sort_unstable();
                tags.dedup();
                prop_assert_eq!(tags.len(), len);
            }
        }
    }

    /// Accessing the same address twice in a row: the second access always hits.
    #[test]
    fn repeat_access_hits(geom in geometry(), addrs in addresses(), probe in 0u64..512) {
        let (_, mut sim) = build(geom);
        for addr in addrs {
            let _ = sim.access(addr);
        }
        let _ = sim.access(probe);
        prop_assert_eq!(sim.access(probe), AccessOutcome::Hit);
    }

    /// A cold cache: first access misses, second hits, regardless of geometry.
    #[test]
    fn cold_repeat_is_miss_then_hit(geom in geometry(), addr in any::<u64>()) {
        let (_, mut sim) = build(geom);
        prop_assert_eq!(sim.access(addr), AccessOutcome::Miss);
        prop_assert_eq!(sim.access(addr), AccessOutcome::Hit);
    }

    /// E distinct tags into one set, then one more: exactly the first is evicted.
    #[test]
    fn lru_evicts_oldest(s in 0i64..=3, e in 1i64..=6, b in 0i64..=3, set in 0u64..8) {
        let (cfg, mut sim) = build((s, e, b));
        let set = set & (cfg.num_sets() - 1);
        let stride = 1u64 << (s + b);
        let base = set << b;
        let addr = |tag: u64| base + tag * stride;

        for tag in 0..=(e as u64) {
            let _ = sim.access(addr(tag));
        }
        prop_assert!(!sim.cache().contains(addr(0)));
        for tag in 1..=(e as u64) {
            prop_assert!(sim.cache().contains(addr(tag)));
        }
        prop_assert_eq!(sim.stats().evictions(), 1);
    }

    /// An eviction happens exactly when a miss lands in a full set.
    #[test]
    fn eviction_iff_miss_into_full_set(geom in geometry(), addrs in addresses()) {
        let (cfg, mut sim) = build(geom);
        for addr in addrs {
            let fields = decode(addr, &cfg);
            let set = &sim.cache().sets()[fields.set_index];
            let was_full = set.is_full();
            let was_resident = set.lookup(fields.tag).is_some();

            let outcome = sim.access(addr);
            prop_assert_eq!(outcome.is_hit(), was_resident);
            prop_assert_eq!(outcome.is_eviction(), !was_resident && was_full);
        }
    }

    /// Every access is counted exactly once as a hit or a miss.
    #[test]
    fn counters_conserve_accesses(geom in geometry(), addrs in addresses()) {
        let (_, mut sim) = build(geom);
        let n = addrs.len() as u64;
        for addr in addrs {
            let _ = sim.access(addr);
        }
        let st = sim.stats();
        prop_assert_eq!(st.hits() + st.misses(), n);
        prop_assert!(st.evictions() <= st.misses());
    }

    /// Interleaving instruction fetches anywhere changes nothing.
    #[test]
    fn instruction_fetches_are_neutral(
        geom in geometry(),
        ops in prop::collection::vec((any::<bool>(), 0u64..512), 0..100),
    ) {
        let (_, mut with) = build(geom);
        let (_, mut without) = build(geom);

        let mixed: Vec<_> = ops
            .iter()
            .map(|&(fetch, addr)| {
                let op = if fetch { TraceOp::Instruction } else { TraceOp::Load };
                Ok::<_, TraceError>(TraceRecord::new(op, addr, 4))
            })
            .collect();
        let loads: Vec<_> = ops
            .iter()
            .filter(|(fetch, _)| !fetch)
            .map(|&(_, addr)| Ok::<_, TraceError>(TraceRecord::new(TraceOp::Load, addr, 4)))
            .collect();

        let a = with.replay(mixed, &mut NullObserver).unwrap();
        let b = without.replay(loads, &mut NullObserver).unwrap();
        prop_assert_eq!(a.summary, b.summary);
    }

    /// A modify contributes exactly one guaranteed hit on top of its first access.
    #[test]
    fn modify_second_access_hits(geom in geometry(), addrs in addresses(), target in 0u64..512) {
        let (_, mut sim) = build(geom);
        for addr in addrs {
            let _ = sim.access(addr);
        }
        let before = *sim.stats();
        let out: Vec<_> = sim
            .apply(&TraceRecord::new(TraceOp::Modify, target, 8))
            .iter()
            .collect();
        prop_assert_eq!(out.len(), 2);
        prop_assert_eq!(out[1], AccessOutcome::Hit);
        prop_assert_eq!(sim.stats().hits(), before.hits() + u64::from(out[0].is_hit()) + 1);
        prop_assert!(sim.stats().evictions() - before.evictions() <= 1);
    }
}
