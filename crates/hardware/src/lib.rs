//! Set-associative cache simulator library.
//!
//! This crate replays memory access traces against a model of a set-associative
//! cache with LRU replacement and counts hits, misses and evictions:
//! 1. **Common:** Address decoding into tag / set index / block offset, and error types.
//! 2. **Config:** Validated cache geometry (`s`, `E`, `b`).
//! 3. **Core:** The cache, its per-set LRU line stores, and access outcomes.
//! 4. **Simulation:** Trace parsing, record-to-access mapping, and the replay loop.
//! 5. **Statistics:** Hit/miss/eviction counters and the summary line.

/// Common types (address decoding, errors).
pub mod common;
/// Cache geometry configuration.
pub mod config;
/// Cache model (sets, lines, outcomes).
pub mod core;
/// Trace reading and replay.
pub mod sim;
/// Hit/miss/eviction statistics.
pub mod stats;

/// Validated cache geometry; build with `CacheConfig::new(s, E, b)`.
pub use crate::config::CacheConfig;
/// The cache model.
pub use crate::core::Cache;
/// Cache + counters; the entry point for replaying traces.
pub use crate::sim::Simulator;
/// Final `(hits, misses, evictions)`.
pub use crate::stats::Summary;
