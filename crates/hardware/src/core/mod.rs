//! Cache model.
//!
//! 1. **Cache:** The set-associative line table and its LRU access procedure.
//! 2. **Outcomes:** Hit, miss and eviction classifications reported per access.

/// Set-associative LRU cache.
pub mod cache;

/// Per-access and per-record outcomes.
pub mod outcome;

pub use cache::Cache;
pub use cache::set::{CacheSet, Line};
pub use outcome::{AccessOutcome, RecordOutcomes};
