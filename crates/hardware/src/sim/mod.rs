//! Trace replay.
//!
//! 1. **Trace:** Record types and the lazy line reader.
//! 2. **Simulator:** Maps records onto cache accesses and keeps the counters.
//! 3. **Observers:** Side channel for the verbose per-record echo.

/// Replay observers (verbose echo).
pub mod observer;

/// Simulator owning the cache and its statistics.
pub mod simulator;

/// Trace records and reader.
pub mod trace;

pub use observer::{NullObserver, ReplayObserver, VerboseEcho};
pub use simulator::{ReplayReport, Simulator};
pub use trace::{TraceOp, TraceReader, TraceRecord};
