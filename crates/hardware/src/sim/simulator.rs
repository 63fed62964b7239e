//! Simulator: owns the cache and its statistics side-by-side.
//!
//! Every access goes through [`Simulator::access`], which updates the cache and the
//! counters in one step. Trace records are mapped onto accesses by
//! [`Simulator::apply`], and [`Simulator::replay`] drives a whole record stream.

use tracing::debug;

use crate::common::error::{ConfigError, MalformedRecord, TraceError};
use crate::config::CacheConfig;
use crate::core::Cache;
use crate::core::outcome::{AccessOutcome, RecordOutcomes};
use crate::sim::observer::ReplayObserver;
use crate::sim::trace::TraceRecord;
use crate::stats::{CacheStats, Summary};

/// Result of replaying a record stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Counters after the last replayed record.
    pub summary: Summary,
    /// Records consumed, instruction fetches and ignored operations included.
    pub records: u64,
    /// The record that stopped the replay, if it did not run to the end of the trace.
    pub halted_at: Option<MalformedRecord>,
}

impl ReplayReport {
    /// True if every record of the stream was replayed.
    pub const fn completed(&self) -> bool {
        self.halted_at.is_none()
    }
}

/// Top-level simulator: cache state + counters.
#[derive(Debug, Clone)]
pub struct Simulator {
    cache: Cache,
    stats: CacheStats,
}

impl Simulator {
    /// Creates a simulator with a cold cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Allocation`] if the line table cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
            stats: CacheStats::new(),
        })
    }

    /// Simulates one access at `addr` and accounts for its outcome.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let outcome = self.cache.access(addr);
        self.stats.record(outcome);
        outcome
    }

    /// Performs the accesses a trace record stands for.
    ///
    /// Instruction fetches and unknown operations perform none, loads and stores one,
    /// and modifies two back-to-back at the same address (the second always hits).
    pub fn apply(&mut self, record: &TraceRecord) -> RecordOutcomes {
        match record.op.access_count() {
            0 => RecordOutcomes::NONE,
            1 => RecordOutcomes::one(self.access(record.address)),
            _ => {
                let load = self.access(record.address);
                let store = self.access(record.address);
                RecordOutcomes::two(load, store)
            }
        }
    }

    /// Replays a record stream in order.
    ///
    /// Stops at the first malformed record; the report then carries that record and
    /// the counters reflect everything replayed before it. `observer` is called for
    /// every record that performed an access.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Read`] if the stream fails to read and
    /// [`TraceError::Echo`] if the observer fails to write.
    pub fn replay<I, O>(&mut self, records: I, observer: &mut O) -> Result<ReplayReport, TraceError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
        O: ReplayObserver + ?Sized,
    {
        let mut replayed = 0u64;
        let mut halted_at = None;

        for item in records {
            match item {
                Ok(record) => {
                    let outcomes = self.apply(&record);
                    if !outcomes.is_empty() {
                        observer
                            .on_record(&record, &outcomes)
                            .map_err(TraceError::Echo)?;
                    }
                    replayed += 1;
                }
                Err(TraceError::Malformed(bad)) => {
                    debug!(
                        line = bad.line,
                        content = %bad.content,
                        reason = %bad.reason,
                        "halting replay at malformed trace record"
                    );
                    halted_at = Some(bad);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        let summary = self.summary();
        debug!(records = replayed, %summary, "replay finished");
        Ok(ReplayReport {
            summary,
            records: replayed,
            halted_at,
        })
    }

    /// Live counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Snapshot of the counters.
    pub const fn summary(&self) -> Summary {
        self.stats.summary()
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }
}
