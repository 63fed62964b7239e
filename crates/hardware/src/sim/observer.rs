//! Replay observers.
//!
//! An observer sees every record that performed at least one access, together with
//! the outcomes of those accesses. Observers are a side channel: the counters are
//! already updated when an observer is called, and nothing an observer does can
//! change them.

use std::io::{self, Write};

use crate::core::outcome::RecordOutcomes;
use crate::sim::trace::TraceRecord;

/// Receives each replayed record and its access outcomes.
pub trait ReplayObserver {
    /// Called once per record that performed one or more accesses.
    ///
    /// # Errors
    ///
    /// Any I/O error aborts the replay.
    fn on_record(&mut self, record: &TraceRecord, outcomes: &RecordOutcomes) -> io::Result<()>;
}

/// Observer that does nothing; used when verbose output is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ReplayObserver for NullObserver {
    #[inline]
    fn on_record(&mut self, _record: &TraceRecord, _outcomes: &RecordOutcomes) -> io::Result<()> {
        Ok(())
    }
}

/// Echoes each record followed by its outcome tags, one line per record.
///
/// ```text
/// L 10,1 miss
/// M 20,1 miss eviction hit
/// ```
#[derive(Debug)]
pub struct VerboseEcho<W> {
    out: W,
}

impl<W: Write> VerboseEcho<W> {
    /// Echoes into `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReplayObserver for VerboseEcho<W> {
    fn on_record(&mut self, record: &TraceRecord, outcomes: &RecordOutcomes) -> io::Result<()> {
        write!(self.out, "{record}")?;
        for outcome in outcomes.iter() {
            for tag in outcome.tags() {
                write!(self.out, " {tag}")?;
            }
        }
        writeln!(self.out)
    }
}
