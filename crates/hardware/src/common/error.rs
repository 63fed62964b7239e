//! Configuration and trace error definitions.
//!
//! This module defines the failure modes of a simulation run. It provides:
//! 1. **Configuration Errors:** Geometry that cannot describe a valid cache, rejected before allocation.
//! 2. **Trace Errors:** Failures to open or read a trace, and records that do not parse.
//! 3. **Malformed Records:** The non-fatal condition that ends a replay early.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Widest address (in bits) the decoder can slice; `s + b` must leave a tag bit.
pub const MAX_INDEX_AND_OFFSET_BITS: u32 = 63;

/// Errors raised while validating a cache geometry or allocating its line table.
///
/// All variants are unrecoverable for the run and are reported before any
/// access is simulated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The set-index bit width was negative.
    #[error("set index bits must be >= 0 (got {0})")]
    NegativeSetBits(i64),

    /// The block-offset bit width was negative.
    #[error("block offset bits must be >= 0 (got {0})")]
    NegativeBlockBits(i64),

    /// The associativity was zero, negative, or does not fit the host word.
    #[error("associativity must be >= 1 (got {0})")]
    InvalidWays(i64),

    /// `s + b` leaves no room for a tag field in a 64-bit address.
    #[error(
        "set index bits + block offset bits must be <= {max} (got {set_bits} + {block_bits})",
        max = MAX_INDEX_AND_OFFSET_BITS
    )]
    AddressBitsExceeded {
        /// Requested set-index bit width.
        set_bits: i64,
        /// Requested block-offset bit width.
        block_bits: i64,
    },

    /// The `num_sets × E` line table could not be allocated.
    #[error("cannot allocate a line table of {lines} lines")]
    Allocation {
        /// Total number of lines requested (saturated at `u128::MAX` range).
        lines: u128,
    },

    /// A geometry file could not be decoded.
    #[error("invalid cache geometry: {0}")]
    Parse(String),
}

/// Why a single trace line failed to parse.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RecordParseError {
    /// The line holds no operation character.
    #[error("missing operation")]
    MissingOperation,

    /// Nothing between the operation and the comma.
    #[error("missing address")]
    MissingAddress,

    /// The address is not a 64-bit hexadecimal number.
    #[error("invalid hex address {0:?}")]
    InvalidAddress(String),

    /// No `,<size>` after the address.
    #[error("missing ',<size>' field")]
    MissingSize,

    /// The size is not a decimal integer (or is followed by other text).
    #[error("invalid size {0:?}")]
    InvalidSize(String),
}

/// A trace line that does not match `<op> <hex-address>,<decimal-size>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number inside the trace.
    pub line: usize,
    /// The offending line, without its line terminator.
    pub content: String,
    /// What was wrong with it.
    pub reason: RecordParseError,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} in {:?}", self.line, self.reason, self.content)
    }
}

/// Errors raised while reading or replaying a trace.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The trace file is missing or unreadable. The engine never runs.
    #[error("could not open trace '{}': {source}", .path.display())]
    Open {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading the trace failed part-way through.
    #[error("could not read trace at line {line}: {source}")]
    Read {
        /// 1-based line number that failed to read.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A record did not parse. The replay loop turns this into an early halt.
    #[error("malformed trace record at {0}")]
    Malformed(MalformedRecord),

    /// The verbose echo could not be written.
    #[error("could not write verbose echo: {0}")]
    Echo(#[source] io::Error),
}
