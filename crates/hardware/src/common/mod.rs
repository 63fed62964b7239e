//! Common types shared by every layer of the simulator.
//!
//! 1. **Address Decoding:** Splitting an address into tag, set index and block offset.
//! 2. **Error Handling:** Configuration and trace error types.

/// Address decomposition into cache fields.
pub mod addr;

/// Error types for configuration and trace handling.
pub mod error;

pub use addr::{DecodedAddr, decode};
pub use error::{ConfigError, MalformedRecord, RecordParseError, TraceError};
