//! Cache geometry configuration.
//!
//! This module defines the parameters that shape the simulated cache. It provides:
//! 1. **Raw Geometry:** `CacheGeometry`, the unvalidated `(s, E, b)` triple as supplied by a user.
//! 2. **Validated Config:** `CacheConfig`, only constructible through validation, so every
//!    downstream component can rely on `E >= 1` and `s + b <= 63`.
//! 3. **Derived Values:** Number of sets, block size, and total line count.
//!
//! Geometry is supplied on the command line (`-s`, `-E`, `-b`) or as a JSON object
//! (`{ "set_bits": 4, "ways": 1, "block_bits": 4 }`).

use serde::{Deserialize, Serialize};

use crate::common::error::{ConfigError, MAX_INDEX_AND_OFFSET_BITS};

/// Unvalidated cache geometry.
///
/// Fields are signed so that negative command-line values reach validation and are
/// reported as configuration errors instead of parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheGeometry {
    /// Set-index bit width (`s`); the cache has `2^s` sets.
    pub set_bits: i64,
    /// Associativity (`E`); lines per set.
    pub ways: i64,
    /// Block-offset bit width (`b`); blocks are `2^b` bytes.
    pub block_bits: i64,
}

/// Validated, immutable cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CacheGeometry", into = "CacheGeometry")]
pub struct CacheConfig {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

impl CacheConfig {
    /// Validates a geometry and builds a configuration.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - Set-index bit width `s`, must be `>= 0`.
    /// * `ways` - Associativity `E`, must be `>= 1`.
    /// * `block_bits` - Block-offset bit width `b`, must be `>= 0`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any field is out of range or `s + b > 63`.
    pub fn new(set_bits: i64, ways: i64, block_bits: i64) -> Result<Self, ConfigError> {
        if set_bits < 0 {
            return Err(ConfigError::NegativeSetBits(set_bits));
        }
        if block_bits < 0 {
            return Err(ConfigError::NegativeBlockBits(block_bits));
        }
        let ways_usize = usize::try_from(ways).map_err(|_| ConfigError::InvalidWays(ways))?;
        if ways_usize == 0 {
            return Err(ConfigError::InvalidWays(ways));
        }
        let total = set_bits.saturating_add(block_bits);
        if total > i64::from(MAX_INDEX_AND_OFFSET_BITS) {
            return Err(ConfigError::AddressBitsExceeded {
                set_bits,
                block_bits,
            });
        }

        Ok(Self {
            set_bits: set_bits as u32,
            ways: ways_usize,
            block_bits: block_bits as u32,
        })
    }

    /// Parses and validates a JSON geometry object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and the
    /// matching validation error for out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let geometry: CacheGeometry =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::try_from(geometry)
    }

    /// Set-index bit width `s`.
    #[inline]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Associativity `E`.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Block-offset bit width `b`.
    #[inline]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of sets, `2^s`.
    #[inline]
    pub const fn num_sets(&self) -> u64 {
        1u64 << self.set_bits
    }

    /// Block size in bytes, `2^b`.
    #[inline]
    pub const fn block_size(&self) -> u64 {
        1u64 << self.block_bits
    }

    /// Total lines in the cache, `2^s × E`, widened so it never overflows.
    pub fn total_lines(&self) -> u128 {
        u128::from(self.num_sets()) * self.ways as u128
    }
}

impl TryFrom<CacheGeometry> for CacheConfig {
    type Error = ConfigError;

    fn try_from(geometry: CacheGeometry) -> Result<Self, Self::Error> {
        Self::new(geometry.set_bits, geometry.ways, geometry.block_bits)
    }
}

impl From<CacheConfig> for CacheGeometry {
    fn from(config: CacheConfig) -> Self {
        Self {
            set_bits: i64::from(config.set_bits),
            ways: config.ways as i64,
            block_bits: i64::from(config.block_bits),
        }
    }
}
