//! Address decomposition.
//!
//! Splits a 64-bit address into the three fields a set-associative cache uses:
//! 1. **Tag:** Bits above the set index; identifies the resident block.
//! 2. **Set Index:** The `s` bits directly above the block offset; selects the set.
//! 3. **Block Offset:** The low `b` bits; selects a byte inside the block.

use crate::config::CacheConfig;

/// An address split into cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Address bits above `s + b`.
    pub tag: u64,
    /// Index of the target set, always `< num_sets`.
    pub set_index: usize,
    /// Byte offset inside the block. Not consulted by the hit/miss model.
    pub block_offset: u64,
}

/// Decodes `addr` against the geometry in `config`.
///
/// Total for every address: `CacheConfig` guarantees `s + b <= 63`, so none of
/// the shifts overflow.
///
/// # Arguments
///
/// * `addr` - The raw 64-bit address.
/// * `config` - Validated cache geometry.
#[inline]
pub fn decode(addr: u64, config: &CacheConfig) -> DecodedAddr {
    let s = config.set_bits();
    let b = config.block_bits();
    let set_mask = (1u64 << s) - 1;
    let offset_mask = (1u64 << b) - 1;

    DecodedAddr {
        tag: addr >> (s + b),
        set_index: ((addr >> b) & set_mask) as usize,
        block_offset: addr & offset_mask,
    }
}
