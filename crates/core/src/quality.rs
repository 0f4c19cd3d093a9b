//! Quality function
//!
//! `quality(d, bits) = a^(1/n)` with `a = d / 2^256` and `n = 2^bits * bits`.
//!
//! Raising a uniform draw in `[0, 1)` to the power `1/n` models an order
//! statistic of `n` draws, so one digest stands in for a whole search of size
//! `n`. The map is strictly increasing in `a` for every `bits > 0`.

use crate::digest::{Hash256, to_hex};
use crate::error::{QualityError, Result};
use crate::numeric::{Engine, Scalar};
use crate::params::HASH_BITS;

/// Size of the search space modelled by a bit width: `2^bits * bits`
pub fn search_space(engine: &Engine, bits: u32) -> Result<Scalar> {
    engine.mul(&engine.two_pow(bits), &engine.from_u64(u64::from(bits)))
}

/// Digest value normalised into `[0, 1)`
///
/// The digest is read through its hex view, as a base-16 integer.
pub fn normalize(engine: &mut Engine, digest: &Hash256) -> Result<Scalar> {
    let value = engine.parse_hex(&to_hex(digest))?;
    engine.div(&value, &engine.two_pow(HASH_BITS as u32))
}

/// Per-bit-width constants of the quality function
#[derive(Debug, Clone)]
pub struct BitWidth {
    n: Scalar,
    exponent: Scalar,
}

impl BitWidth {
    pub fn new(engine: &Engine, bits: u32) -> Result<Self> {
        if bits == 0 {
            return Err(QualityError::InvalidBits(bits));
        }
        let n = search_space(engine, bits)?;
        let exponent = engine.recip(&n)?;
        Ok(Self { n, exponent })
    }

    /// `2^bits * bits`
    pub fn n(&self) -> &Scalar {
        &self.n
    }

    /// Quality of an already normalised digest value
    pub fn quality(&self, engine: &mut Engine, normalized: &Scalar) -> Result<Scalar> {
        // 0^(1/n) = 0; the all-zero digest is the only way here
        if normalized.is_zero() {
            return Ok(engine.zero());
        }
        engine.pow(normalized, &self.exponent)
    }
}

/// Quality of `digest` at `bits`
pub fn quality(engine: &mut Engine, digest: &Hash256, bits: u32) -> Result<Scalar> {
    let width = BitWidth::new(engine, bits)?;
    let a = normalize(engine, digest)?;
    width.quality(engine, &a)
}
