//! Estimators built on the quality function
//!
//! - [`estimate_w`]: brute-force search for the bit width whose quality
//!   distribution over a hash chain has the target quality at its median.
//! - [`estimate_n`]: closed-form expected counts from a quality value.

use log::debug;

use crate::digest::{Hash256, sample_chain};
use crate::error::{QualityError, Result};
use crate::numeric::{Engine, Scalar};
use crate::params::{MAX_BITS, MIN_BITS, MIN_SAMPLES};
use crate::quality::{BitWidth, normalize};

/// Find the bit width in `[MIN_BITS, MAX_BITS]` at which `target` sits closest
/// to the median quality of `num_samples` chained digests rooted at `seed`
///
/// Ties go to the smallest bit width.
///
/// # Panics
///
/// Panics if `num_samples < MIN_SAMPLES`.
pub fn estimate_w(
    engine: &mut Engine,
    target: &Scalar,
    seed: &Hash256,
    num_samples: usize,
) -> Result<u32> {
    assert!(
        num_samples >= MIN_SAMPLES,
        "w estimator needs at least {} samples, got {}",
        MIN_SAMPLES,
        num_samples
    );

    let samples = sample_chain(seed, num_samples)
        .iter()
        .map(|digest| normalize(engine, digest))
        .collect::<Result<Vec<_>>>()?;

    let half = num_samples / 2;
    let mut min_distance = num_samples;
    let mut best_bits = MIN_BITS;

    for bits in MIN_BITS..=MAX_BITS {
        let width = BitWidth::new(engine, bits)?;
        let mut num_low = 0usize;
        for a in &samples {
            if width.quality(engine, a)? < *target {
                num_low += 1;
            }
        }

        let distance = half.abs_diff(num_low);
        debug!("bits={} low={}/{} distance={}", bits, num_low, num_samples, distance);
        if distance < min_distance {
            min_distance = distance;
            best_bits = bits;
        }
    }

    debug!("w={} (distance {})", best_bits, min_distance);
    Ok(best_bits)
}

/// Expected counts derived from a quality value
///
/// Both fields are the same quantity reached through different evaluation
/// paths; comparing them checks the engine's consistency.
#[derive(Debug, Clone)]
pub struct Counts {
    /// `1 / log2(1 / q)`
    pub n2: Scalar,
    /// `1 / -log2(q)`
    pub n3: Scalar,
}

/// Compute `N2` and `N3` for a quality `q` in `(0, 1)`
pub fn estimate_n(engine: &mut Engine, quality: &Scalar) -> Result<Counts> {
    if !quality.is_positive() || *quality >= engine.one() {
        return Err(QualityError::Domain {
            op: "estimate_n",
            reason: "quality must lie in (0, 1)".to_string(),
        });
    }

    let inv = engine.recip(quality)?;
    let n2 = engine.log2(&inv)?;
    let n2 = engine.recip(&n2)?;

    let n3 = engine.log2(quality)?;
    let n3 = engine.recip(&engine.neg(&n3))?;

    Ok(Counts { n2, n3 })
}
