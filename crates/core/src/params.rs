//! Quality-power parameters
//!
//! Fixed ranges and defaults shared by the estimators and the driver.

/// Digest size in bytes (SHA-256)
pub const HASH_SIZE: usize = 32;

/// Digest size in bits
pub const HASH_BITS: usize = HASH_SIZE * 8;

/// Smallest bit width considered by the `w` search
pub const MIN_BITS: u32 = 16;

/// Largest bit width considered by the `w` search
pub const MAX_BITS: u32 = 64;

/// Default bit width for the initial quality
pub const DEFAULT_BITS: u32 = 32;

/// Default length of the sample chain
pub const DEFAULT_SAMPLES: usize = 128;

/// Minimum length of the sample chain
pub const MIN_SAMPLES: usize = 16;

/// Default working precision in significant decimal digits
pub const DEFAULT_PRECISION_DIGITS: usize = 300;

/// Extra binary digits carried above the requested decimal precision
pub const GUARD_BITS: usize = 32;
