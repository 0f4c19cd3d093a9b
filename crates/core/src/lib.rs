//! # Quality-Power Core
//!
//! Scores a 256-bit digest against a difficulty expressed in bits, and inverts
//! that score back into a bit width, all in extended precision.
//!
//! ## Components
//!
//! - **Hashing**: SHA-256 digests, their `0x` hex view, and the deterministic
//!   self-hashing chain used as a sample set
//! - **Numeric engine**: `astro-float` arithmetic at one explicit precision
//!   (300 significant digits by default)
//! - **Quality**: `(d / 2^256)^(1 / (2^bits * bits))`, a value in `(0, 1)`
//! - **Estimators**: the `w` bit-width search and the `N2`/`N3` counts
//!
//! ## Example
//!
//! ```rust
//! use qpower_core::{Engine, Precision, estimate_n, hash, quality};
//!
//! let mut engine = Engine::new(Precision::from_digits(50)).unwrap();
//! let digest = hash(b"input data");
//!
//! let q = quality(&mut engine, &digest, 32).unwrap();
//! assert!(q.is_positive() && q < engine.one());
//!
//! let counts = estimate_n(&mut engine, &q).unwrap();
//! assert!(engine.agree_to(&counts.n2, &counts.n3, 40).unwrap());
//! ```

mod digest;
mod error;
mod estimate;
mod numeric;
mod params;
mod quality;

pub use digest::{HashChain, Hash256, hash, hash_timestamp, sample_chain, to_hex};
pub use error::{QualityError, Result};
pub use estimate::{Counts, estimate_n, estimate_w};
pub use numeric::{Engine, Precision, Scalar};
pub use params::*;
pub use quality::{BitWidth, normalize, quality, search_space};
