//! Quality-Power Library
//!
//! Scores one SHA-256 digest against a bit-width difficulty and recovers the
//! bit width that best explains that score, using 300-digit arithmetic.
//!
//! # Overview
//!
//! A run hashes a unix timestamp into a seed digest, computes its quality at
//! the configured bit width, searches bit widths 16..=64 for the one whose
//! quality distribution over a hash chain centres on that quality, and
//! reports the expected counts `N`, `N2` and `N3`.
//!
//! # Example
//!
//! ```rust
//! use qpower::config::Config;
//! use qpower::report;
//!
//! let config = Config {
//!     samples: 16,
//!     precision_digits: 40,
//!     timestamp: Some(1_700_000_000),
//!     ..Config::default()
//! };
//!
//! let mut out = Vec::new();
//! let analysis = report::run(&config, &mut out).unwrap();
//! assert!((16..=64).contains(&analysis.w));
//! ```

// Re-export the core algorithm
pub use qpower_core as algorithm;

pub mod config;
pub mod report;

// Convenience re-exports
pub use algorithm::{estimate_n, estimate_w, hash, quality, Engine, Precision};
