//! Run configuration

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use qpower_core::{DEFAULT_BITS, DEFAULT_PRECISION_DIGITS, DEFAULT_SAMPLES};

/// How results are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `key=value` line per value, written as soon as it is known
    #[default]
    Text,
    /// One JSON object once the run completes
    Json,
}

/// Settings for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bit width for the initial quality
    pub bits: u32,
    /// Length of the sample chain for the `w` estimator
    pub samples: usize,
    /// Working precision in significant decimal digits
    pub precision_digits: usize,
    /// Seed timestamp; the current time when unset
    pub timestamp: Option<i64>,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            samples: DEFAULT_SAMPLES,
            precision_digits: DEFAULT_PRECISION_DIGITS,
            timestamp: None,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Timestamp the seed digest is derived from
    pub fn seed_timestamp(&self) -> anyhow::Result<i64> {
        if let Some(timestamp) = self.timestamp {
            return Ok(timestamp);
        }
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the unix epoch")?
            .as_secs();
        i64::try_from(secs).context("system time does not fit in a 64-bit timestamp")
    }
}
