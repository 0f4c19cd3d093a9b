//! The quality-power run
//!
//! Computes every reported value in a fixed order and writes each one as soon
//! as it is known, so a run that fails part-way still shows how far it got.

use std::fmt::Display;
use std::io::Write;

use anyhow::Context;
use log::debug;
use serde::Serialize;

use qpower_core::{
    estimate_n, estimate_w, hash_timestamp, quality, to_hex, BitWidth, Engine, Precision,
};

use crate::config::{Config, OutputFormat};

/// Everything a run reports; scalars are rendered at the working precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub bits: u32,
    pub samples: usize,
    pub hash: String,
    pub quality: String,
    pub w: u32,
    #[serde(rename = "N")]
    pub n: String,
    #[serde(rename = "N2")]
    pub n2: String,
    #[serde(rename = "N3")]
    pub n3: String,
}

struct Emitter<'a, W: Write> {
    out: &'a mut W,
    enabled: bool,
}

impl<W: Write> Emitter<'_, W> {
    fn line(&mut self, key: &str, value: impl Display) -> anyhow::Result<()> {
        if self.enabled {
            writeln!(self.out, "{}={}", key, value).context("failed to write output")?;
        }
        Ok(())
    }
}

/// Run the whole computation for `config`, writing results to `out`
///
/// # Panics
///
/// Panics if `config.samples` is below the estimator's minimum of 16.
pub fn run<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<Analysis> {
    let mut emit = Emitter {
        out: &mut *out,
        enabled: config.format == OutputFormat::Text,
    };
    emit.line("BITS", config.bits)?;
    emit.line("SAMPLES", config.samples)?;

    let precision = Precision::from_digits(config.precision_digits);
    let mut engine = Engine::new(precision).context("failed to set up the numeric engine")?;
    debug!(
        "working precision: {} digits ({} bits)",
        precision.digits(),
        precision.bits()
    );

    let timestamp = config.seed_timestamp()?;
    debug!("seed timestamp: {}", timestamp);
    let seed = hash_timestamp(timestamp);
    let hash = to_hex(&seed);
    emit.line("hash", &hash)?;

    let q = quality(&mut engine, &seed, config.bits)
        .with_context(|| format!("failed to compute quality at {} bits", config.bits))?;
    let quality = engine.format(&q)?;
    emit.line("quality", &quality)?;

    let w = estimate_w(&mut engine, &q, &seed, config.samples)
        .context("bit-width search failed")?;
    emit.line("w", w)?;

    let width = BitWidth::new(&engine, w)?;
    let n = engine.format(width.n())?;
    emit.line("N", &n)?;

    let counts = estimate_n(&mut engine, &q).context("failed to invert quality")?;
    let n2 = engine.format(&counts.n2)?;
    emit.line("N2", &n2)?;
    let n3 = engine.format(&counts.n3)?;
    emit.line("N3", &n3)?;

    let diff = engine.relative_difference(&counts.n2, &counts.n3)?;
    debug!("N2/N3 relative difference: {}", engine.format(&diff)?);

    let analysis = Analysis {
        bits: config.bits,
        samples: config.samples,
        hash,
        quality,
        w,
        n,
        n2,
        n3,
    };

    if config.format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &analysis).context("failed to write JSON")?;
        writeln!(out).context("failed to write output")?;
    }

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        Config {
            bits: 32,
            samples: 16,
            precision_digits: 60,
            timestamp: Some(1_700_000_000),
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_text_lines_in_order() {
        let mut out = Vec::new();
        let analysis = run(&small_config(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let keys: Vec<&str> = text
            .lines()
            .map(|line| line.split_once('=').unwrap().0)
            .collect();
        assert_eq!(
            keys,
            ["BITS", "SAMPLES", "hash", "quality", "w", "N", "N2", "N3"]
        );

        assert!(text.starts_with("BITS=32\nSAMPLES=16\n"));
        assert!(text.contains(&format!("hash={}\n", analysis.hash)));
        assert!(text.contains(&format!("w={}\n", analysis.w)));
        assert!((16..=64).contains(&analysis.w));
    }

    #[test]
    fn test_seed_from_timestamp() {
        let mut out = Vec::new();
        let analysis = run(&small_config(), &mut out).unwrap();

        let expected = to_hex(&qpower_core::hash(&1_700_000_000i64.to_le_bytes()));
        assert_eq!(analysis.hash, expected);
        assert_eq!(analysis.hash.len(), 66);
    }

    #[test]
    fn test_values_are_consistent() {
        let mut out = Vec::new();
        let analysis = run(&small_config(), &mut out).unwrap();

        assert!(analysis.quality.starts_with("0.9999999999"), "{}", analysis.quality);
        // N = 2^w * w is an exact integer
        let n: u128 = analysis.n.parse().unwrap();
        assert_eq!(n, (1u128 << analysis.w) * u128::from(analysis.w));
        // Both counts agree at this precision
        assert_eq!(analysis.n2[..40], analysis.n3[..40]);
    }

    #[test]
    fn test_deterministic_for_fixed_timestamp() {
        let first = run(&small_config(), &mut Vec::new()).unwrap();
        let second = run(&small_config(), &mut Vec::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_output() {
        let config = Config {
            format: OutputFormat::Json,
            ..small_config()
        };
        let mut out = Vec::new();
        let analysis = run(&config, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["bits"], 32);
        assert_eq!(value["samples"], 16);
        assert_eq!(value["w"], analysis.w);
        assert_eq!(value["hash"], analysis.hash.as_str());
        assert_eq!(value["N2"], analysis.n2.as_str());
        assert!(value.get("n2").is_none());
    }

    #[test]
    #[should_panic(expected = "at least 16 samples")]
    fn test_small_sample_aborts() {
        let config = Config {
            samples: 15,
            ..small_config()
        };
        let _ = run(&config, &mut Vec::new());
    }
}
