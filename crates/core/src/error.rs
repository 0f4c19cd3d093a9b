//! Error types for quality computations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QualityError {
    #[error("Invalid hex number: {0}")]
    InvalidHex(String),

    #[error("Invalid bit width: {0} (must be at least 1)")]
    InvalidBits(u32),

    #[error("Numeric domain error in {op}: {reason}")]
    Domain { op: &'static str, reason: String },

    #[error("Numeric engine error: {0}")]
    Engine(String),
}

pub type Result<T> = core::result::Result<T, QualityError>;
