//! Error Types for Leverage Advisor

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Empty series: {0}")]
    EmptySeries(String),

    #[error("Length mismatch: {prices} prices vs {leverage} leverage values")]
    LengthMismatch { prices: usize, leverage: usize },

    #[error("Invalid leverage: {0}")]
    InvalidLeverage(String),

    #[error("Leverage sums to zero; weighted average is undefined")]
    ZeroLeverage,

    #[error("Non-finite value: {0}")]
    NonFinite(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AdvisorError {
    /// Whether the error came from bad input data rather than the output side
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
