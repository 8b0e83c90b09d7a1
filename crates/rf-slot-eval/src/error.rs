//! Error types for slot evaluation

use thiserror::Error;

/// Construction and configuration errors.
///
/// Evaluators themselves never fail: a missing win is `None` or an empty
/// vector, and a symbol missing from the paytable simply pays zero.
#[derive(Error, Debug)]
pub enum SlotEvalError {
    #[error("Invalid scene dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Jagged columns: reel {reel} has {len} rows, expected {expected}")]
    JaggedColumns {
        reel: usize,
        len: usize,
        expected: usize,
    },

    #[error("Invalid reel height {height} for reel {reel} (scene height {max})")]
    InvalidReelHeight {
        reel: usize,
        height: usize,
        max: usize,
    },

    #[error("Reel count mismatch: expected {expected}, got {actual}")]
    ReelCountMismatch { expected: usize, actual: usize },

    #[error("Reel strip {0} is empty")]
    EmptyReel(usize),

    #[error("Negative payout for symbol {symbol} at count {count}")]
    NegativePayout { symbol: i32, count: usize },

    #[error("Duplicate symbol name: {0}")]
    DuplicateSymbolName(String),

    #[error("Unknown symbol name: {0}")]
    UnknownSymbolName(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type SlotEvalResult<T> = Result<T, SlotEvalError>;
