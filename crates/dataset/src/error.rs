//! Dataset errors

use thiserror::Error;
use zerophase_core::Timestamp;
use zerophase_ports::{ConfigError, FeedError};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Insufficient data for {stage}: need {required} observations, have {available}")]
    InsufficientData {
        stage: &'static str,
        required: usize,
        available: usize,
    },

    #[error(
        "No batch available: cursor {cursor} + batch {batch_size} + window {window} must stay below {limit}"
    )]
    Exhausted {
        cursor: usize,
        batch_size: usize,
        window: usize,
        limit: usize,
    },

    #[error("Series misaligned at index {index}: expected {expected}, found {found}")]
    Misaligned {
        index: usize,
        expected: Timestamp,
        found: Timestamp,
    },

    #[error("Cannot take the log of non-positive price {value} at observation {index}")]
    NonPositivePrice { index: usize, value: f64 },

    #[error("Series length mismatch: {features} feature rows, {labels} labels")]
    LengthMismatch { features: usize, labels: usize },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
