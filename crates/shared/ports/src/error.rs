use thiserror::Error;

/// Invalid configuration, detected before any data is touched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Cutoff frequency {0} is outside (0, pi)")]
    InvalidCutoff(f64),

    #[error("Filter half-length must be positive")]
    ZeroHalfLength,

    #[error("Window length must be positive")]
    ZeroWindowLength,

    #[error("Batch size must be positive")]
    ZeroBatchSize,

    #[error("At least one feature extractor is required")]
    NoExtractors,

    #[error("Extractor {name}: {reason}")]
    InvalidExtractor { name: String, reason: String },

    #[error("Differencing order {0} is outside (0, 1]")]
    InvalidDifferencingOrder(f64),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Failures while reading raw observations
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("I/O error on {source_name}: {message}")]
    Io {
        source_name: String,
        message: String,
    },

    #[error("{source_name}: missing column {column}")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} line {line}: cannot parse value {raw:?}")]
    InvalidValue {
        source_name: String,
        line: u64,
        raw: String,
    },

    #[error("{source_name} line {line}: cannot parse timestamp {raw:?}")]
    InvalidTimestamp {
        source_name: String,
        line: u64,
        raw: String,
    },

    #[error("{source_name}: timestamps out of order at line {line}")]
    OutOfOrder { source_name: String, line: u64 },
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::InvalidCutoff(4.0).to_string(),
            "Cutoff frequency 4 is outside (0, pi)"
        );
        let err = FeedError::InvalidValue {
            source_name: "prices.csv".to_string(),
            line: 7,
            raw: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "prices.csv line 7: cannot parse value \"abc\"");
    }
}
