//! Zerophase Core Domain
//!
//! Pure domain types for labeled time-series preparation.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Direction, FeatureSeries, Observation, Series, TargetSeries, TargetTransform,
    TimestampedValue,
};
pub use values::{SeriesFormat, Timestamp};
