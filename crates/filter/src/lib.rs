//! Zerophase Filter
//!
//! Symmetric (zero-phase) low-pass filter design and the labelers built on it.
//!
//! - [`FilterCoefficients`]: normalized half-kernel `c[0..=L]` with unit DC gain
//! - [`SymmetricLabeler`]: applies the kernel around every interior index of a
//!   target series and turns the response into a label through a
//!   [`LabelStrategy`]

mod coefficients;
mod labeler;
mod strategy;

pub use coefficients::FilterCoefficients;
pub use labeler::{DirectionLabeler, LevelLabeler, SymmetricLabeler};
pub use strategy::{DirectionLabeling, LabelStrategy, LevelLabeling};

// Re-export the error types from ports for convenience
pub use zerophase_ports::{ConfigError, ConfigResult};
