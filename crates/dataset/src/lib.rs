//! Zerophase Dataset
//!
//! Turns an observation feed into fixed-geometry training minibatches:
//!
//! 1. [`SeriesAligner`] replays the feed through the target transform and a
//!    [`FeatureBank`](zerophase_features::FeatureBank), labels the
//!    transformed target with a symmetric filter and trims warm-up and
//!    boundary so features, target and labels share one timestamp axis.
//! 2. [`ClassificationIterator`] and [`RegressionIterator`] slide windows of
//!    length `T` over the aligned series and emit [`Minibatch`]es through
//!    the [`MinibatchSource`] trait.

pub mod aligner;
pub mod classification;
pub mod config;
pub mod cursor;
pub mod error;
pub mod minibatch;
pub mod normalize;
pub mod regression;
pub mod source;

pub use aligner::{AlignedSeries, SeriesAligner};
pub use classification::ClassificationIterator;
pub use config::{DatasetConfig, IteratorConfig, LabelingConfig};
pub use cursor::BatchCursor;
pub use error::{DatasetError, Result as DatasetResult};
pub use minibatch::Minibatch;
pub use normalize::Standardizer;
pub use regression::RegressionIterator;
pub use source::{BatchPreProcessor, MinibatchSource};
