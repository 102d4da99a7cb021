//! Zerophase Ports
//!
//! Port definitions (traits) for the zerophase workspace.
//! These define the boundaries between the labeling/windowing core and the
//! collaborators that feed it: observation sources and feature extractors.

mod error;
mod extractor;
mod feed;

pub use error::{ConfigError, ConfigResult, FeedError, FeedResult};
pub use extractor::{ExtractorSpec, FeatureExtractor};
pub use feed::ObservationFeed;
