mod direction;
mod observation;
mod series;
mod target;

pub use direction::Direction;
pub use observation::Observation;
pub use series::{FeatureSeries, Series, TimestampedValue};
pub use target::{TargetSeries, TargetTransform};
