use zerophase_core::Observation;

use crate::error::FeedResult;

/// Port for raw observation sources
///
/// A feed yields observations in chronological order until it is exhausted
/// (`None`). Read failures surface as `Some(Err(..))`; callers stop replaying
/// on the first error.
pub trait ObservationFeed {
    /// Next observation, or `None` once the feed is exhausted
    fn next_observation(&mut self) -> Option<FeedResult<Observation>>;

    /// Feed name for logging
    fn name(&self) -> &str {
        "ObservationFeed"
    }
}

impl<F: ObservationFeed + ?Sized> ObservationFeed for Box<F> {
    fn next_observation(&mut self) -> Option<FeedResult<Observation>> {
        (**self).next_observation()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
