use std::collections::VecDeque;

use zerophase_core::{Observation, Timestamp};
use zerophase_ports::{FeedResult, ObservationFeed};

/// Replays a fixed list of observations
#[derive(Debug, Clone, Default)]
pub struct VecFeed {
    observations: VecDeque<Observation>,
}

impl VecFeed {
    pub fn new(observations: impl IntoIterator<Item = Observation>) -> Self {
        Self {
            observations: observations.into_iter().collect(),
        }
    }

    /// Build from `(timestamp, value)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Timestamp, f64)>) -> Self {
        Self::new(pairs.into_iter().map(|(t, v)| Observation::new(t, v)))
    }

    /// Observations not yet replayed
    pub fn remaining(&self) -> usize {
        self.observations.len()
    }
}

impl ObservationFeed for VecFeed {
    fn next_observation(&mut self) -> Option<FeedResult<Observation>> {
        self.observations.pop_front().map(Ok)
    }

    fn name(&self) -> &str {
        "VecFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_replays_in_order() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut feed = VecFeed::from_pairs((0..3).map(|i| (start + Duration::days(i), i as f64)));

        assert_eq!(feed.remaining(), 3);
        for i in 0..3 {
            let obs = feed.next_observation().unwrap().unwrap();
            assert_eq!(obs.value, i as f64);
            assert_eq!(obs.timestamp, start + Duration::days(i));
        }
        assert!(feed.next_observation().is_none());
    }
}
