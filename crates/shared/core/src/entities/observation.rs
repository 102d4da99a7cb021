use serde::{Deserialize, Serialize};

use crate::values::Timestamp;

/// A single raw observation supplied by a feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}
