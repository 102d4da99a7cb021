mod format;

use chrono::{DateTime, Utc};

pub use format::SeriesFormat;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
