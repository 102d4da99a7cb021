//! Zerophase Feeds
//!
//! [`ObservationFeed`] implementations:
//!
//! - [`VecFeed`]: replays observations held in memory
//! - [`CsvFeed`]: reads an ordered list of CSV files described by a
//!   [`SeriesFormat`](zerophase_core::SeriesFormat)

mod csv_feed;
mod vec_feed;

pub use csv_feed::CsvFeed;
pub use vec_feed::VecFeed;

// Re-export the port for convenience
pub use zerophase_ports::{FeedError, FeedResult, ObservationFeed};
