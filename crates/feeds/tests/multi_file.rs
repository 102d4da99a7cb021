//! Integration test: a CSV feed spanning several files
//!
//! Files are replayed in the order given and must form one chronological
//! sequence.

use chrono::{Datelike, Timelike};
use std::io::Write;
use tempfile::NamedTempFile;
use zerophase_core::SeriesFormat;
use zerophase_feeds::{CsvFeed, FeedError, ObservationFeed};

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_concatenates_files_in_order() {
    let _ = env_logger::try_init();

    let first = write_csv("Time,Price\n2021-03-01 09:30:00,100.0\n2021-03-01 09:31:00,100.5\n");
    let second = write_csv("Time,Price\n2021-03-01 09:32:00,101.0\n");
    let format = SeriesFormat::new("%Y-%m-%d %H:%M:%S", "Time", "Price");

    let mut feed = CsvFeed::new([first.path(), second.path()], format);
    let observations: Vec<_> = std::iter::from_fn(|| feed.next_observation())
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(observations.len(), 3);
    assert_eq!(observations[2].value, 101.0);
    assert_eq!(observations[2].timestamp.minute(), 32);
    assert_eq!(observations[0].timestamp.day(), 1);
}

#[test]
fn test_overlapping_files_rejected() {
    let first = write_csv("Index,Open\n2021-03-01,1\n2021-03-02,2\n");
    let second = write_csv("Index,Open\n2021-03-02,3\n");

    let mut feed = CsvFeed::new([first.path(), second.path()], SeriesFormat::default());
    assert!(feed.next_observation().unwrap().is_ok());
    assert!(feed.next_observation().unwrap().is_ok());
    match feed.next_observation() {
        Some(Err(FeedError::OutOfOrder { line, .. })) => assert_eq!(line, 2),
        other => panic!("expected out-of-order error, got {other:?}"),
    }
    // The feed stops after the first failure
    assert!(feed.next_observation().is_none());
}
