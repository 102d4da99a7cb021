//! Integration test: CSV files through alignment, regression windows and
//! standardization

use chrono::{Duration, NaiveDate};
use std::f64::consts::PI;
use std::io::Write;
use tempfile::NamedTempFile;
use zerophase_core::TargetTransform;
use zerophase_dataset::{
    ClassificationIterator, DatasetConfig, DatasetError, IteratorConfig, MinibatchSource,
    RegressionIterator, Standardizer,
};
use zerophase_ports::{ExtractorSpec, FeedError};

fn price_csv(first_day: usize, days: usize) -> NamedTempFile {
    let start = NaiveDate::from_ymd_opt(2015, 3, 2).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Index,Open,Volume").unwrap();
    for i in first_day..first_day + days {
        let date = start + Duration::days(i as i64);
        let price = 80.0 + 6.0 * (i as f64 / 9.0).sin() + 0.05 * i as f64;
        writeln!(file, "{},{},1000", date.format("%Y-%m-%d"), price).unwrap();
    }
    file.flush().unwrap();
    file
}

fn config() -> DatasetConfig {
    DatasetConfig::new(
        vec![
            ExtractorSpec::new("lp", 10, PI / 6.0).with_settling_length(20),
            ExtractorSpec::new("bp", 10, PI / 3.0).with_band_pass(PI / 6.0),
        ],
        IteratorConfig::new(8, 30).with_total_examples(64),
    )
}

#[test]
fn test_regression_from_split_files() {
    let _ = env_logger::try_init();

    let first = price_csv(0, 150);
    let second = price_csv(150, 150);
    let config = config().with_transform(TargetTransform::new(0.7, true));
    let mut it = RegressionIterator::from_csv([first.path(), second.path()], &config).unwrap();

    // warm-up 20, boundary 10
    assert_eq!(it.aligned().len(), 270);
    assert_eq!(it.num_channels(), 3);
    assert_eq!(it.total_examples(), 64);

    let batch = it.next().unwrap();
    assert_eq!(batch.features.dim(), (8, 3, 30));
    assert_eq!(batch.labels.dim(), (8, 1, 30));
    assert!(batch.feature_mask.is_none());

    // aligned index 0 is observation 30
    let dates = it.batch_dates();
    assert_eq!(dates[0][0], "2015-04-01");
    assert_eq!(dates[7][29], "2015-05-07");
}

#[test]
fn test_standardized_epoch_is_centred() {
    let file = price_csv(0, 300);
    let mut it = ClassificationIterator::from_csv([file.path()], &config()).unwrap();

    let standardizer = Standardizer::fit(&mut it).unwrap();
    assert_eq!(standardizer.means().len(), 2);
    assert_eq!(it.cursor(), 0);

    it.set_pre_processor(Box::new(standardizer));
    let mut sums = [0.0; 2];
    let mut squares = [0.0; 2];
    let mut count = 0.0;
    while it.has_next() {
        let batch = it.next().unwrap();
        for example in batch.features.outer_iter() {
            for (channel, values) in example.outer_iter().enumerate() {
                sums[channel] += values.sum();
                squares[channel] += values.mapv(|v| v * v).sum();
            }
        }
        count += (batch.batch_size() * batch.window_length()) as f64;
    }

    for channel in 0..2 {
        let mean = sums[channel] / count;
        let variance = squares[channel] / count - mean * mean;
        assert!(mean.abs() < 1e-9, "channel {channel} mean {mean}");
        assert!((variance - 1.0).abs() < 1e-6, "channel {channel} variance {variance}");
    }
}

#[test]
fn test_bad_row_surfaces_as_feed_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Index,Open").unwrap();
    writeln!(file, "2015-03-02,10.0").unwrap();
    writeln!(file, "2015-03-03,n/a").unwrap();
    file.flush().unwrap();

    let result = ClassificationIterator::from_csv([file.path()], &config());
    assert!(matches!(
        result,
        Err(DatasetError::Feed(FeedError::InvalidValue { line: 3, .. }))
    ));
}

#[test]
fn test_invalid_config_rejected_before_reading() {
    let mut config = config();
    config.iterator.window_length = 0;
    let result = RegressionIterator::from_csv(["/does/not/exist.csv"], &config);
    assert!(matches!(result, Err(DatasetError::Config(_))));
}
