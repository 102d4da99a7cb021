use std::path::PathBuf;

use ndarray::{Array2, Array3};
use zerophase_core::{Direction, FeatureSeries, Series};
use zerophase_features::FeatureBank;
use zerophase_feeds::CsvFeed;
use zerophase_filter::DirectionLabeler;
use zerophase_ports::ObservationFeed;

use crate::aligner::{AlignedSeries, SeriesAligner};
use crate::config::{DatasetConfig, IteratorConfig};
use crate::cursor::BatchCursor;
use crate::error::Result;
use crate::minibatch::Minibatch;
use crate::source::{BatchPreProcessor, MinibatchSource};

/// Windowed iterator emitting one-hot direction labels
///
/// Each example is a window of `T` consecutive aligned steps: features
/// `[B, K, T]`, labels `[B, 2, T]`. Every input step counts; only the last
/// step of each window carries a label.
pub struct ClassificationIterator {
    series: AlignedSeries<Direction>,
    config: IteratorConfig,
    cursor: BatchCursor,
    pre_processor: Option<Box<dyn BatchPreProcessor>>,
}

impl ClassificationIterator {
    /// Build from a feed, constructing extractors from `config.extractors`
    pub fn from_feed(feed: &mut dyn ObservationFeed, config: &DatasetConfig) -> Result<Self> {
        config.validate()?;
        let bank = FeatureBank::from_specs(&config.extractors)?;
        Self::with_bank(feed, bank, config)
    }

    /// Build from CSV files read with `config.format`
    pub fn from_csv(
        paths: impl IntoIterator<Item = impl Into<PathBuf>>,
        config: &DatasetConfig,
    ) -> Result<Self> {
        let mut feed = CsvFeed::new(paths, config.format.clone());
        Self::from_feed(&mut feed, config)
    }

    /// Build from a feed and a ready feature bank; `config.extractors` is ignored
    pub fn with_bank(
        feed: &mut dyn ObservationFeed,
        bank: FeatureBank,
        config: &DatasetConfig,
    ) -> Result<Self> {
        config.iterator.validate()?;
        let (cutoff, half_length) = config.labeling.resolve(bank.primary())?;
        let labeler = DirectionLabeler::classification(cutoff, half_length)?;

        let mut aligner = SeriesAligner::new(bank, config.transform);
        let series = aligner.align(feed, &labeler)?;
        Self::from_aligned(series, config.iterator)
    }

    /// Wrap an already aligned series
    ///
    /// The trailing guard is the longest extractor filter length, widened to
    /// the labeling half-length so no window reaches the unlabeled tail.
    pub fn from_aligned(series: AlignedSeries<Direction>, config: IteratorConfig) -> Result<Self> {
        config.validate()?;
        let guard = series.max_filter_length().max(series.half_length());
        let cursor = BatchCursor::new(&config, series.len(), guard);
        log::info!(
            "Classification iterator: {} aligned steps, K={}, B={}, T={}, {} windows available",
            series.len(),
            series.num_channels(),
            config.batch_size,
            config.window_length,
            cursor.limit().saturating_sub(config.window_length)
        );
        Ok(Self {
            series,
            config,
            cursor,
            pre_processor: None,
        })
    }

    pub fn aligned(&self) -> &AlignedSeries<Direction> {
        &self.series
    }

    pub fn features(&self) -> &FeatureSeries {
        self.series.features()
    }

    pub fn labels(&self) -> &Series<Direction> {
        self.series.labels()
    }

    pub fn config(&self) -> &IteratorConfig {
        &self.config
    }
}

impl MinibatchSource for ClassificationIterator {
    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    fn next_batch(&mut self, batch_size: usize) -> Result<Minibatch> {
        self.cursor.ensure(batch_size)?;

        let window = self.config.window_length;
        let channels = self.series.num_channels();
        let mut features = Array3::zeros((batch_size, channels, window));
        let mut labels = Array3::zeros((batch_size, Direction::CLASSES, window));
        let feature_mask = Array2::ones((batch_size, window));
        let mut label_mask = Array2::zeros((batch_size, window));

        for (example, start) in self.cursor.window_starts(batch_size).enumerate() {
            for step in 0..window {
                let index = start + step;
                let Some(direction) = self.series.labels().value(index) else {
                    continue;
                };
                if let Some(vector) = self.series.features().value(index) {
                    for (channel, value) in vector.iter().enumerate() {
                        features[[example, channel, step]] = *value;
                    }
                }
                labels[[example, direction.class_index(), step]] = 1.0;
            }
            label_mask[[example, window - 1]] = 1.0;
        }

        log::debug!(
            "Emitted classification batch at cursor {} (B={}, T={})",
            self.cursor.position(),
            batch_size,
            window
        );
        self.cursor.advance(batch_size);

        let mut batch = Minibatch {
            features,
            labels,
            feature_mask: Some(feature_mask),
            label_mask: Some(label_mask),
        };
        if let Some(pre_processor) = &self.pre_processor {
            pre_processor.pre_process(&mut batch);
        }
        Ok(batch)
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }

    fn cursor(&self) -> usize {
        self.cursor.position()
    }

    fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    fn window_length(&self) -> usize {
        self.config.window_length
    }

    fn num_channels(&self) -> usize {
        self.series.num_channels()
    }

    fn num_outcomes(&self) -> usize {
        Direction::CLASSES
    }

    fn total_examples(&self) -> usize {
        self.config.total_examples
    }

    fn set_pre_processor(&mut self, pre_processor: Box<dyn BatchPreProcessor>) {
        log::debug!("Installed pre-processor {}", pre_processor.name());
        self.pre_processor = Some(pre_processor);
    }

    fn take_pre_processor(&mut self) -> Option<Box<dyn BatchPreProcessor>> {
        self.pre_processor.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::f64::consts::PI;
    use zerophase_core::Timestamp;
    use zerophase_feeds::VecFeed;
    use zerophase_ports::ExtractorSpec;

    use crate::config::LabelingConfig;
    use crate::error::DatasetError;

    fn day(i: usize) -> Timestamp {
        Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap() + Duration::days(i as i64)
    }

    fn sine_feed(len: usize) -> VecFeed {
        VecFeed::from_pairs((0..len).map(|i| (day(i), 50.0 + 10.0 * (i as f64 / 15.0).sin())))
    }

    fn config(batch_size: usize, window_length: usize) -> DatasetConfig {
        DatasetConfig::new(
            vec![
                ExtractorSpec::new("lp", 6, PI / 5.0).with_settling_length(12),
                ExtractorSpec::new("bp", 4, PI / 3.0).with_band_pass(PI / 6.0),
            ],
            IteratorConfig::new(batch_size, window_length),
        )
    }

    fn iterator(batch_size: usize, window_length: usize) -> ClassificationIterator {
        ClassificationIterator::from_feed(&mut sine_feed(200), &config(batch_size, window_length))
            .unwrap()
    }

    #[test]
    fn test_shapes_and_masks() {
        let mut it = iterator(4, 25);
        let batch = it.next().unwrap();

        assert_eq!(batch.features.dim(), (4, 2, 25));
        assert_eq!(batch.labels.dim(), (4, 2, 25));

        let feature_mask = batch.feature_mask.unwrap();
        assert!(feature_mask.iter().all(|m| *m == 1.0));

        let label_mask = batch.label_mask.unwrap();
        for example in 0..4 {
            for step in 0..25 {
                let expected = if step == 24 { 1.0 } else { 0.0 };
                assert_eq!(label_mask[[example, step]], expected);
            }
        }
    }

    #[test]
    fn test_labels_are_one_hot() {
        let mut it = iterator(3, 20);
        let batch = it.next().unwrap();
        for example in 0..3 {
            for step in 0..20 {
                let sum = batch.labels[[example, 0, step]] + batch.labels[[example, 1, step]];
                assert_eq!(sum, 1.0);
            }
        }
    }

    #[test]
    fn test_window_contents_follow_series() {
        let mut it = iterator(2, 10);
        it.next().unwrap();
        let batch = it.next().unwrap();

        // Second batch starts at aligned index 2
        let expected = it.features().value(2 + 1 + 7).unwrap();
        assert_eq!(batch.features[[1, 0, 7]], expected[0]);
        assert_eq!(batch.features[[1, 1, 7]], expected[1]);

        let direction = it.labels().value(2 + 1 + 7).unwrap();
        assert_eq!(batch.labels[[1, direction.class_index(), 7]], 1.0);
    }

    #[test]
    fn test_cursor_advances_by_batch() {
        let mut it = iterator(5, 30);
        let mut batches = 0;
        while it.has_next() {
            it.next().unwrap();
            batches += 1;
            assert_eq!(it.cursor(), batches * 5);
        }
        assert!(batches > 0);
        assert!(matches!(it.next(), Err(DatasetError::Exhausted { .. })));

        it.reset();
        assert_eq!(it.cursor(), 0);
        assert!(it.has_next());
    }

    #[test]
    fn test_explicit_batch_size_keeps_configured_size() {
        let mut it = iterator(5, 30);
        let batch = it.next_batch(2).unwrap();
        assert_eq!(batch.batch_size(), 2);
        assert_eq!(it.cursor(), 2);
        assert_eq!(it.batch_size(), 5);
        assert_eq!(it.next().unwrap().batch_size(), 5);
    }

    #[test]
    fn test_accessors() {
        let it = iterator(4, 25);
        assert_eq!(it.num_channels(), 2);
        assert_eq!(it.num_outcomes(), 2);
        assert_eq!(it.window_length(), 25);
        assert_eq!(it.total_examples(), 0);
        // warm-up 12, boundary 6
        assert_eq!(it.aligned().len(), 200 - 12 - 6);
    }

    #[test]
    fn test_long_labeling_filter_never_reads_unlabeled_tail() {
        let mut feed = VecFeed::from_pairs((0..200).map(|i| (day(i), 10.0 + i as f64)));
        let config = DatasetConfig::new(
            vec![ExtractorSpec::new("lp", 5, PI / 4.0)],
            IteratorConfig::new(1, 10),
        )
        .with_labeling(LabelingConfig::default().with_half_length(12));
        let mut it = ClassificationIterator::from_feed(&mut feed, &config).unwrap();

        // warm-up 5, boundary 12; the last 12 aligned labels are absent
        assert_eq!(it.aligned().len(), 183);

        let mut windows = 0;
        while it.has_next() {
            let start = it.cursor();
            let batch = it.next().unwrap();
            for step in 0..10 {
                let sum = batch.labels[[0, 0, step]] + batch.labels[[0, 1, step]];
                assert_eq!(sum, 1.0, "window at {start}, step {step}");
            }
            windows += 1;
        }
        // 159 + 1 + 10 < 183 - 12
        assert_eq!(windows, 160);
    }

    struct Doubler;

    impl BatchPreProcessor for Doubler {
        fn pre_process(&self, batch: &mut Minibatch) {
            batch.features.mapv_inplace(|v| v * 2.0);
        }
    }

    #[test]
    fn test_pre_processor_applied() {
        let mut it = iterator(2, 10);
        let plain = it.next().unwrap();
        it.reset();
        it.set_pre_processor(Box::new(Doubler));
        let doubled = it.next().unwrap();
        assert_eq!(doubled.features, plain.features.mapv(|v| v * 2.0));

        assert!(it.take_pre_processor().is_some());
        it.reset();
        assert_eq!(it.next().unwrap(), plain);
    }
}
