use std::path::PathBuf;

use ndarray::Array3;
use zerophase_core::{FeatureSeries, Series, SeriesFormat, TargetSeries};
use zerophase_features::FeatureBank;
use zerophase_feeds::CsvFeed;
use zerophase_filter::LevelLabeler;
use zerophase_ports::ObservationFeed;

use crate::aligner::{AlignedSeries, SeriesAligner};
use crate::config::{DatasetConfig, IteratorConfig};
use crate::cursor::BatchCursor;
use crate::error::{DatasetError, Result};
use crate::minibatch::Minibatch;
use crate::source::{BatchPreProcessor, MinibatchSource};

/// Windowed iterator emitting continuous filter-output labels
///
/// Inputs are `[B, K + 1, T]`: channel 0 is the transformed target value,
/// channels `1..=K` the extracted features. Labels are `[B, 1, T]`. No
/// masks are emitted; every step of every window is a training target.
pub struct RegressionIterator {
    series: AlignedSeries<f64>,
    config: IteratorConfig,
    format: SeriesFormat,
    cursor: BatchCursor,
    pre_processor: Option<Box<dyn BatchPreProcessor>>,
    last_dates: Vec<Vec<String>>,
}

impl RegressionIterator {
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
        let labeler = LevelLabeler::regression(cutoff, half_length)?;

        let mut aligner = SeriesAligner::new(bank, config.transform);
        let series = aligner.align(feed, &labeler)?;
        Self::from_aligned(series, config.iterator, config.format.clone())
    }

    /// Wrap an already aligned series; the trailing guard is the labeling
    /// half-length
    pub fn from_aligned(
        series: AlignedSeries<f64>,
        config: IteratorConfig,
        format: SeriesFormat,
    ) -> Result<Self> {
        config.validate()?;
        let cursor = BatchCursor::new(&config, series.len(), series.half_length());
        log::info!(
            "Regression iterator: {} aligned steps, K={}, B={}, T={}, {} windows available",
            series.len(),
            series.num_channels(),
            config.batch_size,
            config.window_length,
            cursor.limit().saturating_sub(config.window_length)
        );
        Ok(Self {
            series,
            config,
            format,
            cursor,
            pre_processor: None,
            last_dates: Vec::new(),
        })
    }

    pub fn aligned(&self) -> &AlignedSeries<f64> {
        &self.series
    }

    pub fn features(&self) -> &FeatureSeries {
        self.series.features()
    }

    pub fn target(&self) -> &TargetSeries {
        self.series.target()
    }

    pub fn labels(&self) -> &Series<f64> {
        self.series.labels()
    }

    pub fn config(&self) -> &IteratorConfig {
        &self.config
    }

    /// `[B][T]` date strings of the most recent batch
    pub fn batch_dates(&self) -> &[Vec<String>] {
        &self.last_dates
    }
}

impl MinibatchSource for RegressionIterator {
    fn has_next(&self) -> bool {
        self.cursor.has_next()
    }

    fn next_batch(&mut self, batch_size: usize) -> Result<Minibatch> {
        self.cursor.ensure(batch_size)?;

        let window = self.config.window_length;
        let channels = self.series.num_channels() + 1;
        let mut features = Array3::zeros((batch_size, channels, window));
        let mut labels = Array3::zeros((batch_size, 1, window));
        let mut dates = Vec::with_capacity(batch_size);

        for (example, start) in self.cursor.window_starts(batch_size).enumerate() {
            let mut example_dates = Vec::with_capacity(window);
            for step in 0..window {
                let index = start + step;
                let target = self.series.target();
                let (Some(target_ts), Some(label_ts)) =
                    (target.timestamp(index), self.series.labels().timestamp(index))
                else {
                    continue;
                };
                if target_ts != label_ts {
                    return Err(DatasetError::Misaligned {
                        index,
                        expected: label_ts,
                        found: target_ts,
                    });
                }
                example_dates.push(self.format.format_timestamp(&label_ts));

                let Some(level) = self.series.labels().value(index) else {
                    continue;
                };
                features[[example, 0, step]] = target.value(index).unwrap_or_default();
                if let Some(vector) = self.series.features().value(index) {
                    for (channel, value) in vector.iter().enumerate() {
                        features[[example, channel + 1, step]] = *value;
                    }
                }
                labels[[example, 0, step]] = *level;
            }
            dates.push(example_dates);
        }

        log::debug!(
            "Emitted regression batch at cursor {} (B={}, T={})",
            self.cursor.position(),
            batch_size,
            window
        );
        self.cursor.advance(batch_size);
        self.last_dates = dates;

        let mut batch = Minibatch {
            features,
            labels,
            feature_mask: None,
            label_mask: None,
        };
        if let Some(pre_processor) = &self.pre_processor {
            pre_processor.pre_process(&mut batch);
        }
        Ok(batch)
    }

    fn reset(&mut self) {
        self.cursor.reset();
        self.last_dates.clear();
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
        self.series.num_channels() + 1
    }

    fn num_outcomes(&self) -> usize {
        1
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
