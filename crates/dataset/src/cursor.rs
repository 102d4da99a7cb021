use zerophase_ports::ConfigError;

use crate::config::IteratorConfig;
use crate::error::{DatasetError, Result};

/// Window cursor over an aligned series
///
/// A batch of `b` examples starting at `position` may be emitted while
/// `position + b + window_length < limit`, where `limit` is the series
/// length minus the trailing guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCursor {
    position: usize,
    batch_size: usize,
    window_length: usize,
    limit: usize,
}

impl BatchCursor {
    pub fn new(config: &IteratorConfig, series_length: usize, trailing_guard: usize) -> Self {
        Self {
            position: 0,
            batch_size: config.batch_size,
            window_length: config.window_length,
            limit: series_length.saturating_sub(trailing_guard),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_emit(&self, batch_size: usize) -> bool {
        self.position + batch_size + self.window_length < self.limit
    }

    pub fn has_next(&self) -> bool {
        self.can_emit(self.batch_size)
    }

    /// Fail with [`DatasetError::Exhausted`] unless `batch_size` examples fit
    pub fn ensure(&self, batch_size: usize) -> Result<()> {
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize.into());
        }
        if self.can_emit(batch_size) {
            Ok(())
        } else {
            Err(DatasetError::Exhausted {
                cursor: self.position,
                batch_size,
                window: self.window_length,
                limit: self.limit,
            })
        }
    }

    /// First series index of each example in a batch of `batch_size`
    pub fn window_starts(&self, batch_size: usize) -> std::ops::Range<usize> {
        self.position..self.position + batch_size
    }

    pub fn advance(&mut self, batch_size: usize) {
        self.position += batch_size;
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}
