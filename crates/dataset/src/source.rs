//! Iterator and pre-processor ports
//!
//! Training code drives either iterator variant through [`MinibatchSource`].

use crate::error::Result;
use crate::minibatch::Minibatch;

/// Transformation applied to every emitted minibatch
pub trait BatchPreProcessor: Send + Sync {
    fn pre_process(&self, batch: &mut Minibatch);

    fn name(&self) -> &str {
        "BatchPreProcessor"
    }
}

/// Resettable source of fixed-geometry minibatches
pub trait MinibatchSource: Send {
    /// Whether a batch of the configured size fits before the trailing guard
    fn has_next(&self) -> bool;

    /// Emit `batch_size` examples starting at the cursor and advance it
    fn next_batch(&mut self, batch_size: usize) -> Result<Minibatch>;

    /// Emit a batch of the configured size
    fn next(&mut self) -> Result<Minibatch> {
        let batch_size = self.batch_size();
        self.next_batch(batch_size)
    }

    /// Rewind the cursor to the first example
    fn reset(&mut self);

    fn cursor(&self) -> usize;

    /// Configured batch size B
    fn batch_size(&self) -> usize;

    /// Window length T
    fn window_length(&self) -> usize;

    /// Input channels per timestep
    fn num_channels(&self) -> usize;

    /// Label channels per timestep
    fn num_outcomes(&self) -> usize;

    /// Declared number of examples, advisory only
    fn total_examples(&self) -> usize;

    /// Install a pre-processor applied by `next_batch`, replacing any previous one
    fn set_pre_processor(&mut self, pre_processor: Box<dyn BatchPreProcessor>);

    /// Remove and return the installed pre-processor
    fn take_pre_processor(&mut self) -> Option<Box<dyn BatchPreProcessor>>;
}
