//! Per-channel sliding sample window.

use std::collections::VecDeque;

/// Append-at-tail, trim-from-head window of normalized samples for one channel.
///
/// Indices are relative to the current head. Reads outside `[0, len)`
/// return silence, which models both the pre-roll before the first sample
/// and samples that have not arrived yet.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChannelBuffer {
    samples: VecDeque<f64>,
}

impl ChannelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn push(&mut self, sample: f64) {
        self.samples.push_back(sample);
    }

    /// Appends `n` zero samples.
    pub fn pad(&mut self, n: usize) {
        self.samples.extend(std::iter::repeat_n(0.0, n));
    }

    /// Returns the sample at `index`, or 0 when out of range.
    #[inline]
    pub fn get(&self, index: i64) -> f64 {
        if index < 0 {
            return 0.0;
        }
        self.samples.get(index as usize).copied().unwrap_or(0.0)
    }

    /// Discards up to `n` samples from the head.
    pub fn trim_front(&mut self, n: usize) {
        let n = n.min(self.samples.len());
        self.samples.drain(..n);
    }
}
