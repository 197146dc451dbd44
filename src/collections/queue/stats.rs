//! Running usage statistics for queue disciplines.
//!
//! Samples are taken after every `enter` and `leave`. The figures are
//! diagnostic only and never feed back into queue behavior.

use serde::Serialize;

/// Running length statistics of one queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueStats {
    entries: u64,
    exits: u64,
    samples: u64,
    sum: u128,
    sum_sq: u128,
    max_len: usize,
}

impl QueueStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_entry(&mut self, len: usize) {
        self.entries += 1;
        self.sample(len);
    }

    pub(crate) fn record_exit(&mut self, len: usize) {
        self.exits += 1;
        self.sample(len);
    }

    fn sample(&mut self, len: usize) {
        let len_wide = len as u128;
        self.samples += 1;
        self.sum += len_wide;
        self.sum_sq += len_wide * len_wide;
        self.max_len = self.max_len.max(len);
    }

    /// Number of successful `enter` calls.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Number of packets removed by `leave` or `discard`.
    pub fn exits(&self) -> u64 {
        self.exits
    }

    /// Number of length samples taken.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Largest length observed.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Mean sampled length, `0.0` before the first sample.
    pub fn mean(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.sum as f64 / self.samples as f64
    }

    /// Sample variance of the length, `0.0` with fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.samples < 2 {
            return 0.0;
        }
        let n = self.samples as f64;
        let sum = self.sum as f64;
        let spread = self.sum_sq as f64 - sum * sum / n;
        (spread / (n - 1.0)).max(0.0)
    }

    /// Sample standard deviation of the length.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Serializable snapshot labelled with the discipline name.
    pub fn summary(&self, discipline: &str) -> QueueSummary {
        QueueSummary {
            discipline: discipline.to_owned(),
            entries: self.entries,
            exits: self.exits,
            samples: self.samples,
            mean_len: self.mean(),
            std_dev: self.std_dev(),
            max_len: self.max_len,
        }
    }
}

/// Aggregate queue usage as it appears in a run report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueSummary {
    /// Discipline name, e.g. `"stack"`.
    pub discipline: String,
    /// Packets entered.
    pub entries: u64,
    /// Packets removed.
    pub exits: u64,
    /// Length samples.
    pub samples: u64,
    /// Mean length.
    pub mean_len: f64,
    /// Sample standard deviation of the length.
    pub std_dev: f64,
    /// Maximum length.
    pub max_len: usize,
}
