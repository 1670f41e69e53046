//! Batch progress accounting.
//!
//! A batch uploads one file at a time. Two policies turn per-file transfer samples into the
//! single percentage shown in the progress bar:
//!
//! - [`ProgressPolicy::CumulativeBytes`] weighs every file by its size and never moves backwards.
//! - [`ProgressPolicy::PerFileThenBatch`] shows the in-flight file's own percentage, then snaps to
//!   `completed / total` after each success. The bar restarts low for every file, so it jitters.

use file_service::TransferProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressPolicy {
    #[default]
    CumulativeBytes,
    PerFileThenBatch,
}

/// Running totals for the batch currently being uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTracker {
    sizes: Vec<u64>,
    total_bytes: u64,
    settled_bytes: u64,
    files_attempted: usize,
    files_completed: usize,
    percent: u8,
}

impl BatchTracker {
    pub fn new(sizes: Vec<u64>) -> Self {
        let total_bytes = sizes.iter().copied().fold(0u64, u64::saturating_add);
        Self {
            sizes,
            total_bytes,
            settled_bytes: 0,
            files_attempted: 0,
            files_completed: 0,
            percent: 0,
        }
    }

    pub fn total_files(&self) -> usize {
        self.sizes.len()
    }

    pub fn files_attempted(&self) -> usize {
        self.files_attempted
    }

    pub fn files_completed(&self) -> usize {
        self.files_completed
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Folds a transfer sample for file `index` into the batch percentage.
    pub fn record_transfer(
        &mut self,
        index: usize,
        sample: TransferProgress,
        policy: ProgressPolicy,
    ) -> u8 {
        self.percent = match policy {
            ProgressPolicy::PerFileThenBatch => sample.percent(),
            ProgressPolicy::CumulativeBytes => {
                let fraction = transfer_fraction(sample);
                let in_flight = if self.total_bytes == 0 {
                    fraction
                } else {
                    self.size_of(index) as f64 * fraction
                };
                self.cumulative_percent(in_flight).max(self.percent)
            }
        };
        self.percent
    }

    /// Marks file `index` as finished, successfully or not.
    pub fn record_settled(&mut self, index: usize, succeeded: bool, policy: ProgressPolicy) -> u8 {
        self.files_attempted = (self.files_attempted + 1).min(self.total_files());
        self.settled_bytes = self.settled_bytes.saturating_add(self.size_of(index));
        if succeeded {
            self.files_completed = (self.files_completed + 1).min(self.total_files());
        }

        self.percent = match policy {
            // Failures leave the last live sample on screen.
            ProgressPolicy::PerFileThenBatch if !succeeded => self.percent,
            ProgressPolicy::PerFileThenBatch => {
                ratio_percent(self.files_completed as f64, self.total_files() as f64)
            }
            ProgressPolicy::CumulativeBytes => self.cumulative_percent(0.0).max(self.percent),
        };
        self.percent
    }

    fn size_of(&self, index: usize) -> u64 {
        self.sizes.get(index).copied().unwrap_or(0)
    }

    // Zero-byte batches fall back to counting files, with `in_flight` as a file fraction.
    fn cumulative_percent(&self, in_flight: f64) -> u8 {
        if self.total_bytes == 0 {
            ratio_percent(
                self.files_attempted as f64 + in_flight,
                self.total_files() as f64,
            )
        } else {
            ratio_percent(
                self.settled_bytes as f64 + in_flight,
                self.total_bytes as f64,
            )
        }
    }
}

fn transfer_fraction(sample: TransferProgress) -> f64 {
    if sample.total == 0 {
        return 0.0;
    }
    (sample.loaded.min(sample.total) as f64) / sample.total as f64
}

fn ratio_percent(done: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    ((done / total) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample(loaded: u64, total: u64) -> TransferProgress {
        TransferProgress::new(loaded, total)
    }

    #[test]
    fn cumulative_bytes_weighs_files_by_size_and_never_regresses() {
        let policy = ProgressPolicy::CumulativeBytes;
        let mut tracker = BatchTracker::new(vec![300, 100]);

        assert_eq!(tracker.record_transfer(0, sample(150, 300), policy), 38);
        assert_eq!(tracker.record_transfer(0, sample(300, 300), policy), 75);
        assert_eq!(tracker.record_settled(0, true, policy), 75);
        // Second file restarts its own transfer, but the bar keeps climbing.
        assert_eq!(tracker.record_transfer(1, sample(10, 100), policy), 78);
        assert_eq!(tracker.record_settled(1, true, policy), 100);
        assert_eq!(tracker.files_completed(), 2);
    }

    #[test]
    fn cumulative_bytes_scales_multipart_totals_to_file_size() {
        let policy = ProgressPolicy::CumulativeBytes;
        let mut tracker = BatchTracker::new(vec![100, 100]);
        // The transport total includes multipart framing; only the fraction matters.
        assert_eq!(tracker.record_transfer(0, sample(130, 260), policy), 25);
    }

    #[test]
    fn failed_files_still_count_toward_cumulative_completion() {
        let policy = ProgressPolicy::CumulativeBytes;
        let mut tracker = BatchTracker::new(vec![50, 50]);
        assert_eq!(tracker.record_settled(0, false, policy), 50);
        assert_eq!(tracker.record_settled(1, true, policy), 100);
        assert_eq!(tracker.files_attempted(), 2);
        assert_eq!(tracker.files_completed(), 1);
    }

    #[test]
    fn zero_byte_batches_count_files() {
        let policy = ProgressPolicy::CumulativeBytes;
        let mut tracker = BatchTracker::new(vec![0, 0, 0, 0]);
        assert_eq!(tracker.record_transfer(0, sample(0, 0), policy), 0);
        assert_eq!(tracker.record_settled(0, true, policy), 25);
        assert_eq!(tracker.record_settled(1, true, policy), 50);
    }

    #[test]
    fn per_file_then_batch_reproduces_jitter() {
        let policy = ProgressPolicy::PerFileThenBatch;
        let mut tracker = BatchTracker::new(vec![100, 100, 100]);

        assert_eq!(tracker.record_transfer(0, sample(90, 100), policy), 90);
        assert_eq!(tracker.record_settled(0, true, policy), 33);
        assert_eq!(tracker.record_transfer(1, sample(20, 100), policy), 20);
        assert_eq!(tracker.record_transfer(1, sample(70, 100), policy), 70);
        // Failure keeps the live value.
        assert_eq!(tracker.record_settled(1, false, policy), 70);
        assert_eq!(tracker.record_transfer(2, sample(100, 100), policy), 100);
        assert_eq!(tracker.record_settled(2, true, policy), 67);
    }
}
