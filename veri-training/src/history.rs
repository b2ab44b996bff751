//! Per-epoch training records.

use serde::{Deserialize, Serialize};

/// Loss and accuracy for one training epoch.
///
/// # Example
///
/// ```
/// use veri_training::EpochRecord;
///
/// let record = EpochRecord::new(0, 0.69, 0.52);
/// assert!(record.val_loss.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Epoch number (0-indexed).
    pub epoch: usize,

    /// Mean training loss over the epoch's batches.
    pub train_loss: f32,

    /// Training accuracy at the 0.5 decision threshold.
    pub train_accuracy: f32,

    /// Validation loss, when a validation pass ran.
    pub val_loss: Option<f32>,

    /// Validation accuracy, when a validation pass ran.
    pub val_accuracy: Option<f32>,
}

impl EpochRecord {
    /// Creates a record without validation numbers.
    #[must_use]
    pub const fn new(epoch: usize, train_loss: f32, train_accuracy: f32) -> Self {
        Self {
            epoch,
            train_loss,
            train_accuracy,
            val_loss: None,
            val_accuracy: None,
        }
    }

    /// Attaches validation numbers.
    #[must_use]
    pub const fn with_validation(mut self, val_loss: f32, val_accuracy: f32) -> Self {
        self.val_loss = Some(val_loss);
        self.val_accuracy = Some(val_accuracy);
        self
    }
}

/// Append-only record of a training run.
///
/// Grows by one [`EpochRecord`] per epoch whether or not validation ran,
/// and tracks which epoch achieved the lowest validation loss.
///
/// # Example
///
/// ```
/// use veri_training::{EpochRecord, TrainingHistory};
///
/// let mut history = TrainingHistory::new();
/// history.push(EpochRecord::new(0, 0.7, 0.5).with_validation(0.65, 0.55));
/// history.push(EpochRecord::new(1, 0.5, 0.7).with_validation(0.65, 0.6));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.best_epoch, Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    /// One record per completed epoch.
    pub records: Vec<EpochRecord>,

    /// Lowest validation loss seen.
    pub best_val_loss: Option<f32>,

    /// Epoch that produced the best validation loss.
    pub best_epoch: Option<usize>,
}

impl TrainingHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an epoch record, updating the best-validation bookkeeping.
    ///
    /// Returns `true` when the record's validation loss is a new best -
    /// the signal the trainer uses to persist a checkpoint.
    pub fn push(&mut self, record: EpochRecord) -> bool {
        let improved = match (record.val_loss, self.best_val_loss) {
            (Some(current), Some(best)) => current < best,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if improved {
            self.best_val_loss = record.val_loss;
            self.best_epoch = Some(record.epoch);
        }

        self.records.push(record);
        improved
    }

    /// Number of completed epochs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no epochs have completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The final training loss.
    #[must_use]
    pub fn final_train_loss(&self) -> f32 {
        self.records.last().map_or(f32::NAN, |r| r.train_loss)
    }

    /// The final validation loss, if the last epoch validated.
    #[must_use]
    pub fn final_val_loss(&self) -> Option<f32> {
        self.records.last().and_then(|r| r.val_loss)
    }

    /// A human-readable summary of the run.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut s = String::new();
        let _ = writeln!(s, "Training Summary");
        let _ = writeln!(s, "================");
        let _ = writeln!(s, "Epochs completed: {}", self.len());

        if let Some(last) = self.records.last() {
            let _ = writeln!(
                s,
                "Final train loss: {:.4}, accuracy: {:.4}",
                last.train_loss, last.train_accuracy
            );
        }

        if let Some(best) = self.best_val_loss {
            let _ = writeln!(
                s,
                "Best val loss: {:.4} (epoch {})",
                best,
                self.best_epoch.unwrap_or(0)
            );
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_builder() {
        let record = EpochRecord::new(3, 0.4, 0.8).with_validation(0.35, 0.82);
        assert_eq!(record.epoch, 3);
        assert_eq!(record.val_loss, Some(0.35));
        assert_eq!(record.val_accuracy, Some(0.82));
    }

    #[test]
    fn history_push_tracks_best() {
        let mut history = TrainingHistory::new();

        assert!(history.push(EpochRecord::new(0, 0.7, 0.5).with_validation(0.6, 0.5)));
        assert!(history.push(EpochRecord::new(1, 0.5, 0.6).with_validation(0.4, 0.7)));
        assert!(!history.push(EpochRecord::new(2, 0.4, 0.7).with_validation(0.45, 0.7)));

        assert_eq!(history.best_val_loss, Some(0.4));
        assert_eq!(history.best_epoch, Some(1));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn history_grows_without_validation() {
        let mut history = TrainingHistory::new();
        assert!(!history.push(EpochRecord::new(0, 0.7, 0.5)));
        assert!(!history.push(EpochRecord::new(1, 0.6, 0.6)));

        assert_eq!(history.len(), 2);
        assert!(history.best_val_loss.is_none());
        assert!(history.best_epoch.is_none());
    }

    #[test]
    fn history_final_losses() {
        let mut history = TrainingHistory::new();
        assert!(history.final_train_loss().is_nan());

        history.push(EpochRecord::new(0, 0.9, 0.4));
        history.push(EpochRecord::new(1, 0.3, 0.8).with_validation(0.25, 0.85));

        assert!((history.final_train_loss() - 0.3).abs() < 1e-6);
        assert_eq!(history.final_val_loss(), Some(0.25));
    }

    #[test]
    fn history_summary() {
        let mut history = TrainingHistory::new();
        history.push(EpochRecord::new(0, 1.0, 0.5).with_validation(0.9, 0.5));
        history.push(EpochRecord::new(1, 0.5, 0.75).with_validation(0.45, 0.8));

        let summary = history.summary();
        assert!(summary.contains("Epochs completed: 2"));
        assert!(summary.contains("Best val loss: 0.4500 (epoch 1)"));
    }

    #[test]
    fn history_serialization() {
        let mut history = TrainingHistory::new();
        history.push(EpochRecord::new(0, 0.5, 0.6).with_validation(0.4, 0.7));

        let json = serde_json::to_string(&history);
        assert!(json.is_ok());

        let parsed: std::result::Result<TrainingHistory, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), history);
    }
}
