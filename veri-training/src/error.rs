//! Error types for veri-training crate.

use thiserror::Error;
use veri_dataset::DatasetError;
use veri_model::ModelError;

/// Errors that can occur during training.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Dataset scanning or batch loading failed.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Model or checkpoint operation failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Invalid training configuration.
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    /// The training set holds no samples.
    #[error("no training samples under {0}")]
    EmptyTrainingSet(String),

    /// Failed to prepare the checkpoint directory.
    #[error("failed to create checkpoint directory {path}: {reason}")]
    CheckpointDir {
        /// Directory path.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

impl TrainingError {
    /// Creates an invalid-config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a checkpoint-directory error.
    #[must_use]
    pub fn checkpoint_dir(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CheckpointDir {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for veri-training operations.
pub type Result<T> = std::result::Result<T, TrainingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_dataset() {
        let err: TrainingError = DatasetError::EmptyDataset.into();
        assert!(matches!(err, TrainingError::Dataset(_)));
        assert!(err.to_string().contains("dataset is empty"));
    }

    #[test]
    fn error_from_model() {
        let err: TrainingError = ModelError::EmptyTrainingSet.into();
        assert!(matches!(err, TrainingError::Model(_)));
    }

    #[test]
    fn error_invalid_config() {
        let err = TrainingError::invalid_config("epochs must be positive");
        assert!(err.to_string().contains("epochs must be positive"));
    }

    #[test]
    fn error_checkpoint_dir() {
        let err = TrainingError::checkpoint_dir("./models", "read-only filesystem");
        assert!(err.to_string().contains("./models"));
        assert!(err.to_string().contains("read-only filesystem"));
    }
}
