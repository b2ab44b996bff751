//! Error types for veri-model crate.

use thiserror::Error;
use veri_features::FeatureError;

/// Errors that can occur in model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Preprocessing or feature extraction failed.
    #[error("feature extraction failed: {0}")]
    Feature(#[from] FeatureError),

    /// Failed to load a checkpoint.
    #[error("failed to load checkpoint from {path}: {reason}")]
    LoadCheckpoint {
        /// Path to the checkpoint file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to save a checkpoint.
    #[error("failed to save checkpoint to {path}: {reason}")]
    SaveCheckpoint {
        /// Path to the checkpoint file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Checkpoint file not found.
    #[error("checkpoint not found: {0}")]
    CheckpointNotFound(String),

    /// The training set is empty.
    #[error("cannot train on an empty sample set")]
    EmptyTrainingSet,

    /// Feature rows and labels disagree in length.
    #[error("training length mismatch: {images} images vs {labels} labels")]
    LengthMismatch {
        /// Number of images supplied.
        images: usize,
        /// Number of labels supplied.
        labels: usize,
    },
}

impl ModelError {
    /// Creates a load checkpoint error.
    #[must_use]
    pub fn load_checkpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a save checkpoint error.
    #[must_use]
    pub fn save_checkpoint(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SaveCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a checkpoint not found error.
    #[must_use]
    pub fn checkpoint_not_found(path: impl Into<String>) -> Self {
        Self::CheckpointNotFound(path.into())
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(images: usize, labels: usize) -> Self {
        Self::LengthMismatch { images, labels }
    }
}

/// Result type for veri-model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_feature() {
        let err: ModelError = FeatureError::decode("bad header").into();
        assert!(err.to_string().contains("bad header"));
        assert!(matches!(err, ModelError::Feature(_)));
    }

    #[test]
    fn error_load_checkpoint() {
        let err = ModelError::load_checkpoint("model.bin", "file corrupted");
        assert!(err.to_string().contains("model.bin"));
        assert!(err.to_string().contains("file corrupted"));
    }

    #[test]
    fn error_checkpoint_not_found() {
        let err = ModelError::checkpoint_not_found("/models/missing.bin");
        assert!(err.to_string().contains("/models/missing.bin"));
    }

    #[test]
    fn error_length_mismatch() {
        let err = ModelError::length_mismatch(3, 5);
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn error_empty_training_set() {
        assert!(
            ModelError::EmptyTrainingSet
                .to_string()
                .contains("empty sample set")
        );
    }
}
