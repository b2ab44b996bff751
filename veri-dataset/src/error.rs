//! Error types for veri-dataset crate.

use thiserror::Error;

/// Errors that can occur in dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read a dataset directory.
    #[error("failed to read dataset directory {path}: {reason}")]
    ReadDir {
        /// Directory path.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to load a sample file.
    #[error("failed to load sample {path}: {reason}")]
    LoadSample {
        /// Sample file path.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid split ratio.
    #[error("invalid split ratio: {0} (must be in (0, 1])")]
    InvalidSplitRatio(f32),

    /// The dataset holds no samples.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A prefetch worker disappeared without delivering its batches.
    #[error("batch prefetch worker failed")]
    WorkerLost,
}

impl DatasetError {
    /// Creates a read-directory error.
    #[must_use]
    pub fn read_dir(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReadDir {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a load-sample error.
    #[must_use]
    pub fn load_sample(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadSample {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for veri-dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_read_dir() {
        let err = DatasetError::read_dir("/data/real", "permission denied");
        assert!(err.to_string().contains("/data/real"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn error_load_sample() {
        let err = DatasetError::load_sample("a.jpg", "truncated file");
        assert!(err.to_string().contains("a.jpg"));
        assert!(err.to_string().contains("truncated file"));
    }

    #[test]
    fn error_invalid_split_ratio() {
        let err = DatasetError::InvalidSplitRatio(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn error_empty_dataset() {
        assert_eq!(DatasetError::EmptyDataset.to_string(), "dataset is empty");
    }
}
