//! Error types for veri-analyzer crate.

use thiserror::Error;
use veri_model::ModelError;

/// Errors that can occur in the analysis surface.
///
/// Fetch failures are kept distinct from decode/model failures so callers
/// can tell a bad source apart from bad content.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Downloading the image URL failed.
    #[error("failed to download image from {url}: {reason}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Reason for failure.
        reason: String,
    },

    /// Classification failed (decode, feature, or model error).
    #[error("analysis failed: {0}")]
    Model(#[from] ModelError),
}

impl AnalyzeError {
    /// Creates a fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for veri-analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_fetch() {
        let err = AnalyzeError::fetch("http://host/img.png", "HTTP 404");
        assert!(err.to_string().contains("http://host/img.png"));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn error_from_model() {
        let err: AnalyzeError = ModelError::EmptyTrainingSet.into();
        assert!(matches!(err, AnalyzeError::Model(_)));
    }
}
