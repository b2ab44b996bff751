//! Error types for veri-features crate.

use thiserror::Error;

/// Errors that can occur during preprocessing or feature extraction.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Input bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The pixel buffer is empty.
    #[error("pixel buffer is empty")]
    EmptyInput,

    /// Pixel dimensions are degenerate.
    #[error("invalid pixel dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// The channel count is not supported.
    #[error("unsupported channel count: {0} (expected 1 or 3)")]
    UnsupportedChannels(u8),

    /// Buffer length does not match the declared dimensions.
    #[error("pixel buffer length mismatch: expected {expected}, got {actual}")]
    BufferMismatch {
        /// Expected length (width * height * channels).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

impl FeatureError {
    /// Creates a decode error.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    /// Creates an invalid dimensions error.
    #[must_use]
    pub const fn invalid_dimensions(width: u32, height: u32) -> Self {
        Self::InvalidDimensions { width, height }
    }

    /// Creates a buffer mismatch error.
    #[must_use]
    pub const fn buffer_mismatch(expected: usize, actual: usize) -> Self {
        Self::BufferMismatch { expected, actual }
    }
}

/// Result type for veri-features operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
