//! Pixel preprocessing and numeric feature extraction.
//!
//! This crate turns raw image bytes into the two representations the
//! classifiers consume:
//!
//! # Preprocessing
//!
//! - [`decode_rgb`] - Decode bytes into an RGB [`PixelBuffer`]
//! - [`preprocess`] - Decode and stretch-resize to the fixed 224x224 input
//! - [`to_tensor_data`] - Normalized CHW float data for the neural path
//!
//! # Feature Extraction
//!
//! - [`extract_features`] - The fixed 261-element descriptor: a 256-bin
//!   intensity histogram, four grayscale statistics, and the mean of a
//!   double-threshold edge map
//!
//! The descriptor length is invariant across input resolutions because
//! extraction always runs on a single-channel grayscale view.
//!
//! # Example
//!
//! ```no_run
//! use veri_features::{extract_features, preprocess, FEATURE_LEN};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let pixels = preprocess(&bytes)?;
//! let features = extract_features(&pixels)?;
//! assert_eq!(features.len(), FEATURE_LEN);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod features;
mod pixels;
mod tensor;

// Re-export preprocessing
pub use pixels::{INPUT_SIZE, PixelBuffer, decode_rgb, preprocess};
pub use tensor::{TENSOR_LEN, to_tensor_data};

// Re-export feature extraction
pub use features::{
    EDGE_HIGH, EDGE_LOW, FEATURE_LEN, HISTOGRAM_BINS, FeatureVector, extract_features,
};

// Re-export error types
pub use error::{FeatureError, Result};
