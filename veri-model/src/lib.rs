//! Classifier models for image authenticity.
//!
//! Two classifiers share the serving surface:
//!
//! # Neural Classifier
//!
//! - [`ConvNet`] - The fixed two-stage convolutional scorer (Burn module)
//! - [`NeuralClassifier`] - Checkpoint-backed wrapper whose serving
//!   `predict` scores deterministically from tensor statistics
//! - [`save_checkpoint`] / [`load_checkpoint`] - Weight persistence via
//!   Burn's binary recorder
//!
//! # Classic Classifier
//!
//! - [`ClassicClassifier`] - Bagged decision-tree ensemble over the
//!   261-element descriptor, with an explicit
//!   [`ForestState::Untrained`] placeholder path
//!
//! Both classifiers always return a [`veri_types::Verdict`]: an untrained
//! model produces a bounded placeholder rather than an error.
//!
//! # Backend Support
//!
//! Models are generic over Burn backends; `burn-ndarray` covers CPU
//! inference and the test suite.
//!
//! # Example
//!
//! ```ignore
//! use veri_model::{ConvNet, ConvNetConfig};
//!
//! let device = Default::default();
//! let model = ConvNet::<MyBackend>::new(ConvNetConfig::default(), &device);
//! let output = model.forward(images); // [batch, 1] probabilities
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod checkpoint;
mod classic;
mod cnn;
mod error;
mod forest;
mod neural;
mod scorer;

// Re-export neural model types
pub use cnn::{ConvNet, ConvNetConfig};
pub use neural::NeuralClassifier;
pub use scorer::{
    CONFIDENCE_CEIL, CONFIDENCE_FLOOR, FAKE_THRESHOLD, score_from_moments, score_statistics,
};

// Re-export classic model types
pub use classic::{ClassicClassifier, ForestState};
pub use forest::{DecisionTree, Forest, ForestConfig};

// Re-export checkpoint utilities
pub use checkpoint::{CHECKPOINT_PREFIX, checkpoint_filename, load_checkpoint, save_checkpoint};

// Re-export error types
pub use error::{ModelError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ClassicClassifier, ConvNet, ConvNetConfig, Forest, ForestConfig, ForestState, ModelError,
        NeuralClassifier, checkpoint_filename, load_checkpoint, save_checkpoint,
    };
}
