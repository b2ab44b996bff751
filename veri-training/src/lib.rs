//! Training lifecycle for the convolutional classifier.
//!
//! # Training Components
//!
//! - [`TrainConfig`] - Epochs, batch size, split fraction, Adam settings
//! - [`fit`] - The epoch loop: BCE loss, Adam stepping, accuracy
//!   bookkeeping, best-validation checkpointing
//! - [`TrainingHistory`] / [`EpochRecord`] - Per-epoch loss and accuracy
//!
//! # Loss Functions
//!
//! - [`binary_cross_entropy`] - BCE over post-sigmoid probabilities
//! - [`count_correct`] - 0.5-threshold agreement count
//!
//! # Invocation Surface
//!
//! - [`run_training`] - Scan a dataset directory, split, fit, and write a
//!   timestamped checkpoint (what the training CLI calls)
//!
//! # Example
//!
//! ```ignore
//! use veri_training::{TrainConfig, fit};
//!
//! let config = TrainConfig::default();
//! let (model, history) = fit(model, &mut train_loader, Some(&mut val_loader),
//!     &config, Some(&save_path), &device)?;
//! println!("{}", history.summary());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod fit;
mod history;
mod loss;
mod run;

// Re-export configuration
pub use config::TrainConfig;

// Re-export the epoch loop and its records
pub use fit::fit;
pub use history::{EpochRecord, TrainingHistory};

// Re-export loss functions
pub use loss::{binary_cross_entropy, count_correct};

// Re-export the invocation surface
pub use run::{TrainRequest, TrainingRun, run_training};

// Re-export error types
pub use error::{Result, TrainingError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        EpochRecord, TrainConfig, TrainRequest, TrainingError, TrainingHistory, TrainingRun, fit,
        run_training,
    };
}
