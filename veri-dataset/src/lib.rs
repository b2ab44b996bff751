//! Dataset discovery, splitting, and batch loading.
//!
//! This crate feeds the training loop:
//!
//! # Discovery
//!
//! - [`ImageSample`] - One labeled image file on disk
//! - [`scan_dataset`] - Discover samples under the two-class directory
//!   layout (`<root>/real`, `<root>/fake`)
//!
//! # Splitting
//!
//! - [`SplitRatio`] - Train fraction newtype
//! - [`split_samples`] - Seeded random partition into disjoint
//!   train/validation subsets
//!
//! # Loading
//!
//! - [`load_sample`] - Materialize one sample into normalized tensor data
//! - [`BatchLoader`] - Batched epoch iteration with per-epoch training
//!   shuffle, fixed validation order, and two-worker prefetch
//!
//! # Example
//!
//! ```no_run
//! use veri_dataset::{BatchLoader, SplitRatio, scan_dataset, split_samples};
//!
//! let samples = scan_dataset("./data")?;
//! let (train, val) = split_samples(&samples, SplitRatio::new(0.8)?, Some(42));
//!
//! let mut loader = BatchLoader::training(train, 32, Some(42));
//! for batch in loader.epoch() {
//!     let batch = batch?;
//!     println!("{} samples", batch.len);
//! }
//! # Ok::<(), veri_dataset::DatasetError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod loader;
mod sample;
mod scan;
mod splits;

// Re-export discovery types
pub use sample::ImageSample;
pub use scan::scan_dataset;

// Re-export splitting
pub use splits::{SplitRatio, split_samples};

// Re-export batch loading
pub use loader::{Batch, BatchLoader, EpochIter, PREFETCH_WORKERS, TensorSample, load_sample};

// Re-export error types
pub use error::{DatasetError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        Batch, BatchLoader, DatasetError, ImageSample, SplitRatio, load_sample, scan_dataset,
        split_samples,
    };
}
