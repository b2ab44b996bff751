//! Shared vocabulary for the image authenticity pipeline.
//!
//! This crate provides the types every other crate in the workspace speaks:
//!
//! # Classification Types
//!
//! - [`ClassLabel`] - The two authenticity classes (`real` / `fake`)
//! - [`Verdict`] - A classification result: label plus confidence
//!
//! # Preprocessing Types
//!
//! - [`ImageStats`] - Per-channel normalization statistics (mean, std)
//!
//! # Leaf Crate
//!
//! This crate has no dependencies on the rest of the workspace. It can be
//! used in:
//! - Feature extraction
//! - Model inference and training
//! - Dataset tooling
//! - Serving layers
//!
//! # Example
//!
//! ```
//! use veri_types::{ClassLabel, Verdict};
//!
//! let verdict = Verdict::new(ClassLabel::Fake, 0.87);
//! assert!(verdict.is_fake());
//! assert!(verdict.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod label;
mod stats;
mod verdict;

// Re-export classification types
pub use label::{ClassLabel, ParseLabelError};
pub use verdict::Verdict;

// Re-export preprocessing types
pub use stats::ImageStats;
