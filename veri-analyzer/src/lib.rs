//! The serving-facing analysis surface.
//!
//! Composes the classifiers and the metadata extractor into the calls a
//! serving layer makes per request:
//!
//! - [`Analyzer::analyze`] - classic feature-based verdict
//! - [`Analyzer::predict`] - neural (statistics-scored) verdict
//! - [`Analyzer::extract_metadata`] - best-effort capture metadata
//! - [`Analyzer::report`] - verdict plus metadata in one response shape
//! - [`download_image`] - blocking URL fetch, distinct from decode errors
//!
//! The analyzer is an explicitly owned value meant to be constructed once
//! and injected into the request path. The classic classifier sits behind
//! a lock so training serializes against analysis.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod analyzer;
mod error;
mod fetch;

pub use analyzer::{AnalysisReport, Analyzer};
pub use error::{AnalyzeError, Result};
pub use fetch::download_image;
