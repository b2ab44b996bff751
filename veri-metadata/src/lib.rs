//! Best-effort capture metadata extraction.
//!
//! Pulls a fixed allow-list of EXIF tags plus basic container attributes
//! (format, pixel mode, dimensions) out of raw image bytes. Metadata is
//! strictly advisory: any parse failure yields an empty map instead of an
//! error, so this path can never block a classification result.
//!
//! # Example
//!
//! ```
//! use veri_metadata::extract;
//!
//! // Corrupt bytes produce an empty map, never an error.
//! let metadata = extract(&[0xde, 0xad, 0xbe, 0xef]);
//! assert!(metadata.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod extract;
mod value;

pub use extract::{ImageMetadata, extract};
pub use value::MetadataValue;
