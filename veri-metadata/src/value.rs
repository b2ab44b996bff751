//! Metadata value representation.

use serde::{Deserialize, Serialize};

/// One extracted metadata value.
///
/// EXIF tags carry display strings; the container's pixel dimensions are
/// kept as a width/height pair.
///
/// # Example
///
/// ```
/// use veri_metadata::MetadataValue;
///
/// let value = MetadataValue::Dimensions(100, 100);
/// assert_eq!(format!("{value}"), "(100, 100)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// A textual tag value.
    Text(String),

    /// Pixel dimensions as `(width, height)`.
    Dimensions(u32, u32),
}

impl MetadataValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text value, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Dimensions(..) => None,
        }
    }

    /// Returns the dimensions, if this is a dimension pair.
    #[must_use]
    pub const fn as_dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Self::Text(_) => None,
            Self::Dimensions(w, h) => Some((*w, *h)),
        }
    }
}

impl std::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Dimensions(w, h) => write!(f, "({w}, {h})"),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
