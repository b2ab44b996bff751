//! Authenticity class labels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two authenticity classes.
///
/// Labels map to the numeric encoding used by the training path:
/// `Real` is 0.0 and `Fake` is 1.0.
///
/// # Example
///
/// ```
/// use veri_types::ClassLabel;
///
/// let label = ClassLabel::Fake;
/// assert!((label.as_f32() - 1.0).abs() < 1e-6);
/// assert_eq!(label.name(), "fake");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLabel {
    /// An authentic, unmanipulated image.
    Real,

    /// A manipulated or generated image.
    Fake,
}

impl ClassLabel {
    /// Returns the numeric encoding (0.0 for real, 1.0 for fake).
    #[must_use]
    pub const fn as_f32(&self) -> f32 {
        match self {
            Self::Real => 0.0,
            Self::Fake => 1.0,
        }
    }

    /// Decodes a fake-probability into a label with a 0.5 threshold.
    ///
    /// Values strictly greater than 0.5 are `Fake`.
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score > 0.5 {
            Self::Fake
        } else {
            Self::Real
        }
    }

    /// Returns the label name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Fake => "fake",
        }
    }

    /// Returns `true` if this is the fake class.
    #[must_use]
    pub const fn is_fake(&self) -> bool {
        matches!(self, Self::Fake)
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown label string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown class label: {0:?} (expected \"real\" or \"fake\")")]
pub struct ParseLabelError(pub String);

impl FromStr for ClassLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "real" => Ok(Self::Real),
            "fake" => Ok(Self::Fake),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}
