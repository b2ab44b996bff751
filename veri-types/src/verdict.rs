//! Classification verdicts.

use serde::{Deserialize, Serialize};

use crate::ClassLabel;

/// The result of classifying one image.
///
/// Confidence lies in `[0, 1]` but is not necessarily a calibrated
/// probability: the statistical fallback paths produce bounded scores
/// derived from image statistics rather than from a fitted model.
///
/// # Example
///
/// ```
/// use veri_types::{ClassLabel, Verdict};
///
/// let verdict = Verdict::new(ClassLabel::Real, 0.92);
/// assert!(!verdict.is_fake());
/// assert!((verdict.confidence - 0.92).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Predicted authenticity class.
    pub label: ClassLabel,

    /// Confidence score in `[0, 1]`.
    pub confidence: f32,
}

impl Verdict {
    /// Creates a new verdict.
    #[must_use]
    pub const fn new(label: ClassLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Returns `true` if the image was classified as fake.
    #[must_use]
    pub const fn is_fake(&self) -> bool {
        self.label.is_fake()
    }

    /// Validates the verdict.
    ///
    /// Returns `false` if the confidence is non-finite or outside `[0, 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.3})", self.label, self.confidence)
    }
}
