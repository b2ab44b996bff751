//! Dataset sample types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use veri_types::ClassLabel;

/// One labeled image file discovered on disk.
///
/// Samples are immutable once discovered; the scan owns their creation and
/// nothing mutates them afterwards.
///
/// # Example
///
/// ```
/// use veri_dataset::ImageSample;
/// use veri_types::ClassLabel;
///
/// let sample = ImageSample::new("data/real/photo_001.jpg", ClassLabel::Real);
/// assert_eq!(sample.label, ClassLabel::Real);
/// assert!((sample.target() - 0.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSample {
    /// Path to the image file.
    pub path: PathBuf,

    /// Authenticity class of the file.
    pub label: ClassLabel,
}

impl ImageSample {
    /// Creates a new sample.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, label: ClassLabel) -> Self {
        Self {
            path: path.into(),
            label,
        }
    }

    /// The numeric training target (0.0 for real, 1.0 for fake).
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.label.as_f32()
    }

    /// The sample's file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_new() {
        let sample = ImageSample::new("x/fake/img.png", ClassLabel::Fake);
        assert_eq!(sample.path(), Path::new("x/fake/img.png"));
        assert_eq!(sample.label, ClassLabel::Fake);
        assert!((sample.target() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sample_serialization() {
        let sample = ImageSample::new("a/b.jpg", ClassLabel::Real);
        let json = serde_json::to_string(&sample);
        assert!(json.is_ok());

        let parsed: std::result::Result<ImageSample, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap(), sample);
    }
}
