//! Normalization statistics for the neural preprocessing path.

use serde::{Deserialize, Serialize};

/// Per-channel normalization statistics.
///
/// Applied to `[0, 1]`-scaled RGB values as `(value - mean) / std`.
///
/// # Example
///
/// ```
/// use veri_types::ImageStats;
///
/// let stats = ImageStats::IMAGENET;
/// let raw = 128.0 / 255.0;
/// let normalized = stats.normalize(raw, 0);
/// assert!(normalized.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    /// Per-channel mean values (typically in `[0, 1]`).
    pub mean: [f32; 3],

    /// Per-channel standard deviation values.
    pub std: [f32; 3],
}

impl ImageStats {
    /// Creates new normalization statistics.
    #[must_use]
    pub const fn new(mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { mean, std }
    }

    /// `ImageNet` normalization statistics.
    ///
    /// The fixed constants the classifier transform uses for every input.
    pub const IMAGENET: Self = Self {
        mean: [0.485, 0.456, 0.406],
        std: [0.229, 0.224, 0.225],
    };

    /// Unity normalization (mean 0, std 1) - leaves values unchanged.
    pub const UNITY: Self = Self {
        mean: [0.0, 0.0, 0.0],
        std: [1.0, 1.0, 1.0],
    };

    /// Normalizes a single value for the given channel.
    #[must_use]
    pub fn normalize(&self, value: f32, channel: usize) -> f32 {
        if channel >= 3 {
            return value;
        }
        (value - self.mean[channel]) / self.std[channel]
    }

    /// Denormalizes a single value for the given channel.
    #[must_use]
    pub fn denormalize(&self, value: f32, channel: usize) -> f32 {
        if channel >= 3 {
            return value;
        }
        value.mul_add(self.std[channel], self.mean[channel])
    }

    /// Validates the statistics.
    ///
    /// Returns `false` if std contains zeros or non-finite values.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.std.iter().all(|&s| s.is_finite() && s.abs() > 1e-10)
            && self.mean.iter().all(|m| m.is_finite())
    }
}

impl Default for ImageStats {
    fn default() -> Self {
        Self::IMAGENET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_imagenet() {
        let stats = ImageStats::IMAGENET;
        assert!(stats.is_valid());
        assert!((stats.mean[0] - 0.485).abs() < 1e-6);
        assert!((stats.std[2] - 0.225).abs() < 1e-6);
    }

    #[test]
    fn stats_normalize_unity() {
        let stats = ImageStats::UNITY;
        assert!((stats.normalize(0.7, 0) - 0.7).abs() < 1e-6);
        assert!((stats.normalize(0.7, 2) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn stats_round_trip() {
        let stats = ImageStats::IMAGENET;
        let original = 0.75;
        let normalized = stats.normalize(original, 1);
        let restored = stats.denormalize(normalized, 1);
        assert!((restored - original).abs() < 1e-6);
    }

    #[test]
    fn stats_out_of_range_channel() {
        let stats = ImageStats::IMAGENET;
        assert!((stats.normalize(0.5, 7) - 0.5).abs() < 1e-6);
        assert!((stats.denormalize(0.5, 7) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stats_validity() {
        assert!(ImageStats::IMAGENET.is_valid());

        let zero_std = ImageStats::new([0.5, 0.5, 0.5], [0.0, 0.5, 0.5]);
        assert!(!zero_std.is_valid());

        let nan_mean = ImageStats::new([f32::NAN, 0.5, 0.5], [0.5, 0.5, 0.5]);
        assert!(!nan_mean.is_valid());
    }

    #[test]
    fn stats_serialization() {
        let stats = ImageStats::IMAGENET;
        let json = serde_json::to_string(&stats);
        assert!(json.is_ok());

        let parsed: Result<ImageStats, _> = serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or(ImageStats::UNITY), stats);
    }
}
