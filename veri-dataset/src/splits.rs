//! Train/validation splitting.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};
use crate::sample::ImageSample;

/// Fraction of a dataset used for training.
///
/// The remainder goes to validation. The training size is the floor of
/// `fraction * total`, so a 0.8 split of 10 samples yields 8 train and
/// 2 validation samples.
///
/// # Example
///
/// ```
/// use veri_dataset::SplitRatio;
///
/// let ratio = SplitRatio::new(0.8)?;
/// assert_eq!(ratio.train_size(10), 8);
/// assert_eq!(ratio.val_size(10), 2);
/// # Ok::<(), veri_dataset::DatasetError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatio {
    fraction: f32,
}

impl SplitRatio {
    /// Common 80/20 split.
    pub const EIGHTY_TWENTY: Self = Self { fraction: 0.8 };

    /// Creates a new split ratio.
    ///
    /// # Errors
    ///
    /// Returns an error unless the fraction lies in `(0, 1]`.
    pub fn new(fraction: f32) -> Result<Self> {
        if fraction > 0.0 && fraction <= 1.0 {
            Ok(Self { fraction })
        } else {
            Err(DatasetError::InvalidSplitRatio(fraction))
        }
    }

    /// The training fraction.
    #[must_use]
    pub const fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Number of training samples for a dataset of `total`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn train_size(&self, total: usize) -> usize {
        (self.fraction * total as f32).floor() as usize
    }

    /// Number of validation samples for a dataset of `total`.
    #[must_use]
    pub fn val_size(&self, total: usize) -> usize {
        total - self.train_size(total)
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self::EIGHTY_TWENTY
    }
}

/// Partitions samples into disjoint train and validation subsets.
///
/// The partition is a random permutation: together the two subsets cover
/// every sample exactly once. Pass a seed for a reproducible split.
///
/// # Example
///
/// ```
/// use veri_dataset::{ImageSample, SplitRatio, split_samples};
/// use veri_types::ClassLabel;
///
/// let samples: Vec<ImageSample> = (0..10)
///     .map(|i| ImageSample::new(format!("r/{i}.png"), ClassLabel::Real))
///     .collect();
///
/// let (train, val) = split_samples(&samples, SplitRatio::EIGHTY_TWENTY, Some(42));
/// assert_eq!(train.len(), 8);
/// assert_eq!(val.len(), 2);
/// ```
#[must_use]
pub fn split_samples(
    samples: &[ImageSample],
    ratio: SplitRatio,
    seed: Option<u64>,
) -> (Vec<ImageSample>, Vec<ImageSample>) {
    if samples.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut indices: Vec<usize> = (0..samples.len()).collect();
    let mut rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    indices.shuffle(&mut rng);

    let split = ratio.train_size(samples.len());
    let train = indices[..split].iter().map(|&i| samples[i].clone()).collect();
    let val = indices[split..].iter().map(|&i| samples[i].clone()).collect();

    (train, val)
}
