//! The classic feature-based classifier.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use veri_features::{PixelBuffer, extract_features, preprocess};
use veri_types::{ClassLabel, Verdict};

use crate::error::{ModelError, Result};
use crate::forest::{Forest, ForestConfig};

/// Placeholder confidence range for the untrained path.
const PLACEHOLDER_RANGE: std::ops::Range<f32> = 0.6..0.9;

/// Training state of the classic classifier.
///
/// The untrained placeholder path is a visible variant rather than a flag,
/// so both branches can be exercised directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ForestState {
    /// No model fitted yet; `analyze` produces placeholder verdicts.
    Untrained,

    /// A fitted ensemble serving real predictions.
    Trained(Forest),
}

impl ForestState {
    /// Returns `true` if a model has been fitted.
    #[must_use]
    pub const fn is_trained(&self) -> bool {
        matches!(self, Self::Trained(_))
    }
}

/// Decision-forest classifier over the 261-element image descriptor.
///
/// `analyze` always returns a [`Verdict`]: before training it produces a
/// bounded random placeholder (so the serving path never blocks on an
/// absent model), afterwards it classifies from extracted features. The
/// placeholder generator is seedable for reproducible tests.
///
/// State is mutated only by [`ClassicClassifier::train`]; callers
/// serialize training against analysis on the same instance.
///
/// # Example
///
/// ```
/// use veri_model::ClassicClassifier;
///
/// let mut classifier = ClassicClassifier::with_seed(42);
/// assert!(!classifier.is_trained());
/// ```
#[derive(Debug)]
pub struct ClassicClassifier {
    config: ForestConfig,
    state: ForestState,
    placeholder_rng: ChaCha8Rng,
}

impl ClassicClassifier {
    /// Creates an untrained classifier with an entropy-seeded placeholder
    /// generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ForestConfig::default(),
            state: ForestState::Untrained,
            placeholder_rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates an untrained classifier with a seeded placeholder generator.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: ForestConfig::default(),
            state: ForestState::Untrained,
            placeholder_rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Overrides the ensemble configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ForestConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns `true` once a model has been fitted.
    #[must_use]
    pub const fn is_trained(&self) -> bool {
        self.state.is_trained()
    }

    /// The current training state.
    #[must_use]
    pub const fn state(&self) -> &ForestState {
        &self.state
    }

    /// Fits the ensemble on labeled pixel buffers.
    ///
    /// Extracts a descriptor for every image, stacks them into a feature
    /// matrix aligned with the labels, fits the forest, and swaps the
    /// state to [`ForestState::Trained`].
    ///
    /// # Errors
    ///
    /// Returns an error when the inputs are empty or mismatched in length,
    /// or when feature extraction fails for any image (the failure
    /// propagates with its cause).
    pub fn train(&mut self, images: &[PixelBuffer], labels: &[ClassLabel]) -> Result<()> {
        if images.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if images.len() != labels.len() {
            return Err(ModelError::length_mismatch(images.len(), labels.len()));
        }

        let mut rows = Vec::with_capacity(images.len());
        for image in images {
            let features = extract_features(image)?;
            rows.push(features.into_inner());
        }
        let targets: Vec<usize> = labels.iter().map(|l| usize::from(l.is_fake())).collect();

        let forest = Forest::fit(&rows, &targets, &self.config);
        info!(
            samples = images.len(),
            trees = forest.num_trees(),
            "classic classifier trained"
        );
        self.state = ForestState::Trained(forest);

        Ok(())
    }

    /// Classifies one image, never requiring a trained model.
    ///
    /// Untrained: a uniformly random label with confidence drawn from
    /// `[0.6, 0.9)` - the pixels are not consulted. Trained: preprocess,
    /// extract the descriptor, and read the ensemble's class
    /// probabilities; the label is fake iff `P(fake) > 0.5` and the
    /// confidence is the larger class probability.
    ///
    /// # Errors
    ///
    /// Only the trained path can fail, on undecodable bytes or feature
    /// extraction errors.
    pub fn analyze(&mut self, bytes: &[u8]) -> Result<Verdict> {
        match &self.state {
            ForestState::Untrained => {
                let label = if self.placeholder_rng.gen_bool(0.5) {
                    ClassLabel::Fake
                } else {
                    ClassLabel::Real
                };
                let confidence = self.placeholder_rng.gen_range(PLACEHOLDER_RANGE);
                Ok(Verdict::new(label, confidence))
            }
            ForestState::Trained(forest) => {
                let pixels = preprocess(bytes)?;
                let features = extract_features(&pixels)?;
                let probs = forest.predict_proba(features.as_slice());

                let label = ClassLabel::from_score(probs[1]);
                Ok(Verdict::new(label, probs[0].max(probs[1])))
            }
        }
    }
}

impl Default for ClassicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn solid_buffer(value: u8) -> PixelBuffer {
        PixelBuffer::new(vec![value; 16 * 16 * 3], 16, 16, 3).unwrap()
    }

    fn encode_png(value: u8) -> Vec<u8> {
        let image = image::RgbImage::from_pixel(32, 32, image::Rgb([value, value, value]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn untrained_placeholder_bounds() {
        let mut classifier = ClassicClassifier::with_seed(11);

        for _ in 0..50 {
            let verdict = classifier.analyze(b"whatever").unwrap();
            assert!(verdict.confidence >= 0.6);
            assert!(verdict.confidence < 0.9);
        }
    }

    #[test]
    fn untrained_ignores_bytes() {
        // The placeholder path never touches the pixels, so corrupt bytes
        // still produce a verdict.
        let mut classifier = ClassicClassifier::with_seed(5);
        assert!(classifier.analyze(&[0xff, 0x00]).is_ok());
    }

    #[test]
    fn untrained_seeded_reproducible() {
        let mut a = ClassicClassifier::with_seed(42);
        let mut b = ClassicClassifier::with_seed(42);

        for _ in 0..10 {
            assert_eq!(
                a.analyze(b"x").unwrap(),
                b.analyze(b"x").unwrap()
            );
        }
    }

    #[test]
    fn untrained_varies_across_calls() {
        let mut classifier = ClassicClassifier::with_seed(3);
        let verdicts: Vec<Verdict> = (0..20)
            .map(|_| classifier.analyze(b"x").unwrap())
            .collect();

        let first = verdicts[0];
        assert!(verdicts.iter().any(|v| v != &first));
    }

    #[test]
    fn train_rejects_empty() {
        let mut classifier = ClassicClassifier::with_seed(1);
        assert!(matches!(
            classifier.train(&[], &[]),
            Err(ModelError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn train_rejects_mismatched_lengths() {
        let mut classifier = ClassicClassifier::with_seed(1);
        let images = vec![solid_buffer(10), solid_buffer(200)];
        let labels = vec![ClassLabel::Real];

        assert!(matches!(
            classifier.train(&images, &labels),
            Err(ModelError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn train_then_classify_separable() {
        let mut classifier =
            ClassicClassifier::with_seed(1).with_config(ForestConfig::new(20));

        // Dark images are real, bright images are fake.
        let mut images = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10_u8 {
            images.push(solid_buffer(10 + i));
            labels.push(ClassLabel::Real);
            images.push(solid_buffer(240 - i));
            labels.push(ClassLabel::Fake);
        }

        classifier.train(&images, &labels).unwrap();
        assert!(classifier.is_trained());

        let dark = classifier.analyze(&encode_png(15)).unwrap();
        assert_eq!(dark.label, ClassLabel::Real);
        assert!(dark.confidence > 0.5);

        let bright = classifier.analyze(&encode_png(235)).unwrap();
        assert_eq!(bright.label, ClassLabel::Fake);
        assert!(bright.confidence > 0.5);
    }

    #[test]
    fn trained_rejects_garbage_bytes() {
        let mut classifier = ClassicClassifier::with_seed(1).with_config(ForestConfig::new(5));
        let images = vec![solid_buffer(10), solid_buffer(240)];
        let labels = vec![ClassLabel::Real, ClassLabel::Fake];
        classifier.train(&images, &labels).unwrap();

        assert!(matches!(
            classifier.analyze(b"not an image"),
            Err(ModelError::Feature(_))
        ));
    }

    #[test]
    fn state_visible_transition() {
        let mut classifier = ClassicClassifier::with_seed(1).with_config(ForestConfig::new(3));
        assert_eq!(classifier.state(), &ForestState::Untrained);

        let images = vec![solid_buffer(0), solid_buffer(255)];
        let labels = vec![ClassLabel::Real, ClassLabel::Fake];
        classifier.train(&images, &labels).unwrap();

        assert!(classifier.state().is_trained());
    }
}
