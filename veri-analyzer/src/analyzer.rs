//! The per-request analysis entry points.

use std::sync::Mutex;

use burn::prelude::Backend;
use serde::Serialize;
use veri_metadata::ImageMetadata;
use veri_model::{ClassicClassifier, NeuralClassifier};
use veri_types::{ClassLabel, Verdict};

use crate::error::Result;

/// One analysis response: the verdict plus any capture metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// The authenticity verdict.
    pub verdict: Verdict,

    /// Best-effort capture metadata (may be empty).
    pub metadata: ImageMetadata,
}

/// The composed analysis surface handed to a serving layer.
///
/// Owns both classifiers. The classic classifier is the only mutable piece
/// (training refits it), so it lives behind a lock: `train` serializes
/// against concurrent `analyze` calls on the same instance, and nothing
/// else shares state.
///
/// Construct one `Analyzer` at startup and inject it into the request
/// path; there is no global instance.
pub struct Analyzer<B: Backend> {
    classic: Mutex<ClassicClassifier>,
    neural: NeuralClassifier<B>,
}

impl<B: Backend> Analyzer<B> {
    /// Composes an analyzer from its classifiers.
    #[must_use]
    pub fn new(classic: ClassicClassifier, neural: NeuralClassifier<B>) -> Self {
        Self {
            classic: Mutex::new(classic),
            neural,
        }
    }

    /// Classic feature-based classification.
    ///
    /// Before the classifier has been trained this returns a bounded
    /// placeholder verdict; afterwards it classifies from extracted
    /// features. Never requires a trained model.
    ///
    /// # Errors
    ///
    /// Only the trained path can fail, on undecodable bytes.
    pub fn analyze(&self, bytes: &[u8]) -> Result<Verdict> {
        Ok(self.lock_classic().analyze(bytes)?)
    }

    /// Neural-path classification.
    ///
    /// Scores deterministically from the normalized input tensor's
    /// statistics; see the model crate for the serving semantics.
    ///
    /// # Errors
    ///
    /// Fails on undecodable bytes.
    pub fn predict(&self, bytes: &[u8]) -> Result<Verdict> {
        Ok(self.neural.predict(bytes)?)
    }

    /// Best-effort capture metadata.
    ///
    /// Never fails; corrupt input yields an empty map.
    #[must_use]
    pub fn extract_metadata(&self, bytes: &[u8]) -> ImageMetadata {
        veri_metadata::extract(bytes)
    }

    /// Classifies and extracts metadata in one call.
    ///
    /// This is the response shape the analyze route returns: the classic
    /// verdict enriched with whatever metadata the image carries.
    ///
    /// # Errors
    ///
    /// Fails only when the classification path fails; metadata problems
    /// are absorbed.
    pub fn report(&self, bytes: &[u8]) -> Result<AnalysisReport> {
        let verdict = self.analyze(bytes)?;
        let metadata = self.extract_metadata(bytes);
        Ok(AnalysisReport { verdict, metadata })
    }

    /// Trains the classic classifier on labeled pixel buffers.
    ///
    /// Holds the classifier lock for the duration, so in-flight `analyze`
    /// calls complete first and later ones see the new model.
    ///
    /// # Errors
    ///
    /// Propagates training failures (empty input, length mismatch,
    /// feature extraction).
    pub fn train_classic(
        &self,
        images: &[veri_features::PixelBuffer],
        labels: &[ClassLabel],
    ) -> Result<()> {
        Ok(self.lock_classic().train(images, labels)?)
    }

    /// Returns `true` once the classic classifier has been trained.
    #[must_use]
    pub fn is_classic_trained(&self) -> bool {
        self.lock_classic().is_trained()
    }

    fn lock_classic(&self) -> std::sync::MutexGuard<'_, ClassicClassifier> {
        // A poisoned lock still holds a usable classifier.
        self.classic
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
