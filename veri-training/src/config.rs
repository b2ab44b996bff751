//! Training configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a training run.
///
/// Defaults match the training script's historical flags: 10 epochs,
/// batches of 32, an 80/20 split, and Adam at its stock hyperparameters.
///
/// # Example
///
/// ```
/// use veri_training::TrainConfig;
///
/// let config = TrainConfig::default();
/// assert_eq!(config.epochs, 10);
/// assert_eq!(config.batch_size, 32);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of training epochs.
    pub epochs: usize,

    /// Batch size.
    pub batch_size: usize,

    /// Fraction of samples used for training (remainder validates).
    pub train_fraction: f32,

    /// Adam learning rate.
    pub learning_rate: f64,

    /// Adam first-moment decay.
    pub beta1: f32,

    /// Adam second-moment decay.
    pub beta2: f32,

    /// Adam numerical-stability epsilon.
    pub epsilon: f32,

    /// Seed for splitting and epoch shuffling.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 32,
            train_fraction: 0.8,
            learning_rate: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Creates a config with the given epoch count.
    #[must_use]
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            ..Self::default()
        }
    }

    /// Sets the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the train fraction.
    #[must_use]
    pub const fn with_train_fraction(mut self, train_fraction: f32) -> Self {
        self.train_fraction = train_fraction;
        self
    }

    /// Sets the learning rate.
    #[must_use]
    pub const fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.epochs > 0
            && self.batch_size > 0
            && self.train_fraction > 0.0
            && self.train_fraction <= 1.0
            && self.learning_rate > 0.0
            && (0.0..1.0).contains(&self.beta1)
            && (0.0..1.0).contains(&self.beta2)
            && self.epsilon > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = TrainConfig::default();
        assert_eq!(config.epochs, 10);
        assert_eq!(config.batch_size, 32);
        assert!((config.train_fraction - 0.8).abs() < 1e-6);
        assert!((config.learning_rate - 1e-3).abs() < 1e-9);
        assert!((config.beta1 - 0.9).abs() < 1e-6);
        assert!(config.is_valid());
    }

    #[test]
    fn config_builder() {
        let config = TrainConfig::new(5)
            .with_batch_size(8)
            .with_train_fraction(0.9)
            .with_learning_rate(5e-4)
            .with_seed(42);

        assert_eq!(config.epochs, 5);
        assert_eq!(config.batch_size, 8);
        assert!((config.train_fraction - 0.9).abs() < 1e-6);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn config_invalid_values() {
        assert!(!TrainConfig::new(0).is_valid());
        assert!(!TrainConfig::default().with_batch_size(0).is_valid());
        assert!(!TrainConfig::default().with_train_fraction(0.0).is_valid());
        assert!(!TrainConfig::default().with_train_fraction(1.5).is_valid());
        assert!(!TrainConfig::default().with_learning_rate(0.0).is_valid());
    }

    #[test]
    fn config_serialization() {
        let config = TrainConfig::default();
        let json = serde_json::to_string(&config);
        assert!(json.is_ok());

        let parsed: std::result::Result<TrainConfig, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or_default(), config);
    }
}
