//! The training invocation surface.

use std::path::PathBuf;

use burn::tensor::backend::AutodiffBackend;
use chrono::Local;
use tracing::info;
use veri_dataset::{BatchLoader, SplitRatio, scan_dataset, split_samples};
use veri_model::{ConvNet, ConvNetConfig, checkpoint_filename};

use crate::config::TrainConfig;
use crate::error::{Result, TrainingError};
use crate::fit::fit;
use crate::history::TrainingHistory;

/// Parameters for one training run.
///
/// Mirrors the training script's flags: a required dataset root plus a
/// checkpoint directory, batch size, epoch count, and train fraction with
/// their historical defaults.
///
/// # Example
///
/// ```
/// use veri_training::TrainRequest;
///
/// let request = TrainRequest::new("./data");
/// assert_eq!(request.model_dir.to_str(), Some("./models"));
/// assert_eq!(request.config.epochs, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrainRequest {
    /// Dataset root holding `real/` and `fake/` subdirectories.
    pub data_dir: PathBuf,

    /// Directory receiving the timestamped checkpoint.
    pub model_dir: PathBuf,

    /// Epochs, batch size, split fraction, optimizer settings.
    pub config: TrainConfig,
}

impl TrainRequest {
    /// Creates a request with default checkpoint directory and config.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            model_dir: PathBuf::from("./models"),
            config: TrainConfig::default(),
        }
    }

    /// Overrides the checkpoint directory.
    #[must_use]
    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = model_dir.into();
        self
    }

    /// Overrides the training configuration.
    #[must_use]
    pub fn with_config(mut self, config: TrainConfig) -> Self {
        self.config = config;
        self
    }
}

/// The outcome of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRun {
    /// Path of the best-validation checkpoint.
    ///
    /// The file exists only if a validation pass ran and improved at
    /// least once; the path is reserved up front either way.
    pub checkpoint: PathBuf,

    /// Per-epoch history of the run.
    pub history: TrainingHistory,
}

/// Scans, splits, and trains, writing a timestamped checkpoint.
///
/// Builds the sample list from `data_dir`, partitions it with the
/// configured fraction, trains a freshly initialized network, and saves
/// the weights into `model_dir` whenever validation improves.
///
/// # Errors
///
/// Returns an error when the configuration is invalid, the checkpoint
/// directory cannot be created, the dataset is empty or unreadable, or
/// the fit itself fails.
pub fn run_training<B: AutodiffBackend>(
    request: &TrainRequest,
    device: &B::Device,
) -> Result<TrainingRun> {
    let config = &request.config;
    if !config.is_valid() {
        return Err(TrainingError::invalid_config(
            "epochs, batch size, fraction, and optimizer settings must be positive",
        ));
    }

    std::fs::create_dir_all(&request.model_dir).map_err(|e| {
        TrainingError::checkpoint_dir(request.model_dir.display().to_string(), e.to_string())
    })?;
    let checkpoint = checkpoint_filename(&request.model_dir, Local::now());

    let samples = scan_dataset(&request.data_dir)?;
    if samples.is_empty() {
        return Err(TrainingError::EmptyTrainingSet(
            request.data_dir.display().to_string(),
        ));
    }

    let ratio = SplitRatio::new(config.train_fraction)?;
    let (train, val) = split_samples(&samples, ratio, config.seed);
    info!(
        total = samples.len(),
        train = train.len(),
        val = val.len(),
        "dataset split"
    );

    let mut train_loader = BatchLoader::training(train, config.batch_size, config.seed);
    let mut val_loader = if val.is_empty() {
        None
    } else {
        Some(BatchLoader::validation(val, config.batch_size))
    };

    let model = ConvNet::<B>::new(ConvNetConfig::default(), device);
    let (_model, history) = fit(
        model,
        &mut train_loader,
        val_loader.as_mut(),
        config,
        Some(checkpoint.as_path()),
        device,
    )?;

    Ok(TrainingRun {
        checkpoint: checkpoint.with_extension("bin"),
        history,
    })
}
