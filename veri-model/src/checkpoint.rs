//! Checkpoint persistence for model weights.

use std::path::{Path, PathBuf};

use burn::module::Module;
use burn::prelude::Backend;
use burn::record::{BinFileRecorder, FullPrecisionSettings, Recorder};
use chrono::{DateTime, Local};

use crate::error::{ModelError, Result};

/// Filename prefix for serving checkpoints.
pub const CHECKPOINT_PREFIX: &str = "fake_detector";

/// Builds a timestamped checkpoint path inside `dir`.
///
/// The name follows the `fake_detector_YYYYmmdd_HHMMSS` convention the
/// training script has always produced; the binary recorder appends its
/// own `.bin` extension when the file is written.
///
/// # Example
///
/// ```
/// use veri_model::checkpoint_filename;
/// use chrono::TimeZone;
///
/// let at = chrono::Local.with_ymd_and_hms(2024, 3, 1, 13, 30, 5).unwrap();
/// let path = checkpoint_filename("./models", at);
/// assert!(path.ends_with("fake_detector_20240301_133005"));
/// ```
#[must_use]
pub fn checkpoint_filename(dir: impl AsRef<Path>, at: DateTime<Local>) -> PathBuf {
    dir.as_ref()
        .join(format!("{CHECKPOINT_PREFIX}_{}", at.format("%Y%m%d_%H%M%S")))
}

/// Saves a model's parameter state to `path`.
///
/// Uses Burn's binary recorder at full precision. The recorder appends the
/// `.bin` extension; the returned path includes it. An existing checkpoint
/// at the same path is overwritten.
///
/// # Errors
///
/// Returns [`ModelError::SaveCheckpoint`] if writing fails.
pub fn save_checkpoint<B, M>(model: &M, path: impl AsRef<Path>) -> Result<PathBuf>
where
    B: Backend,
    M: Module<B>,
{
    let path = path.as_ref();
    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(model.clone().into_record(), path.to_path_buf())
        .map_err(|e| ModelError::save_checkpoint(path.display().to_string(), e.to_string()))?;

    Ok(path.with_extension("bin"))
}

/// Loads a model's parameter state from `path`.
///
/// Accepts the path with or without the `.bin` extension.
///
/// # Errors
///
/// Returns [`ModelError::CheckpointNotFound`] if the file does not exist,
/// or [`ModelError::LoadCheckpoint`] if it cannot be decoded into this
/// model's record.
pub fn load_checkpoint<B, M>(model: M, path: impl AsRef<Path>, device: &B::Device) -> Result<M>
where
    B: Backend,
    M: Module<B>,
{
    let path = path.as_ref();
    let file = path.with_extension("bin");
    if !file.exists() {
        return Err(ModelError::checkpoint_not_found(file.display().to_string()));
    }

    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    model
        .load_file(path.to_path_buf(), &recorder, device)
        .map_err(|e| ModelError::load_checkpoint(file.display().to_string(), e.to_string()))
}
