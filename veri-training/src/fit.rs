//! The epoch loop.

use std::path::Path;

use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::Backend;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{Tensor, TensorData};
use tracing::info;
use veri_dataset::{Batch, BatchLoader, DatasetError};
use veri_features::INPUT_SIZE;
use veri_model::{ConvNet, save_checkpoint};

use crate::config::TrainConfig;
use crate::error::{Result, TrainingError};
use crate::history::{EpochRecord, TrainingHistory};
use crate::loss::{binary_cross_entropy, count_correct, scalar};

/// Trains the network, returning it with the accumulated history.
///
/// Per epoch: iterate shuffled training batches - forward pass, binary
/// cross-entropy against the 0/1 targets, backward pass, Adam step - and
/// accumulate mean loss plus 0.5-threshold accuracy. When a validation
/// loader is supplied, an evaluation pass with the same loss and threshold
/// logic runs on the non-autodiff module; an epoch that achieves the
/// lowest validation loss so far persists the weights to `save_path`,
/// overwriting any prior checkpoint.
///
/// The history gains one record per epoch regardless of whether
/// validation ran.
///
/// # Errors
///
/// Returns an error for an invalid configuration, an empty training
/// loader, a batch that fails to load, or a checkpoint that fails to
/// write.
pub fn fit<B: AutodiffBackend>(
    mut model: ConvNet<B>,
    train_loader: &mut BatchLoader,
    mut val_loader: Option<&mut BatchLoader>,
    config: &TrainConfig,
    save_path: Option<&Path>,
    device: &B::Device,
) -> Result<(ConvNet<B>, TrainingHistory)> {
    if !config.is_valid() {
        return Err(TrainingError::invalid_config(
            "epochs, batch size, fraction, and optimizer settings must be positive",
        ));
    }
    if train_loader.is_empty() {
        return Err(TrainingError::Dataset(DatasetError::EmptyDataset));
    }

    let mut optim = AdamConfig::new()
        .with_beta_1(config.beta1)
        .with_beta_2(config.beta2)
        .with_epsilon(config.epsilon)
        .init();

    let mut history = TrainingHistory::new();

    for epoch in 0..config.epochs {
        let mut running_loss = 0.0_f32;
        let mut correct = 0_usize;
        let mut seen = 0_usize;
        let mut batches = 0_usize;

        for batch in train_loader.epoch() {
            let batch = batch?;
            let batch_len = batch.len;
            let (images, targets) = batch_tensors::<B>(batch, device);

            let output = model.forward(images);
            let loss = binary_cross_entropy(output.clone(), targets.clone());

            running_loss += scalar(loss.clone());
            correct += count_correct(output, targets);
            seen += batch_len;
            batches += 1;

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(config.learning_rate, model, grads);
        }

        let record = EpochRecord::new(
            epoch,
            mean(running_loss, batches),
            accuracy(correct, seen),
        );

        let record = match val_loader.as_deref_mut() {
            Some(loader) if !loader.is_empty() => {
                let (val_loss, val_accuracy) = evaluate(&model.valid(), loader, device)?;
                record.with_validation(val_loss, val_accuracy)
            }
            _ => record,
        };

        let improved = history.push(record);
        if improved {
            if let Some(path) = save_path {
                let written = save_checkpoint::<B::InnerBackend, _>(&model.valid(), path)?;
                info!(checkpoint = %written.display(), "validation improved, checkpoint saved");
            }
        }

        info!(
            epoch = epoch + 1,
            total = config.epochs,
            train_loss = record.train_loss,
            train_accuracy = record.train_accuracy,
            val_loss = record.val_loss,
            val_accuracy = record.val_accuracy,
            "epoch complete"
        );
    }

    Ok((model, history))
}

/// No-gradient evaluation pass over a loader.
fn evaluate<B: Backend>(
    model: &ConvNet<B>,
    loader: &mut BatchLoader,
    device: &B::Device,
) -> Result<(f32, f32)> {
    let mut running_loss = 0.0_f32;
    let mut correct = 0_usize;
    let mut seen = 0_usize;
    let mut batches = 0_usize;

    for batch in loader.epoch() {
        let batch = batch?;
        let batch_len = batch.len;
        let (images, targets) = batch_tensors::<B>(batch, device);

        let output = model.forward(images);
        let loss = binary_cross_entropy(output.clone(), targets.clone());

        running_loss += scalar(loss);
        correct += count_correct(output, targets);
        seen += batch_len;
        batches += 1;
    }

    Ok((mean(running_loss, batches), accuracy(correct, seen)))
}

fn batch_tensors<B: Backend>(batch: Batch, device: &B::Device) -> (Tensor<B, 4>, Tensor<B, 2>) {
    let size = INPUT_SIZE as usize;
    let images = Tensor::from_data(TensorData::new(batch.images, [batch.len, 3, size, size]), device);
    let targets = Tensor::from_data(TensorData::new(batch.targets, [batch.len, 1]), device);
    (images, targets)
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: f32, count: usize) -> f32 {
    if count == 0 { 0.0 } else { total / count as f32 }
}

#[allow(clippy::cast_precision_loss)]
fn accuracy(correct: usize, seen: usize) -> f32 {
    if seen == 0 {
        0.0
    } else {
        correct as f32 / seen as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::Autodiff;
    use burn_ndarray::NdArray;
    use std::io::Cursor;
    use veri_dataset::ImageSample;
    use veri_model::ConvNetConfig;
    use veri_types::ClassLabel;

    type TestBackend = Autodiff<NdArray<f32>>;

    fn write_png(path: &Path, value: u8) {
        let image = image::RgbImage::from_pixel(32, 32, image::Rgb([value, value, value]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn fit_rejects_empty_loader() {
        let device = Default::default();
        let model = ConvNet::<TestBackend>::new(ConvNetConfig::default(), &device);
        let mut loader = BatchLoader::training(Vec::new(), 4, Some(1));

        let result = fit(
            model,
            &mut loader,
            None,
            &TrainConfig::new(1),
            None,
            &device,
        );
        assert!(matches!(
            result,
            Err(TrainingError::Dataset(DatasetError::EmptyDataset))
        ));
    }

    #[test]
    fn fit_rejects_invalid_config() {
        let device = Default::default();
        let model = ConvNet::<TestBackend>::new(ConvNetConfig::default(), &device);
        let mut loader = BatchLoader::training(Vec::new(), 4, Some(1));

        let result = fit(
            model,
            &mut loader,
            None,
            &TrainConfig::new(0),
            None,
            &device,
        );
        assert!(matches!(result, Err(TrainingError::InvalidConfig(_))));
    }

    #[test]
    fn fit_one_epoch_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.png");
        let fake = dir.path().join("fake.png");
        write_png(&real, 20);
        write_png(&fake, 230);

        let samples = vec![
            ImageSample::new(real, ClassLabel::Real),
            ImageSample::new(fake, ClassLabel::Fake),
        ];
        let mut loader = BatchLoader::training(samples, 2, Some(42));

        let device = Default::default();
        let model = ConvNet::<TestBackend>::new(ConvNetConfig::default(), &device);
        let config = TrainConfig::new(1).with_batch_size(2).with_seed(42);

        let (_model, history) = fit(model, &mut loader, None, &config, None, &device).unwrap();

        assert_eq!(history.len(), 1);
        let record = history.records[0];
        assert!(record.train_loss.is_finite());
        assert!((0.0..=1.0).contains(&record.train_accuracy));
        assert!(record.val_loss.is_none());
    }

    #[test]
    fn helpers_handle_zero_counts() {
        assert!((mean(0.0, 0) - 0.0).abs() < 1e-6);
        assert!((accuracy(0, 0) - 0.0).abs() < 1e-6);
        assert!((mean(6.0, 3) - 2.0).abs() < 1e-6);
        assert!((accuracy(3, 4) - 0.75).abs() < 1e-6);
    }
}
