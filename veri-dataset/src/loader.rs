//! Batch materialization with pipeline prefetch.

use std::collections::{BTreeMap, VecDeque};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::warn;
use veri_features::{TENSOR_LEN, preprocess, to_tensor_data};
use veri_types::ImageStats;

use crate::error::{DatasetError, Result};
use crate::sample::ImageSample;

/// Number of prefetch workers preparing upcoming batches.
///
/// Two workers give pipeline overlap between decoding the next batch and
/// consuming the current one; each worker owns its batch until handoff, so
/// no shared state is mutated.
pub const PREFETCH_WORKERS: usize = 2;

/// One materialized sample: normalized CHW tensor data plus its target.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorSample {
    /// Normalized image data, `3 * 224 * 224` values in CHW order.
    pub image: Vec<f32>,

    /// Training target: 0.0 for real, 1.0 for fake.
    pub target: f32,
}

/// Materializes one sample from disk.
///
/// Reads the file, decodes, stretches to the fixed 224x224 input, and
/// normalizes with the given statistics.
///
/// # Errors
///
/// Returns [`DatasetError::LoadSample`] when the file cannot be read or
/// decoded.
pub fn load_sample(sample: &ImageSample, stats: &ImageStats) -> Result<TensorSample> {
    let path = sample.path.display().to_string();
    let bytes =
        std::fs::read(&sample.path).map_err(|e| DatasetError::load_sample(&path, e.to_string()))?;

    let pixels =
        preprocess(&bytes).map_err(|e| DatasetError::load_sample(&path, e.to_string()))?;
    let image = to_tensor_data(&pixels, stats)
        .map_err(|e| DatasetError::load_sample(&path, e.to_string()))?;

    Ok(TensorSample {
        image,
        target: sample.target(),
    })
}

/// A batch of materialized samples.
///
/// Image data is concatenated sample-major: `len * 3 * 224 * 224` values,
/// ready to view as a `[len, 3, 224, 224]` tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Concatenated normalized image data.
    pub images: Vec<f32>,

    /// One target per sample (0.0 real, 1.0 fake).
    pub targets: Vec<f32>,

    /// Number of samples in this batch.
    pub len: usize,
}

impl Batch {
    /// Returns `true` if the batch holds no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Batched epoch iteration over a set of samples.
///
/// Training loaders reshuffle sample order on every [`BatchLoader::epoch`]
/// call; validation loaders keep a fixed order across epochs. Batches are
/// prepared by [`PREFETCH_WORKERS`] background threads and delivered in
/// order.
///
/// # Example
///
/// ```no_run
/// use veri_dataset::{BatchLoader, scan_dataset};
///
/// let samples = scan_dataset("./data")?;
/// let mut loader = BatchLoader::training(samples, 32, Some(42));
///
/// for batch in loader.epoch() {
///     let batch = batch?;
///     println!("batch of {}", batch.len);
/// }
/// # Ok::<(), veri_dataset::DatasetError>(())
/// ```
#[derive(Debug)]
pub struct BatchLoader {
    samples: Arc<Vec<ImageSample>>,
    batch_size: usize,
    shuffle: bool,
    stats: ImageStats,
    rng: ChaCha8Rng,
}

impl BatchLoader {
    /// Creates a training loader (reshuffles every epoch).
    ///
    /// A zero `batch_size` is clamped to 1.
    #[must_use]
    pub fn training(samples: Vec<ImageSample>, batch_size: usize, seed: Option<u64>) -> Self {
        Self {
            samples: Arc::new(samples),
            batch_size: batch_size.max(1),
            shuffle: true,
            stats: ImageStats::IMAGENET,
            rng: seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64),
        }
    }

    /// Creates a validation loader (fixed sample order).
    ///
    /// A zero `batch_size` is clamped to 1.
    #[must_use]
    pub fn validation(samples: Vec<ImageSample>, batch_size: usize) -> Self {
        Self {
            samples: Arc::new(samples),
            batch_size: batch_size.max(1),
            shuffle: false,
            stats: ImageStats::IMAGENET,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Overrides the normalization statistics.
    #[must_use]
    pub const fn with_stats(mut self, stats: ImageStats) -> Self {
        self.stats = stats;
        self
    }

    /// Number of samples behind this loader.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the loader has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of batches per epoch.
    #[must_use]
    pub fn num_batches(&self) -> usize {
        self.samples.len().div_ceil(self.batch_size)
    }

    /// Starts one epoch, returning an in-order batch iterator.
    ///
    /// For training loaders this advances the shuffle generator, so each
    /// epoch visits samples in a fresh order.
    pub fn epoch(&mut self) -> EpochIter {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }

        let jobs: VecDeque<(usize, Vec<usize>)> = order
            .chunks(self.batch_size)
            .map(<[usize]>::to_vec)
            .enumerate()
            .collect();
        let total = jobs.len();

        let queue = Arc::new(Mutex::new(jobs));
        let (tx, rx) = mpsc::sync_channel(PREFETCH_WORKERS);

        for _ in 0..PREFETCH_WORKERS {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let samples = Arc::clone(&self.samples);
            let stats = self.stats;

            std::thread::spawn(move || {
                loop {
                    let job = {
                        let Ok(mut queue) = queue.lock() else {
                            return;
                        };
                        queue.pop_front()
                    };
                    let Some((index, sample_indices)) = job else {
                        return;
                    };

                    let batch = build_batch(&samples, &sample_indices, &stats);
                    if tx.send((index, batch)).is_err() {
                        // Receiver dropped mid-epoch; nothing left to do.
                        return;
                    }
                }
            });
        }

        EpochIter {
            rx,
            pending: BTreeMap::new(),
            next_index: 0,
            total,
        }
    }
}

fn build_batch(
    samples: &[ImageSample],
    indices: &[usize],
    stats: &ImageStats,
) -> Result<Batch> {
    let mut images = Vec::with_capacity(indices.len() * TENSOR_LEN);
    let mut targets = Vec::with_capacity(indices.len());

    for &i in indices {
        let sample = load_sample(&samples[i], stats)?;
        images.extend_from_slice(&sample.image);
        targets.push(sample.target);
    }

    Ok(Batch {
        images,
        targets,
        len: indices.len(),
    })
}

/// In-order iterator over one epoch's batches.
///
/// Returned by [`BatchLoader::epoch`]. Yields `Result<Batch>`; a sample
/// that fails to load surfaces as an error in its batch's position.
#[derive(Debug)]
pub struct EpochIter {
    rx: mpsc::Receiver<(usize, Result<Batch>)>,
    pending: BTreeMap<usize, Result<Batch>>,
    next_index: usize,
    total: usize,
}

impl Iterator for EpochIter {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total {
            return None;
        }

        loop {
            if let Some(batch) = self.pending.remove(&self.next_index) {
                self.next_index += 1;
                return Some(batch);
            }

            match self.rx.recv() {
                Ok((index, batch)) => {
                    self.pending.insert(index, batch);
                }
                Err(_) => {
                    // Workers are gone but batches are still owed.
                    warn!("prefetch workers exited early");
                    self.next_index = self.total;
                    return Some(Err(DatasetError::WorkerLost));
                }
            }
        }
    }
}
