//! The fixed-length numeric image descriptor.

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::pixels::PixelBuffer;

/// Number of intensity histogram bins (one per 8-bit level).
pub const HISTOGRAM_BINS: usize = 256;

/// Total descriptor length: histogram + mean/std/max/min + edge density.
pub const FEATURE_LEN: usize = HISTOGRAM_BINS + 4 + 1;

/// Low gradient threshold for the edge map.
pub const EDGE_LOW: i32 = 100;

/// High gradient threshold for the edge map.
pub const EDGE_HIGH: i32 = 200;

/// A fixed-length numeric descriptor of one image.
///
/// Layout, in order: 256 histogram bin counts, grayscale mean, grayscale
/// standard deviation, grayscale maximum, grayscale minimum, mean edge-map
/// value. The length is [`FEATURE_LEN`] for every valid input.
///
/// # Example
///
/// ```
/// use veri_features::{FeatureVector, FEATURE_LEN};
///
/// let features = FeatureVector::from_components([0.0; 256], [1.0, 0.0, 1.0, 1.0], 0.0);
/// assert_eq!(features.len(), FEATURE_LEN);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Assembles a descriptor from its components.
    #[must_use]
    pub fn from_components(
        histogram: [f32; HISTOGRAM_BINS],
        stats: [f32; 4],
        edge_mean: f32,
    ) -> Self {
        let mut values = Vec::with_capacity(FEATURE_LEN);
        values.extend_from_slice(&histogram);
        values.extend_from_slice(&stats);
        values.push(edge_mean);
        Self(values)
    }

    /// Descriptor length (always [`FEATURE_LEN`]).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the descriptor holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The descriptor values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// The histogram bin counts.
    #[must_use]
    pub fn histogram(&self) -> &[f32] {
        &self.0[..HISTOGRAM_BINS]
    }

    /// The four grayscale statistics: mean, std, max, min.
    #[must_use]
    pub fn intensity_stats(&self) -> [f32; 4] {
        [
            self.0[HISTOGRAM_BINS],
            self.0[HISTOGRAM_BINS + 1],
            self.0[HISTOGRAM_BINS + 2],
            self.0[HISTOGRAM_BINS + 3],
        ]
    }

    /// The mean edge-map value.
    #[must_use]
    pub fn edge_mean(&self) -> f32 {
        self.0[FEATURE_LEN - 1]
    }

    /// Consumes the descriptor, returning the raw values.
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

/// Extracts the fixed-length descriptor from a pixel buffer.
///
/// Three-channel input is reduced to grayscale first; single-channel input
/// is used directly. The result layout is documented on [`FeatureVector`].
///
/// # Errors
///
/// Returns an error if the buffer is empty (buffers are dimension-checked
/// at construction, so this is the only failure left).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn extract_features(pixels: &PixelBuffer) -> Result<FeatureVector> {
    if pixels.data().is_empty() {
        return Err(FeatureError::EmptyInput);
    }

    let gray = pixels.to_gray();
    let values = gray.data();
    let count = values.len() as f32;

    let mut histogram = [0.0_f32; HISTOGRAM_BINS];
    let mut max = u8::MIN;
    let mut min = u8::MAX;
    let mut sum = 0.0_f64;
    for &v in values {
        histogram[v as usize] += 1.0;
        max = max.max(v);
        min = min.min(v);
        sum += f64::from(v);
    }

    let mean = (sum / f64::from(count)) as f32;

    // Population variance, accumulated in f64 to keep 224x224 sums exact.
    let var = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - f64::from(mean);
            d * d
        })
        .sum::<f64>()
        / f64::from(count);
    let std = var.sqrt() as f32;

    let edges = edge_map(&gray);
    let edge_mean = edges.iter().map(|&v| f32::from(v)).sum::<f32>() / count;

    Ok(FeatureVector::from_components(
        histogram,
        [mean, std, f32::from(max), f32::from(min)],
        edge_mean,
    ))
}

/// Computes a binary edge map from a grayscale buffer.
///
/// Sobel gradients with an L1 magnitude, then a double threshold: pixels
/// at or above [`EDGE_HIGH`] are edges, pixels in `[EDGE_LOW, EDGE_HIGH)`
/// are kept only when 8-connected to a strong edge. Edge pixels are 255,
/// everything else 0. Border pixels carry no gradient and stay 0.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn edge_map(gray: &PixelBuffer) -> Vec<u8> {
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let data = gray.data();

    let mut magnitude = vec![0_i32; w * h];
    if w >= 3 && h >= 3 {
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let at = |dx: isize, dy: isize| -> i32 {
                    let xi = (x as isize + dx) as usize;
                    let yi = (y as isize + dy) as usize;
                    i32::from(data[yi * w + xi])
                };

                let gx = at(1, -1) + 2 * at(1, 0) + at(1, 1)
                    - at(-1, -1)
                    - 2 * at(-1, 0)
                    - at(-1, 1);
                let gy = at(-1, 1) + 2 * at(0, 1) + at(1, 1)
                    - at(-1, -1)
                    - 2 * at(0, -1)
                    - at(1, -1);

                magnitude[y * w + x] = gx.abs() + gy.abs();
            }
        }
    }

    let mut edges = vec![0_u8; w * h];
    for (i, &m) in magnitude.iter().enumerate() {
        if m >= EDGE_HIGH {
            edges[i] = 255;
        }
    }

    // Weak edges survive only next to a strong one.
    let mut out = edges.clone();
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if magnitude[i] < EDGE_LOW || magnitude[i] >= EDGE_HIGH {
                continue;
            }

            let mut connected = false;
            for dy in -1_isize..=1 {
                for dx in -1_isize..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    if edges[ny as usize * w + nx as usize] == 255 {
                        connected = true;
                    }
                }
            }

            if connected {
                out[i] = 255;
            }
        }
    }

    out
}
