//! Normalized tensor data for the neural path.

use veri_types::ImageStats;

use crate::error::{FeatureError, Result};
use crate::pixels::{INPUT_SIZE, PixelBuffer};

/// Length of the flattened classifier input tensor (3 x 224 x 224).
pub const TENSOR_LEN: usize = 3 * (INPUT_SIZE as usize) * (INPUT_SIZE as usize);

/// Converts an RGB pixel buffer to normalized CHW float data.
///
/// Values are scaled to `[0, 1]` and then normalized per channel with the
/// given statistics, matching the fixed classifier transform. The output
/// is channel-major: all red values, then green, then blue.
///
/// # Errors
///
/// Returns an error if the buffer is not 3-channel.
///
/// # Example
///
/// ```
/// use veri_features::{to_tensor_data, PixelBuffer};
/// use veri_types::ImageStats;
///
/// let pixels = PixelBuffer::new(vec![128; 2 * 2 * 3], 2, 2, 3)?;
/// let data = to_tensor_data(&pixels, &ImageStats::UNITY)?;
/// assert_eq!(data.len(), 3 * 2 * 2);
/// assert!((data[0] - 128.0 / 255.0).abs() < 1e-6);
/// # Ok::<(), veri_features::FeatureError>(())
/// ```
pub fn to_tensor_data(pixels: &PixelBuffer, stats: &ImageStats) -> Result<Vec<f32>> {
    if pixels.channels() != 3 {
        return Err(FeatureError::UnsupportedChannels(pixels.channels()));
    }

    let count = pixels.pixel_count();
    let data = pixels.data();
    let mut out = vec![0.0_f32; 3 * count];

    for channel in 0..3 {
        for i in 0..count {
            let raw = f32::from(data[i * 3 + channel]) / 255.0;
            out[channel * count + i] = stats.normalize(raw, channel);
        }
    }

    Ok(out)
}
