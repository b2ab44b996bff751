//! Owned pixel buffers and byte-level preprocessing.

use image::imageops::FilterType;

use crate::error::{FeatureError, Result};

/// Side length of the fixed classifier input, in pixels.
pub const INPUT_SIZE: u32 = 224;

/// An owned 8-bit pixel buffer in HWC (row-major, interleaved) layout.
///
/// Either 3-channel RGB or 1-channel grayscale. Dimensions are validated
/// at construction, so every buffer in circulation is consistent.
///
/// # Example
///
/// ```
/// use veri_features::PixelBuffer;
///
/// let pixels = PixelBuffer::new(vec![255; 2 * 2 * 3], 2, 2, 3)?;
/// assert_eq!(pixels.width(), 2);
/// assert_eq!(pixels.channels(), 3);
/// # Ok::<(), veri_features::FeatureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Creates a pixel buffer, validating dimensions against data length.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is empty, either dimension is zero,
    /// the channel count is not 1 or 3, or the data length does not equal
    /// `width * height * channels`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self> {
        if data.is_empty() {
            return Err(FeatureError::EmptyInput);
        }
        if width == 0 || height == 0 {
            return Err(FeatureError::invalid_dimensions(width, height));
        }
        if channels != 1 && channels != 3 {
            return Err(FeatureError::UnsupportedChannels(channels));
        }

        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(FeatureError::buffer_mismatch(expected, data.len()));
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Wraps a decoded RGB image.
    #[must_use]
    pub fn from_rgb(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            data: image.into_raw(),
            width,
            height,
            channels: 3,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels (1 or 3).
    #[must_use]
    pub const fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw pixel data in HWC layout.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels (width * height).
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns a single-channel grayscale view of this buffer.
    ///
    /// RGB input is converted with the ITU-R BT.601 luma weights
    /// (0.299 R + 0.587 G + 0.114 B); grayscale input is returned as-is.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_gray(&self) -> Self {
        if self.channels == 1 {
            return self.clone();
        }

        let gray: Vec<u8> = self
            .data
            .chunks_exact(3)
            .map(|px| {
                let y = f32::from(px[2]).mul_add(
                    0.114,
                    f32::from(px[0]).mul_add(0.299, f32::from(px[1]) * 0.587),
                );
                y.round().min(255.0) as u8
            })
            .collect();

        Self {
            data: gray,
            width: self.width,
            height: self.height,
            channels: 1,
        }
    }
}

/// Decodes image bytes into an RGB pixel buffer at native resolution.
///
/// Non-RGB inputs (grayscale, palette, alpha) are converted.
///
/// # Errors
///
/// Returns [`FeatureError::Decode`] if the bytes are not a valid image.
pub fn decode_rgb(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes).map_err(|e| FeatureError::decode(e.to_string()))?;
    Ok(PixelBuffer::from_rgb(image.to_rgb8()))
}

/// Decodes and resizes image bytes to the fixed classifier input.
///
/// The resize stretches to exactly 224x224 - aspect ratio is not
/// preserved - so the output shape is identical for every input.
///
/// # Errors
///
/// Returns [`FeatureError::Decode`] if the bytes are not a valid image.
pub fn preprocess(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes).map_err(|e| FeatureError::decode(e.to_string()))?;
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
    Ok(PixelBuffer::from_rgb(resized.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(image: &image::RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn buffer_new_valid() {
        let pixels = PixelBuffer::new(vec![0; 12], 2, 2, 3).unwrap();
        assert_eq!(pixels.width(), 2);
        assert_eq!(pixels.height(), 2);
        assert_eq!(pixels.channels(), 3);
        assert_eq!(pixels.pixel_count(), 4);
    }

    #[test]
    fn buffer_new_empty() {
        assert!(matches!(
            PixelBuffer::new(vec![], 0, 0, 3),
            Err(FeatureError::EmptyInput)
        ));
    }

    #[test]
    fn buffer_new_zero_dimension() {
        assert!(matches!(
            PixelBuffer::new(vec![0; 4], 0, 4, 1),
            Err(FeatureError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn buffer_new_bad_channels() {
        assert!(matches!(
            PixelBuffer::new(vec![0; 16], 2, 2, 4),
            Err(FeatureError::UnsupportedChannels(4))
        ));
    }

    #[test]
    fn buffer_new_length_mismatch() {
        assert!(matches!(
            PixelBuffer::new(vec![0; 10], 2, 2, 3),
            Err(FeatureError::BufferMismatch { .. })
        ));
    }

    #[test]
    fn gray_conversion_weights() {
        // Pure red, green, blue pixels in one row.
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255];
        let pixels = PixelBuffer::new(data, 3, 1, 3).unwrap();
        let gray = pixels.to_gray();

        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.data(), &[76, 150, 29]);
    }

    #[test]
    fn gray_of_gray_is_identity() {
        let pixels = PixelBuffer::new(vec![7, 77, 177, 250], 2, 2, 1).unwrap();
        let gray = pixels.to_gray();
        assert_eq!(gray, pixels);
    }

    #[test]
    fn decode_rgb_native_resolution() {
        let image = image::RgbImage::from_pixel(5, 9, image::Rgb([10, 20, 30]));
        let pixels = decode_rgb(&encode_png(&image)).unwrap();

        assert_eq!(pixels.width(), 5);
        assert_eq!(pixels.height(), 9);
        assert_eq!(pixels.channels(), 3);
    }

    #[test]
    fn decode_rgb_rejects_garbage() {
        let result = decode_rgb(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(FeatureError::Decode(_))));
    }

    #[test]
    fn preprocess_fixed_shape_any_aspect() {
        for (w, h) in [(100, 100), (640, 480), (31, 200)] {
            let image = image::RgbImage::from_pixel(w, h, image::Rgb([128, 128, 128]));
            let pixels = preprocess(&encode_png(&image)).unwrap();

            assert_eq!(pixels.width(), INPUT_SIZE);
            assert_eq!(pixels.height(), INPUT_SIZE);
            assert_eq!(pixels.channels(), 3);
            assert_eq!(pixels.data().len(), 3 * 224 * 224);
        }
    }

    #[test]
    fn preprocess_rejects_garbage() {
        assert!(matches!(
            preprocess(b"not an image"),
            Err(FeatureError::Decode(_))
        ));
    }
}
