//! The metadata extraction routine.

use std::collections::BTreeMap;
use std::io::Cursor;

use exif::{In, Tag};
use tracing::debug;

use crate::value::MetadataValue;

/// Extracted metadata, keyed by short tag name.
pub type ImageMetadata = BTreeMap<String, MetadataValue>;

/// EXIF tags worth surfacing, with the short key each is reported under.
///
/// The keys match the tag names with their namespace segment stripped;
/// `PhotographicSensitivity` keeps its older `ISOSpeedRatings` name, which
/// is what capture software commonly writes and consumers expect.
const EXIF_TAGS: [(Tag, &str); 11] = [
    (Tag::DateTime, "DateTime"),
    (Tag::Make, "Make"),
    (Tag::Model, "Model"),
    (Tag::Software, "Software"),
    (Tag::DateTimeOriginal, "DateTimeOriginal"),
    (Tag::DateTimeDigitized, "DateTimeDigitized"),
    (Tag::PhotographicSensitivity, "ISOSpeedRatings"),
    (Tag::ExposureTime, "ExposureTime"),
    (Tag::FNumber, "FNumber"),
    (Tag::ExposureProgram, "ExposureProgram"),
    (Tag::ExifVersion, "ExifVersion"),
];

/// Extracts capture metadata from raw image bytes.
///
/// Collects the allow-listed EXIF tags plus three container attributes:
/// `format` (e.g. "JPEG"), `mode` (pixel layout, e.g. "RGB"), and `size`
/// (pixel dimensions).
///
/// Metadata is best-effort. Undecodable bytes produce an empty map, and an
/// image without EXIF data still reports its container attributes. The only
/// side effect of a failure is a diagnostic log entry.
///
/// # Example
///
/// ```
/// use veri_metadata::extract;
///
/// let metadata = extract(b"definitely not an image");
/// assert!(metadata.is_empty());
/// ```
#[must_use]
pub fn extract(bytes: &[u8]) -> ImageMetadata {
    let mut metadata = ImageMetadata::new();

    // Container attributes first: if the bytes do not decode at all, the
    // whole result is empty regardless of what an EXIF scan might find.
    let image = match image::load_from_memory(bytes) {
        Ok(image) => image,
        Err(err) => {
            debug!(error = %err, "metadata extraction skipped: undecodable image");
            return metadata;
        }
    };

    match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => {
            for (tag, key) in EXIF_TAGS {
                if let Some(field) = exif.get_field(tag, In::PRIMARY) {
                    metadata.insert(
                        key.to_string(),
                        MetadataValue::text(field.display_value().to_string()),
                    );
                }
            }
        }
        // Absent or malformed EXIF segments are routine (PNG, stripped
        // JPEG); the container attributes below still apply.
        Err(err) => debug!(error = %err, "no EXIF data"),
    }

    if let Ok(format) = image::guess_format(bytes) {
        metadata.insert("format".to_string(), MetadataValue::text(format_name(format)));
    }
    metadata.insert("mode".to_string(), MetadataValue::text(mode_name(&image)));
    metadata.insert(
        "size".to_string(),
        MetadataValue::Dimensions(image.width(), image.height()),
    );

    metadata
}

/// Short uppercase container format name.
fn format_name(format: image::ImageFormat) -> &'static str {
    use image::ImageFormat;

    match format {
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Png => "PNG",
        ImageFormat::Gif => "GIF",
        ImageFormat::Bmp => "BMP",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::WebP => "WEBP",
        ImageFormat::Ico => "ICO",
        ImageFormat::Pnm => "PNM",
        _ => "UNKNOWN",
    }
}

/// Pixel layout name for the decoded image.
fn mode_name(image: &image::DynamicImage) -> &'static str {
    use image::DynamicImage;

    match image {
        DynamicImage::ImageLuma8(_) => "L",
        DynamicImage::ImageLumaA8(_) => "LA",
        DynamicImage::ImageLuma16(_) => "I;16",
        DynamicImage::ImageLumaA16(_) => "LA;16",
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
            "RGB"
        }
        DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgba32F(_) => "RGBA",
        _ => "RGB",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(image: &image::RgbImage, format: image::ImageOutputFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    #[test]
    fn extract_corrupt_bytes_empty() {
        assert!(extract(&[]).is_empty());
        assert!(extract(b"garbage that is not an image").is_empty());
        assert!(extract(&[0xff, 0xd8, 0xff]).is_empty()); // Truncated JPEG header
    }

    #[test]
    fn extract_jpeg_container_attributes() {
        let image = image::RgbImage::from_pixel(100, 100, image::Rgb([255, 255, 255]));
        let metadata = extract(&encode(&image, image::ImageOutputFormat::Jpeg(90)));

        assert_eq!(metadata.get("format"), Some(&MetadataValue::text("JPEG")));
        assert_eq!(metadata.get("mode"), Some(&MetadataValue::text("RGB")));
        assert_eq!(
            metadata.get("size"),
            Some(&MetadataValue::Dimensions(100, 100))
        );
    }

    #[test]
    fn extract_png_container_attributes() {
        let image = image::RgbImage::from_pixel(32, 16, image::Rgb([1, 2, 3]));
        let metadata = extract(&encode(&image, image::ImageOutputFormat::Png));

        assert_eq!(metadata.get("format"), Some(&MetadataValue::text("PNG")));
        assert_eq!(
            metadata.get("size"),
            Some(&MetadataValue::Dimensions(32, 16))
        );
    }

    #[test]
    fn extract_no_exif_still_reports_container() {
        // Plain encoded images carry no EXIF; only the three container
        // attributes should be present.
        let image = image::RgbImage::from_pixel(8, 8, image::Rgb([0, 0, 0]));
        let metadata = extract(&encode(&image, image::ImageOutputFormat::Png));

        assert_eq!(metadata.len(), 3);
        assert!(!metadata.contains_key("Make"));
        assert!(!metadata.contains_key("DateTime"));
    }

    #[test]
    fn extract_grayscale_mode() {
        let mut bytes = Vec::new();
        let gray = image::GrayImage::from_pixel(4, 4, image::Luma([128]));
        image::DynamicImage::ImageLuma8(gray)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();

        let metadata = extract(&bytes);
        assert_eq!(metadata.get("mode"), Some(&MetadataValue::text("L")));
    }

    #[test]
    fn format_names() {
        assert_eq!(format_name(image::ImageFormat::Jpeg), "JPEG");
        assert_eq!(format_name(image::ImageFormat::Png), "PNG");
        assert_eq!(format_name(image::ImageFormat::WebP), "WEBP");
    }
}
