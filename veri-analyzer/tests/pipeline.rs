//! End-to-end checks over the full analysis surface.
//!
//! The fixture mirrors the classic test image: a 100x100 white canvas with
//! a centered blue rectangle, saved as JPEG.

use std::io::Cursor;

use burn_ndarray::NdArray;
use veri_analyzer::Analyzer;
use veri_features::{FEATURE_LEN, extract_features, preprocess};
use veri_metadata::MetadataValue;
use veri_model::{ClassicClassifier, NeuralClassifier};

type TestBackend = NdArray<f32>;

/// 100x100 solid white, blue rectangle covering (30, 30)..(70, 70).
fn test_image_jpeg() -> Vec<u8> {
    let mut image = image::RgbImage::from_pixel(100, 100, image::Rgb([255, 255, 255]));
    for y in 30..=70 {
        for x in 30..=70 {
            image.put_pixel(x, y, image::Rgb([0, 0, 255]));
        }
    }

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(
            &mut Cursor::new(&mut bytes),
            image::ImageOutputFormat::Jpeg(90),
        )
        .unwrap();
    bytes
}

fn make_analyzer() -> Analyzer<TestBackend> {
    let device = Default::default();
    Analyzer::new(
        ClassicClassifier::with_seed(42),
        NeuralClassifier::new(&device),
    )
}

#[test]
fn metadata_reports_container_attributes() {
    let analyzer = make_analyzer();
    let metadata = analyzer.extract_metadata(&test_image_jpeg());

    assert_eq!(metadata.get("format"), Some(&MetadataValue::text("JPEG")));
    assert_eq!(metadata.get("mode"), Some(&MetadataValue::text("RGB")));
    assert_eq!(
        metadata.get("size"),
        Some(&MetadataValue::Dimensions(100, 100))
    );
}

#[test]
fn metadata_corrupt_bytes_is_empty() {
    let analyzer = make_analyzer();
    let mut bytes = test_image_jpeg();
    bytes.truncate(20);

    assert!(analyzer.extract_metadata(&bytes).is_empty());
}

#[test]
fn features_reflect_two_intensity_clusters() {
    let pixels = preprocess(&test_image_jpeg()).unwrap();
    let features = extract_features(&pixels).unwrap();

    assert_eq!(features.len(), FEATURE_LEN);
    assert_eq!(features.len(), 261);

    // White background (gray 255) and blue rectangle (gray ~29).
    let [mean, std, max, min] = features.intensity_stats();
    assert!(max > 200.0, "white cluster missing: max = {max}");
    assert!(min < 75.0, "blue cluster missing: min = {min}");
    assert!(mean > 150.0 && mean < 250.0, "mean = {mean}");
    assert!(std > 50.0, "two clusters should spread intensities: std = {std}");

    // Histogram covers exactly the resized pixel grid.
    let total: f32 = features.histogram().iter().sum();
    assert!((total - (224.0 * 224.0)).abs() < 1.0);
}

#[test]
fn report_serves_verdict_with_metadata() {
    let analyzer = make_analyzer();
    let report = analyzer.report(&test_image_jpeg()).unwrap();

    assert!(report.verdict.is_valid());
    assert!(report.verdict.confidence >= 0.6);
    assert_eq!(
        report.metadata.get("format"),
        Some(&MetadataValue::text("JPEG"))
    );
}

#[test]
fn neural_predict_is_pure_and_bounded() {
    let analyzer = make_analyzer();
    let bytes = test_image_jpeg();

    let first = analyzer.predict(&bytes).unwrap();
    let second = analyzer.predict(&bytes).unwrap();

    assert_eq!(first, second);
    assert!((0.6..=0.95).contains(&first.confidence));
    assert_eq!(first.is_fake(), first.confidence > 0.75);
}

#[test]
fn analyze_never_blocks_on_missing_model() {
    let analyzer = make_analyzer();

    for _ in 0..5 {
        let verdict = analyzer.analyze(&test_image_jpeg()).unwrap();
        assert!(verdict.confidence >= 0.6 && verdict.confidence < 0.9);
    }
}
