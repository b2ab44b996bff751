//! Labeled directory discovery.

use std::path::Path;

use tracing::debug;
use veri_types::ClassLabel;

use crate::error::{DatasetError, Result};
use crate::sample::ImageSample;

/// File extensions recognized as dataset images (case-insensitive).
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Discovers labeled samples under the two-class directory layout.
///
/// Scans `<root>/real` and then `<root>/fake` for image files. Entries keep
/// directory-listing order (no sorting), real samples first. A missing
/// class subdirectory is skipped silently - a dataset holding only one
/// class is valid.
///
/// # Errors
///
/// Returns an error only when an *existing* class directory cannot be
/// read or iterated.
///
/// # Example
///
/// ```no_run
/// use veri_dataset::scan_dataset;
///
/// let samples = scan_dataset("./data")?;
/// println!("{} samples", samples.len());
/// # Ok::<(), veri_dataset::DatasetError>(())
/// ```
pub fn scan_dataset(root: impl AsRef<Path>) -> Result<Vec<ImageSample>> {
    let root = root.as_ref();
    let mut samples = Vec::new();

    for (class_dir, label) in [("real", ClassLabel::Real), ("fake", ClassLabel::Fake)] {
        let dir = root.join(class_dir);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "class directory absent, skipping");
            continue;
        }

        let entries = std::fs::read_dir(&dir)
            .map_err(|e| DatasetError::read_dir(dir.display().to_string(), e.to_string()))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| DatasetError::read_dir(dir.display().to_string(), e.to_string()))?;
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                samples.push(ImageSample::new(path, label));
            }
        }
    }

    Ok(samples)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}
