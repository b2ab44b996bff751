//! URL-sourced image download.

use tracing::debug;

use crate::error::{AnalyzeError, Result};

/// Downloads an image synchronously.
///
/// Blocking GET with the HTTP client's default timeout behavior, no
/// retries. Non-success status codes are failures; a failed fetch
/// surfaces immediately with no partial result.
///
/// # Errors
///
/// Returns [`AnalyzeError::Fetch`] on connection failures or non-success
/// responses. The downloaded bytes are not validated here - decoding
/// failures belong to the classification path.
pub fn download_image(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| AnalyzeError::fetch(url, e.to_string()))?
        .error_for_status()
        .map_err(|e| AnalyzeError::fetch(url, e.to_string()))?;

    let bytes = response
        .bytes()
        .map_err(|e| AnalyzeError::fetch(url, e.to_string()))?;

    debug!(url, len = bytes.len(), "image downloaded");
    Ok(bytes.to_vec())
}
