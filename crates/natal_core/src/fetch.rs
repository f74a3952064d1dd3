//! One-time dataset download.
//!
//! The body is streamed to a temporary file in the destination directory
//! and renamed into place, so a partial transfer never appears under the
//! final name.

use std::path::Path;

use crate::error::EngineError;

#[cfg(feature = "download")]
pub fn download(url: &str, dest: &Path) -> Result<u64, EngineError> {
    let dir = dest
        .parent()
        .ok_or(EngineError::InvalidConfig("dataset path has no parent directory"))?;
    std::fs::create_dir_all(dir)?;

    tracing::info!(%url, dest = %dest.display(), "downloading ephemeris dataset");
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| EngineError::Download(e.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    let bytes = response
        .copy_to(&mut tmp)
        .map_err(|e| EngineError::Download(e.to_string()))?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| EngineError::Io(e.error))?;

    tracing::info!(bytes, "ephemeris dataset saved");
    Ok(bytes)
}

#[cfg(not(feature = "download"))]
pub fn download(url: &str, _dest: &Path) -> Result<u64, EngineError> {
    Err(EngineError::Download(format!(
        "built without the `download` feature; fetch {url} manually"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_fetch_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("de421.bsp");
        // Port 9 (discard) is closed on test hosts; the connection is refused.
        let err = download("http://127.0.0.1:9/de421.bsp", &dest).unwrap_err();
        assert!(matches!(err, EngineError::Download(_)));
        assert!(!dest.exists());
    }
}
