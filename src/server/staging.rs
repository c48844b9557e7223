//! Request-scoped staging of uploaded files.

use std::path::{Path, PathBuf};

/// An uploaded file written to the staging directory.
///
/// The file is removed when this guard is dropped, on success and error paths alike.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    /// Write `contents` under `upload_dir` with a random name that keeps the
    /// original (lowercased) extension, defaulting to `.pdf`.
    pub async fn write(
        upload_dir: &Path,
        original_name: &str,
        contents: &[u8],
    ) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(upload_dir).await?;

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_else(|| ".pdf".to_string());
        let path = upload_dir.join(format!("{}{}", uuid::Uuid::new_v4().simple(), ext));

        // Guard first so a failed write still cleans up a partial file
        let staged = Self { path };
        tokio::fs::write(&staged.path, contents).await?;
        tracing::debug!(
            "Staged {} ({} bytes) at {}",
            original_name,
            contents.len(),
            staged.path.display()
        );
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}
