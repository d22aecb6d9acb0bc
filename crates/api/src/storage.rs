//! On-disk store for uploaded program images.
//!
//! Files live under `<upload_dir>/programs/` and are addressed by the public
//! URL `/uploads/programs/<file>`, which the router serves from the same
//! directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use imi_core::program_image::{process_program_image, unique_image_filename};
use rand::Rng;

use crate::error::{AppError, AppResult};

/// URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Subdirectory (and URL segment) for program images.
const PROGRAM_DIR: &str = "programs";

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resize and re-encode an uploaded image, write it under a fresh name
    /// and return its public URL.
    pub async fn save_program_image(&self, original_name: &str, bytes: Vec<u8>) -> AppResult<String> {
        let jpeg = tokio::task::spawn_blocking(move || process_program_image(&bytes))
            .await
            .map_err(|e| AppError::InternalError(format!("Image processing task failed: {e}")))??;

        let dir = self.root.join(PROGRAM_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create {}: {e}", dir.display())))?;

        let nonce: u32 = rand::rng().random_range(0..1_000_000_000);
        let filename = unique_image_filename(original_name, Utc::now().timestamp_millis(), nonce);
        let path = dir.join(&filename);
        tokio::fs::write(&path, &jpeg)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write {}: {e}", path.display())))?;

        tracing::info!(file = %path.display(), bytes = jpeg.len(), "Stored program image");
        Ok(format!("{PUBLIC_PREFIX}/{PROGRAM_DIR}/{filename}"))
    }

    /// Map a public `/uploads/...` URL to a path inside the store.
    ///
    /// Returns `None` for URLs outside the prefix or containing anything but
    /// plain path segments.
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
        if relative.is_empty() {
            return None;
        }
        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Delete the file behind a managed image URL.
    ///
    /// Best-effort: failures are logged and reported as `false`.
    pub async fn remove_by_url(&self, url: &str) -> bool {
        let Some(path) = self.path_for_url(url) else {
            tracing::debug!(url, "Not a managed image URL, nothing to remove");
            return false;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file = %path.display(), "Removed program image");
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Failed to remove program image");
                false
            }
        }
    }
}
