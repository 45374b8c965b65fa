//! Media blob persistence
//!
//! Validated uploads land under the media root with UUID filenames; the
//! catalog row stores the returned relative path. The same directory is
//! served read-only over HTTP at `/media`.

use crate::validators::UploadedBlob;
use bstore_common::Result;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const AUDIO_SUBDIR: &str = "audio";
const COVER_SUBDIR: &str = "covers";

/// File storage rooted at the service's media directory
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an audio payload
    ///
    /// Returns the relative media path and the SHA-256 of the content.
    pub async fn store_audio(&self, blob: &UploadedBlob) -> Result<(String, String)> {
        let relative = relative_name(AUDIO_SUBDIR, blob);
        self.write(&relative, &blob.bytes).await?;

        let hash = format!("{:x}", Sha256::digest(&blob.bytes));
        Ok((relative, hash))
    }

    /// Persist a cover image payload, returning the relative media path
    pub async fn store_cover(&self, blob: &UploadedBlob) -> Result<String> {
        let relative = relative_name(COVER_SUBDIR, blob);
        self.write(&relative, &blob.bytes).await?;
        Ok(relative)
    }

    async fn write(&self, relative: &str, bytes: &[u8]) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored media file: {} ({} bytes)", relative, bytes.len());
        Ok(())
    }
}

/// UUID filename under the given subfolder; the sanitized extension of
/// the uploaded filename is kept when there is one
fn relative_name(subdir: &str, blob: &UploadedBlob) -> String {
    match blob.extension() {
        Some(ext) => format!("{}/{}.{}", subdir, Uuid::new_v4(), ext),
        None => format!("{}/{}", subdir, Uuid::new_v4()),
    }
}
