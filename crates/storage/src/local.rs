//! Local filesystem blob backend for development deployments.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{BlobError, BlobStore, BlobUpload};

/// Writes blobs below `root`; URLs point at the API's `/uploads` route.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url,
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, upload: BlobUpload) -> Result<String, BlobError> {
        let dest = self.root.join(&upload.key);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, &upload.bytes).await?;

        tracing::debug!(key = %upload.key, bytes = upload.bytes.len(), "Stored blob locally");
        Ok(format!("{}/uploads/{}", self.public_base_url, upload.key))
    }
}
