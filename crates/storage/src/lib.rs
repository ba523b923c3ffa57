//! Blob gateway: stores uploaded course assets and returns a durable URL.
//!
//! - [`BlobStore`] -- the capability handlers depend on.
//! - [`local::LocalBlobStore`] -- writes under a directory served at `/uploads`.
//! - [`s3::S3BlobStore`] -- writes to an S3 (or S3-compatible) bucket.
//! - [`config::StorageConfig`] -- backend selection from the environment.

pub mod config;
pub mod local;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

pub use config::StorageConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The upload itself is unacceptable (wrong media type, empty body).
    #[error("Rejected upload: {0}")]
    Rejected(String),

    /// Filesystem failure in the local backend.
    #[error("Blob I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote object store refused or failed the write.
    #[error("Object store error: {0}")]
    Upstream(String),
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// What an uploaded asset is for; decides its folder and accepted media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    CourseCover,
    LessonVideo,
}

impl AssetKind {
    pub fn folder(self) -> &'static str {
        match self {
            Self::CourseCover => "courses",
            Self::LessonVideo => "lessons",
        }
    }

    fn mime_prefix(self) -> &'static str {
        match self {
            Self::CourseCover => "image/",
            Self::LessonVideo => "video/",
        }
    }
}

/// A validated asset ready to be handed to a [`BlobStore`].
#[derive(Debug)]
pub struct BlobUpload {
    pub kind: AssetKind,
    pub key: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl BlobUpload {
    /// Validate the media type and body, and assign a fresh object key.
    pub fn new(
        kind: AssetKind,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, BlobError> {
        let content_type = content_type.unwrap_or("application/octet-stream");
        if !content_type.starts_with(kind.mime_prefix()) {
            return Err(BlobError::Rejected(format!(
                "Expected a {}* file, got '{content_type}'",
                kind.mime_prefix()
            )));
        }
        if bytes.is_empty() {
            return Err(BlobError::Rejected("Uploaded file is empty".into()));
        }
        Ok(Self {
            kind,
            key: object_key(kind, file_name),
            content_type: content_type.to_string(),
            bytes,
        })
    }
}

/// Build `{folder}/{uuid}[.{ext}]`. The extension is kept only when it is a
/// short alphanumeric suffix of the client file name.
pub fn object_key(kind: AssetKind, file_name: Option<&str>) -> String {
    let id = uuid::Uuid::new_v4();
    let ext = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{}/{id}.{ext}", kind.folder()),
        None => format!("{}/{id}", kind.folder()),
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Stores an asset and returns the URL clients use to fetch it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, upload: BlobUpload) -> Result<String, BlobError>;
}

/// Construct the backend selected by `config`.
pub async fn build_store(config: &StorageConfig) -> Arc<dyn BlobStore> {
    match config {
        StorageConfig::Local { root, public_base_url } => {
            tracing::info!(root = %root.display(), "Using local blob storage");
            Arc::new(local::LocalBlobStore::new(root.clone(), public_base_url.clone()))
        }
        StorageConfig::S3 { bucket, public_url, endpoint } => {
            tracing::info!(bucket = %bucket, "Using S3 blob storage");
            Arc::new(s3::S3BlobStore::new(bucket.clone(), public_url.clone(), endpoint.clone()).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_keeps_short_extension() {
        let key = object_key(AssetKind::CourseCover, Some("Cover.PNG"));
        assert!(key.starts_with("courses/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn key_drops_suspicious_extension() {
        let key = object_key(AssetKind::LessonVideo, Some("clip.mp4/../../etc"));
        assert!(key.starts_with("lessons/"));
        assert!(!key.contains(".."));
        assert_eq!(key.matches('/').count(), 1);

        let key = object_key(AssetKind::LessonVideo, None);
        assert!(!key.contains('.'));
    }

    #[test]
    fn upload_rejects_wrong_media_type() {
        let bytes = Bytes::from_static(&[1]);
        let err = BlobUpload::new(AssetKind::CourseCover, Some("a.mp4"), Some("video/mp4"), bytes)
            .unwrap_err();
        assert!(matches!(err, BlobError::Rejected(_)));
    }

    #[test]
    fn upload_rejects_empty_body() {
        let err =
            BlobUpload::new(AssetKind::LessonVideo, Some("a.mp4"), Some("video/mp4"), Bytes::new())
                .unwrap_err();
        assert!(matches!(err, BlobError::Rejected(_)));
    }

    #[test]
    fn upload_accepts_matching_media_type() {
        let bytes = Bytes::from_static(&[1, 2]);
        let upload = BlobUpload::new(AssetKind::LessonVideo, Some("a.mp4"), Some("video/mp4"), bytes)
            .unwrap();
        assert_eq!(upload.content_type, "video/mp4");
        assert!(upload.key.starts_with("lessons/"));
    }

    #[test]
    fn upload_shares_the_request_buffer() {
        let bytes = Bytes::from(vec![7u8; 64]);
        let ptr = bytes.as_ptr();
        let upload =
            BlobUpload::new(AssetKind::LessonVideo, Some("a.mp4"), Some("video/mp4"), bytes)
                .unwrap();
        assert_eq!(upload.bytes.as_ptr(), ptr);
    }
}
