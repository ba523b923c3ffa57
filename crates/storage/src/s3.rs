//! S3 blob backend.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::{BlobError, BlobStore, BlobUpload};

/// Writes blobs as objects in a single bucket.
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3BlobStore {
    /// Build a client from the standard AWS environment (credentials, region).
    ///
    /// When `endpoint` is set, requests go there with path-style addressing,
    /// which S3-compatible services expect.
    pub async fn new(bucket: String, public_url: String, endpoint: Option<String>) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket,
            public_url,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn store(&self, upload: BlobUpload) -> Result<String, BlobError> {
        let size = upload.bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&upload.key)
            .content_type(&upload.content_type)
            .body(ByteStream::from(upload.bytes))
            .send()
            .await
            .map_err(|e| BlobError::Upstream(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(bucket = %self.bucket, key = %upload.key, bytes = size, "Stored blob in S3");
        Ok(format!("{}/{}", self.public_url, upload.key))
    }
}
