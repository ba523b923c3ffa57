use std::path::PathBuf;

/// Default directory for the local backend.
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
/// Default public prefix for locally stored assets.
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Blob backend selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Files under `root`, served by the API at `{public_base_url}/uploads/...`.
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    /// Objects in `bucket`, addressed as `{public_url}/{key}`.
    S3 {
        bucket: String,
        public_url: String,
        /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
        endpoint: Option<String>,
    },
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var           | Default                               |
    /// |-------------------|---------------------------------------|
    /// | `STORAGE_BACKEND` | `local`                               |
    /// | `UPLOAD_DIR`      | `./uploads`                           |
    /// | `PUBLIC_BASE_URL` | `http://localhost:3000`               |
    /// | `S3_BUCKET`       | required for `s3`                     |
    /// | `S3_PUBLIC_URL`   | `https://{bucket}.s3.amazonaws.com`   |
    /// | `S3_ENDPOINT`     | --                                    |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend name or a missing `S3_BUCKET`.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "local" => Self::Local {
                root: std::env::var("UPLOAD_DIR")
                    .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into())
                    .into(),
                public_base_url: std::env::var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.into())
                    .trim_end_matches('/')
                    .to_string(),
            },
            "s3" => {
                let bucket = std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when STORAGE_BACKEND=s3");
                let public_url = std::env::var("S3_PUBLIC_URL")
                    .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com"))
                    .trim_end_matches('/')
                    .to_string();
                Self::S3 {
                    bucket,
                    public_url,
                    endpoint: std::env::var("S3_ENDPOINT").ok(),
                }
            }
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"),
        }
    }

    /// Directory the API should serve at `/uploads`, if any.
    pub fn served_dir(&self) -> Option<&PathBuf> {
        match self {
            Self::Local { root, .. } => Some(root),
            Self::S3 { .. } => None,
        }
    }
}
