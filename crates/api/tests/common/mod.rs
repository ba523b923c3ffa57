#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use coursehub_api::auth::jwt::JwtConfig;
use coursehub_api::auth::password::hash_password;
use coursehub_api::config::ServerConfig;
use coursehub_api::router::build_app_router;
use coursehub_api::state::AppState;
use coursehub_db::models::admin::CreateAdmin;
use coursehub_db::models::course::CreateCourse;
use coursehub_db::models::user::CreateUser;
use coursehub_db::repositories::{AdminRepo, CourseRepo, UserRepo};
use coursehub_notifications::{EmailError, Notifier, NotifyError, RefundNotice};
use coursehub_storage::{BlobError, BlobStore, BlobUpload, StorageConfig};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Blob store that keeps uploads in memory and returns a fake CDN URL.
#[derive(Default)]
pub struct MemoryBlobStore {
    pub stored: Mutex<Vec<(String, String, usize)>>,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, upload: BlobUpload) -> Result<String, BlobError> {
        let url = format!("https://cdn.test/{}", upload.key);
        self.stored
            .lock()
            .unwrap()
            .push((upload.key, upload.content_type, upload.bytes.len()));
        Ok(url)
    }
}

/// Blob store whose backend is always down.
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn store(&self, _upload: BlobUpload) -> Result<String, BlobError> {
        Err(BlobError::Upstream("bucket unreachable: secret-internal-host".into()))
    }
}

/// Notifier that records every notice it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<RefundNotice>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn refund_requested(&self, notice: &RefundNotice) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Notifier whose SMTP relay is always down.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn refund_requested(&self, _notice: &RefundNotice) -> Result<(), NotifyError> {
        Err(EmailError::Build("relay refused connection".into()).into())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 10 * 1024 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            user_token_expiry_days: 7,
            admin_token_expiry_days: 1,
        },
        storage: StorageConfig::S3 {
            bucket: "test".to_string(),
            public_url: "https://cdn.test".to_string(),
            endpoint: None,
        },
    }
}

/// Handles to the test doubles behind an app built by [`build_test_app_with`].
pub struct TestApp {
    pub router: Router,
    pub blobs: Arc<MemoryBlobStore>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Full router (same middleware stack as production) with in-memory gateways.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let blobs = Arc::new(MemoryBlobStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let router = build_app_router_with(pool, blobs.clone(), notifier.clone());
    TestApp {
        router,
        blobs,
        notifier,
    }
}

/// Full router with caller-supplied gateways.
pub fn build_app_router_with(
    pool: PgPool,
    blob_store: Arc<dyn BlobStore>,
    notifier: Arc<dyn Notifier>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blob_store,
        notifier,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_admin(pool: &PgPool, username: &str) -> i64 {
    AdminRepo::create(
        pool,
        &CreateAdmin {
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        },
    )
    .await
    .expect("admin creation should succeed")
    .id
}

pub async fn create_user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        },
    )
    .await
    .expect("user creation should succeed")
    .id
}

pub async fn create_course(pool: &PgPool, name: &str) -> i64 {
    CourseRepo::create(
        pool,
        &CreateCourse {
            name: name.to_string(),
            image_url: "https://cdn.test/courses/cover.png".to_string(),
            description: Some("A course".to_string()),
            price_cents: 4_999,
        },
    )
    .await
    .expect("course creation should succeed")
    .id
}

/// Log in through the API and return the bearer token.
pub async fn admin_token(app: &Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let json = body_json(post_json(app.clone(), "/auth/admin/login", body).await).await;
    json["data"]["token"].as_str().expect("token in response").to_string()
}

/// Log in through the API and return the bearer token.
pub async fn user_token(app: &Router, name: &str) -> String {
    let body = serde_json::json!({
        "email": format!("{}@example.com", name.to_lowercase()),
        "password": TEST_PASSWORD,
    });
    let json = body_json(post_json(app.clone(), "/auth/login", body).await).await;
    json["data"]["token"].as_str().expect("token in response").to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "coursehub-test-boundary";

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    body: MultipartBody,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.finish()))
        .unwrap();
    send(app, request).await
}
