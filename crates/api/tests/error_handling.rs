//! Tests for `AppError` → HTTP response mapping.
//!
//! Most call `IntoResponse` directly on `AppError` values; the extractor
//! rejection tests at the end go through the router.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use common::{body_json, get, post_json_auth};
use coursehub_api::error::AppError;
use coursehub_core::error::CoreError;
use coursehub_notifications::{EmailError, NotifyError};
use coursehub_storage::BlobError;
use http_body_util::BodyExt;
use sqlx::PgPool;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Course",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Course with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let (status, json) =
        error_to_response(CoreError::Validation("name is required".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name is required");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let (status, json) =
        error_to_response(CoreError::Conflict("Course already purchased".into()).into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn unauthorized_and_token_errors_are_distinct() {
    let (status, json) = error_to_response(CoreError::Unauthorized("bad creds".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) = error_to_response(CoreError::InvalidToken("expired".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "INVALID_TOKEN");

    let (status, json) = error_to_response(CoreError::Forbidden("wrong role".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_error_hides_detail() {
    let err = AppError::InternalError("connection string postgres://secret".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn rejected_upload_is_400() {
    let err = AppError::Blob(BlobError::Rejected("Expected a image/* file".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn upstream_failures_are_sanitized() {
    let blob = AppError::Blob(BlobError::Upstream("AccessDenied on arn:aws:s3:::private".into()));
    let (status, json) = error_to_response(blob).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("arn:aws"));

    let notify = AppError::Notify(NotifyError::Email(EmailError::Build("bad header".into())));
    let (status, json) = error_to_response(notify).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("bad header"));
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

async fn assert_bad_request(response: axum::http::Response<Body>) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mistyped_json_field_is_400_json(pool: PgPool) {
    common::create_user(&pool, "Ada").await;
    let app = common::build_test_app(pool);
    let token = common::user_token(&app.router, "Ada").await;

    let response = post_json_auth(
        app.router,
        "/user/purchase",
        serde_json::json!({ "course_id": "abc" }),
        &token,
    )
    .await;
    assert_bad_request(response).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_or_untyped_json_body_is_400_json(pool: PgPool) {
    let app = common::build_test_app(pool);

    let syntax = Request::post("/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    assert_bad_request(common::send(app.router.clone(), syntax).await).await;

    let no_content_type = Request::post("/auth/login")
        .body(Body::from(r#"{"email":"a@example.com","password":"x"}"#))
        .unwrap();
    assert_bad_request(common::send(app.router, no_content_type).await).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_multipart_upload_is_400_json(pool: PgPool) {
    common::create_admin(&pool, "root").await;
    let app = common::build_test_app(pool);
    let token = common::admin_token(&app.router, "root").await;

    let request = Request::post("/admin/course")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Rust","price":"10"}"#))
        .unwrap();
    assert_bad_request(common::send(app.router, request).await).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_path_id_is_400_json(pool: PgPool) {
    let app = common::build_test_app(pool);

    assert_bad_request(get(app.router, "/courses/abc").await).await;
}
