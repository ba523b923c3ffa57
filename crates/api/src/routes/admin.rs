//! Route definitions for the `/admin` resource. All require an admin token.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /course   -> create_course (multipart)
/// POST /module   -> create_module
/// POST /lesson   -> create_lesson (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/course", post(admin::create_course))
        .route("/module", post(admin::create_module))
        .route("/lesson", post(admin::create_lesson))
}
