//! Route definitions for the `/user` resource. All require a user token.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, purchase, refund};
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /purchase                     -> purchase
/// GET  /dashboard                    -> dashboard
/// GET  /course/{course_id}/content   -> course_content
/// POST /refund                       -> request_refund
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/purchase", post(purchase::purchase))
        .route("/dashboard", get(purchase::dashboard))
        .route("/course/{course_id}/content", get(content::course_content))
        .route("/refund", post(refund::request_refund))
}
