//! Route definitions for the public catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::course;
use crate::state::AppState;

/// Catalog routes, merged at the root so `/courses` has no trailing slash.
///
/// ```text
/// GET /courses               -> list
/// GET /courses/{course_id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(course::list))
        .route("/courses/{course_id}", get(course::get_by_id))
}
