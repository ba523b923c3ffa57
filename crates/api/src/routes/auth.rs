//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /admin/login  -> admin_login
/// POST /register     -> register
/// POST /login        -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(auth::admin_login))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}
