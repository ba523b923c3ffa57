pub mod admin;
pub mod auth;
pub mod course;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/admin/login                   admin login (public)
/// /auth/register                      user registration (public)
/// /auth/login                         user login (public)
///
/// /courses                            catalog listing (public)
/// /courses/{course_id}                course detail with syllabus (public)
///
/// /user/purchase                      record a purchase (user)
/// /user/dashboard                     purchased courses (user)
/// /user/course/{course_id}/content    drip-filtered lesson tree (user)
/// /user/refund                        submit a refund request (user)
///
/// /admin/course                       create course, multipart (admin)
/// /admin/module                       create module (admin)
/// /admin/lesson                       create lesson, multipart (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(course::router())
        .nest("/user", user::router())
        .nest("/admin", admin::router())
}
