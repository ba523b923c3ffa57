//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity extracted from a JWT Bearer token in the `Authorization` header.
///
/// Rejections:
/// - no header, or no `Bearer` token in it -> 401 `UNAUTHORIZED`
/// - a token that fails signature or expiry checks -> 403 `INVALID_TOKEN`
///
/// Role checks are layered on top by the [`crate::middleware::rbac`] extractors.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `users.id` for role `user`, `admins.id` for role `admin`.
    pub subject_id: DbId,
    /// The role tag from the token.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing bearer token. Expected: Authorization: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Core(CoreError::InvalidToken("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            subject_id: claims.sub,
            role: claims.role,
        })
    }
}
