//! Handlers for the `/auth` resource (admin login, user registration and login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::catalog::{normalize_email, require_secret, require_text};
use coursehub_core::error::CoreError;
use coursehub_core::roles::{ROLE_ADMIN, ROLE_USER};
use coursehub_core::types::DbId;
use coursehub_db::models::user::{CreateUser, UserResponse};
use coursehub_db::repositories::user_repo::EMAIL_UNIQUE_CONSTRAINT;
use coursehub_db::repositories::{AdminRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/admin/login`.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public admin info embedded in [`AdminAuthResponse`].
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: DbId,
    pub username: String,
}

/// Successful admin login.
#[derive(Debug, Serialize)]
pub struct AdminAuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminInfo,
}

/// Successful user login.
#[derive(Debug, Serialize)]
pub struct UserAuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/admin/login
///
/// Exchange admin credentials for an admin token.
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(input): AppJson<AdminLoginRequest>,
) -> AppResult<Json<DataResponse<AdminAuthResponse>>> {
    let username = require_text("username", input.username.as_deref())?;
    let password = require_secret("password", input.password.as_deref())?;

    let admin = AdminRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(invalid_admin_credentials)?;

    if !check_password(password, &admin.password_hash)? {
        tracing::warn!(username = %username, "Admin login failed");
        return Err(invalid_admin_credentials());
    }

    let token = issue_token(&state, admin.id, ROLE_ADMIN)?;
    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(DataResponse {
        data: AdminAuthResponse {
            token,
            expires_in: state.config.jwt.expiry_secs_for(ROLE_ADMIN),
            admin: AdminInfo {
                id: admin.id,
                username: admin.username,
            },
        },
    }))
}

/// POST /auth/register
///
/// Create a user account. Returns 201 with the new user; 409 if the email is
/// already registered.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let name = require_text("name", input.name.as_deref())?;
    let email = normalize_email(require_text("email", input.email.as_deref())?)?;
    let password = require_secret("password", input.password.as_deref())?;
    validate_new_password(password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(email_taken());
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            email,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration of the same email.
        if coursehub_db::is_unique_violation(&e, EMAIL_UNIQUE_CONSTRAINT) {
            email_taken()
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// POST /auth/login
///
/// Exchange user credentials for a user token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<UserAuthResponse>>> {
    let email = require_text("email", input.email.as_deref())?.to_lowercase();
    let password = require_secret("password", input.password.as_deref())?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_user_credentials)?;

    if !check_password(password, &user.password_hash)? {
        return Err(invalid_user_credentials());
    }

    let token = issue_token(&state, user.id, ROLE_USER)?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(DataResponse {
        data: UserAuthResponse {
            token,
            expires_in: state.config.jwt.expiry_secs_for(ROLE_USER),
            user: user.into(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_password(password: &str, hash: &str) -> AppResult<bool> {
    verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

fn issue_token(state: &AppState, subject: DbId, role: &str) -> AppResult<String> {
    generate_access_token(subject, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

fn invalid_admin_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

fn invalid_user_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

fn email_taken() -> AppError {
    AppError::Core(CoreError::Conflict("Email is already registered".into()))
}
