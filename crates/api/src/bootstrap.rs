//! First-start creation of the administrator account.

use coursehub_db::models::admin::CreateAdmin;
use coursehub_db::repositories::AdminRepo;
use coursehub_db::DbPool;

use crate::auth::password::{hash_password, validate_new_password};

const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Credentials for the admin created when the `admins` table is empty.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: Option<String>,
}

impl AdminBootstrap {
    /// | Env Var          | Default  |
    /// |------------------|----------|
    /// | `ADMIN_USERNAME` | `admin`  |
    /// | `ADMIN_PASSWORD` | --       |
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("ADMIN_USERNAME")
                .ok()
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.into()),
            password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
        }
    }
}

/// What [`ensure_admin`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// At least one admin already existed; nothing was written.
    Existing,
    /// A new admin was created with this id.
    Created(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("No admin account exists and ADMIN_PASSWORD is not set")]
    MissingPassword,
    #[error("ADMIN_PASSWORD rejected: {0}")]
    WeakPassword(String),
    #[error("Password hashing error: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create the bootstrap admin if no admin exists yet.
pub async fn ensure_admin(
    pool: &DbPool,
    bootstrap: &AdminBootstrap,
) -> Result<BootstrapOutcome, BootstrapError> {
    if AdminRepo::count(pool).await? > 0 {
        return Ok(BootstrapOutcome::Existing);
    }

    let password = bootstrap
        .password
        .as_deref()
        .ok_or(BootstrapError::MissingPassword)?;
    validate_new_password(password).map_err(|e| BootstrapError::WeakPassword(e.to_string()))?;
    let password_hash = hash_password(password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            username: bootstrap.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Bootstrap admin created");
    Ok(BootstrapOutcome::Created(admin.id))
}
