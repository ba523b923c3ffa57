//! Admin account model.

use coursehub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Admin row from the `admins` table. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating an admin (used by the startup bootstrap).
#[derive(Debug)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
}
