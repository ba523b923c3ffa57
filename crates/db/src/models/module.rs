//! Course module model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `course_modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseModule {
    pub id: DbId,
    pub course_id: DbId,
    pub name: String,
    pub order_index: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a module.
#[derive(Debug)]
pub struct CreateModule {
    pub course_id: DbId,
    pub name: String,
    pub order_index: i32,
}
