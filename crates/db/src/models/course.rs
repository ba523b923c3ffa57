//! Course entity model and DTOs.

use coursehub_core::catalog::format_price;
use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Course row from the `courses` table.
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price_cents: i64,
    pub created_at: Timestamp,
}

/// Course as returned by the API, with the price rendered as a decimal string.
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub price: String,
    pub price_cents: i64,
    pub created_at: Timestamp,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            image_url: course.image_url,
            description: course.description,
            price: format_price(course.price_cents),
            price_cents: course.price_cents,
            created_at: course.created_at,
        }
    }
}

/// DTO for creating a new course.
#[derive(Debug)]
pub struct CreateCourse {
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub price_cents: i64,
}
