//! Repository for the `course_modules` table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::module::{CourseModule, CreateModule};

const COLUMNS: &str = "id, course_id, name, order_index, created_at";

pub struct ModuleRepo;

impl ModuleRepo {
    /// Insert a module, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateModule) -> Result<CourseModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_modules (course_id, name, order_index)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(input.course_id)
            .bind(&input.name)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// Find a module by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM course_modules WHERE id = $1");
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's modules by order position (ties broken by id).
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseModule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM course_modules
             WHERE course_id = $1
             ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }
}
