//! Repository for the `lessons` table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson::{CreateLesson, Lesson, LessonOutline};

const COLUMNS: &str = "id, module_id, title, video_url, description, links, \
                       drip_days, order_index, created_at";

pub struct LessonRepo;

impl LessonRepo {
    /// Insert a lesson, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (module_id, title, video_url, description, links, drip_days, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.module_id)
            .bind(&input.title)
            .bind(&input.video_url)
            .bind(&input.description)
            .bind(&input.links)
            .bind(input.drip_days)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// All lessons belonging to any module of the course, ordered by module
    /// then lesson position.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = "SELECT l.id, l.module_id, l.title, l.video_url, l.description, l.links, \
                            l.drip_days, l.order_index, l.created_at
                     FROM lessons l
                     JOIN course_modules m ON m.id = l.module_id
                     WHERE m.course_id = $1
                     ORDER BY m.order_index ASC, m.id ASC, l.order_index ASC, l.id ASC";
        sqlx::query_as::<_, Lesson>(query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Title-only outline of a course's lessons for the public catalog.
    pub async fn list_outline_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<LessonOutline>, sqlx::Error> {
        let query = "SELECT l.id, l.module_id, l.title, l.drip_days, l.order_index
                     FROM lessons l
                     JOIN course_modules m ON m.id = l.module_id
                     WHERE m.course_id = $1
                     ORDER BY m.order_index ASC, m.id ASC, l.order_index ASC, l.id ASC";
        sqlx::query_as::<_, LessonOutline>(query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }
}
