//! Repository for the `refund_requests` table.

use coursehub_core::refund::STATUS_PENDING;
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::refund::{CreateRefundRequest, RefundRequest};

const COLUMNS: &str = "id, user_id, course_id, message, status, requested_at";

pub struct RefundRepo;

impl RefundRepo {
    /// Insert a new `pending` refund request.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRefundRequest,
    ) -> Result<RefundRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO refund_requests (user_id, course_id, message, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefundRequest>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(&input.message)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Whether a `pending` request already exists for this user and course.
    pub async fn has_pending(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM refund_requests
                WHERE user_id = $1 AND course_id = $2 AND status = $3
             )",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(STATUS_PENDING)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
