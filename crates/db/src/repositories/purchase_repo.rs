//! Repository for the `purchases` table.

use coursehub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::purchase::{Purchase, PurchasedCourse};

const COLUMNS: &str = "id, user_id, course_id, purchased_at";

/// Unique constraint enforcing one purchase per `(user_id, course_id)`.
pub const USER_COURSE_UNIQUE_CONSTRAINT: &str = "uq_purchases_user_course";

pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Record a purchase made now.
    ///
    /// A second purchase of the same course by the same user fails with a
    /// unique violation on [`USER_COURSE_UNIQUE_CONSTRAINT`] and leaves the
    /// existing row untouched.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Purchase, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases (user_id, course_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Record a purchase with an explicit timestamp (imports, fixtures).
    pub async fn create_at(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
        purchased_at: Timestamp,
    ) -> Result<Purchase, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases (user_id, course_id, purchased_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(purchased_at)
            .fetch_one(pool)
            .await
    }

    /// Find the purchase of `course_id` by `user_id`, if any.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases WHERE user_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's purchases joined with course details and the status of the
    /// most recent refund request per course, newest purchase first.
    pub async fn list_courses_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PurchasedCourse>, sqlx::Error> {
        sqlx::query_as::<_, PurchasedCourse>(
            "SELECT p.id AS purchase_id, p.purchased_at,
                    c.id AS course_id, c.name, c.image_url, c.description, c.price_cents,
                    (SELECT r.status FROM refund_requests r
                      WHERE r.user_id = p.user_id AND r.course_id = p.course_id
                      ORDER BY r.requested_at DESC, r.id DESC
                      LIMIT 1) AS refund_status
             FROM purchases p
             JOIN courses c ON c.id = p.course_id
             WHERE p.user_id = $1
             ORDER BY p.purchased_at DESC, p.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
