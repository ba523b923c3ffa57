//! Purchase ledger model.

use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `purchases` table. At most one per `(user_id, course_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Purchase {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub purchased_at: Timestamp,
}

/// A purchase joined with its course and the latest refund request status.
#[derive(Debug, Clone, FromRow)]
pub struct PurchasedCourse {
    pub purchase_id: DbId,
    pub purchased_at: Timestamp,
    pub course_id: DbId,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub refund_status: Option<String>,
}
