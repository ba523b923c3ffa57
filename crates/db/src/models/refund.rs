//! Refund request model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `refund_requests` table.
///
/// `status` is one of the constants in [`coursehub_core::refund`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RefundRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub message: String,
    pub status: String,
    pub requested_at: Timestamp,
}

/// DTO for submitting a refund request. New rows always start as `pending`.
#[derive(Debug)]
pub struct CreateRefundRequest {
    pub user_id: DbId,
    pub course_id: DbId,
    pub message: String,
}
