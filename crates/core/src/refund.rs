//! Refund window arithmetic, request statuses, and message validation.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// Number of days after purchase during which a refund may be requested.
pub const REFUND_WINDOW_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days elapsed since purchase, rounded up.
///
/// Uses the absolute elapsed time so a purchase timestamp slightly in the
/// future (clock skew) still counts forward. Any sub-day duration other than
/// zero counts as one day.
pub fn days_since_purchase(purchased_at: Timestamp, now: Timestamp) -> i64 {
    let elapsed_ms = (now - purchased_at).num_milliseconds().abs();
    (elapsed_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Whether a refund may still be requested for a purchase made at `purchased_at`.
pub fn is_refund_eligible(purchased_at: Timestamp, now: Timestamp) -> bool {
    days_since_purchase(purchased_at, now) <= REFUND_WINDOW_DAYS
}

/// Reject with `Forbidden` once the refund window has closed.
pub fn ensure_refund_window(purchased_at: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    let days = days_since_purchase(purchased_at, now);
    if days > REFUND_WINDOW_DAYS {
        return Err(CoreError::Forbidden(format!(
            "Refund window of {REFUND_WINDOW_DAYS} days has expired ({days} days since purchase)"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Newly submitted request awaiting an admin decision.
pub const STATUS_PENDING: &str = "pending";
/// Request accepted by an admin.
pub const STATUS_APPROVED: &str = "approved";
/// Request declined by an admin.
pub const STATUS_REJECTED: &str = "rejected";

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Maximum length for the refund reason (characters).
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

/// Trim and validate a refund message, returning the trimmed text.
pub fn validate_message(message: &str) -> Result<String, CoreError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Refund message is required".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Refund message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters (got {len})"
        )));
    }
    Ok(trimmed.to_string())
}
