//! Drip-content release rules.
//!
//! A lesson becomes visible `drip_days` calendar days after the owning course
//! was purchased. Until then only an outline of the lesson is exposed: its id,
//! title, position, and the date on which it unlocks.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::catalog::decode_links;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Description shown in place of the real text for a locked lesson.
pub const COMING_SOON_PLACEHOLDER: &str = "Coming soon";

/// Largest accepted drip delay, in either direction (about a century).
pub const MAX_DRIP_DAYS: i32 = 36_500;

/// Reject drip delays outside `-MAX_DRIP_DAYS..=MAX_DRIP_DAYS`.
pub fn validate_drip_days(drip_days: i32) -> Result<i32, CoreError> {
    if drip_days.unsigned_abs() > MAX_DRIP_DAYS.unsigned_abs() {
        return Err(CoreError::Validation(format!(
            "drip_days must be between -{MAX_DRIP_DAYS} and {MAX_DRIP_DAYS}, got {drip_days}"
        )));
    }
    Ok(drip_days)
}

/// Lesson fields as stored, before the release policy is applied.
#[derive(Debug, Clone)]
pub struct LessonContent {
    pub id: DbId,
    pub title: String,
    pub video_url: Option<String>,
    pub description: Option<String>,
    /// Raw JSON text of the link list, if any.
    pub links: Option<String>,
    pub drip_days: i32,
    pub order_index: i32,
}

/// A lesson as seen by a purchaser at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonView {
    pub id: DbId,
    pub title: String,
    pub order_index: i32,
    pub is_released: bool,
    /// Calendar date (UTC) on which the lesson unlocks; `None` when the
    /// delay falls outside the representable calendar.
    pub release_date: Option<NaiveDate>,
    pub video_url: Option<String>,
    pub description: Option<String>,
    pub links: Option<serde_json::Value>,
}

/// Instant at which a lesson with `drip_days` unlocks for a purchase made at
/// `purchased_at`. Negative values yield an instant before the purchase.
///
/// `None` when the instant is outside chrono's range.
pub fn release_at(purchased_at: Timestamp, drip_days: i32) -> Option<Timestamp> {
    purchased_at.checked_add_signed(Duration::days(i64::from(drip_days)))
}

/// Whether a lesson is visible at `now`.
///
/// An unrepresentable release instant is never reached when it lies in the
/// future and always passed when it lies in the past.
pub fn is_released(purchased_at: Timestamp, drip_days: i32, now: Timestamp) -> bool {
    match release_at(purchased_at, drip_days) {
        Some(unlock) => now >= unlock,
        None => drip_days < 0,
    }
}

/// Apply the release policy to a single lesson.
///
/// Released lessons are returned in full with their link list decoded.
/// Locked lessons keep only id, title, and position; the description is
/// replaced by [`COMING_SOON_PLACEHOLDER`] and media/links are withheld.
pub fn present_lesson(lesson: LessonContent, purchased_at: Timestamp, now: Timestamp) -> LessonView {
    let release_date = release_at(purchased_at, lesson.drip_days).map(|t| t.date_naive());

    if is_released(purchased_at, lesson.drip_days, now) {
        LessonView {
            id: lesson.id,
            title: lesson.title,
            order_index: lesson.order_index,
            is_released: true,
            release_date,
            video_url: lesson.video_url,
            description: lesson.description,
            links: decode_links(lesson.links.as_deref()),
        }
    } else {
        LessonView {
            id: lesson.id,
            title: lesson.title,
            order_index: lesson.order_index,
            is_released: false,
            release_date,
            video_url: None,
            description: Some(COMING_SOON_PLACEHOLDER.to_string()),
            links: None,
        }
    }
}
