//! Lesson model, DTOs, and conversions into the drip policy types.

use coursehub_core::catalog::decode_links;
use coursehub_core::drip::LessonContent;
use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `lessons` table.
///
/// `links` holds the raw JSON text; use [`LessonResponse`] or
/// [`LessonContent`] to get a decoded view.
#[derive(Debug, Clone, FromRow)]
pub struct Lesson {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub video_url: Option<String>,
    pub description: Option<String>,
    pub links: Option<String>,
    pub drip_days: i32,
    pub order_index: i32,
    pub created_at: Timestamp,
}

impl From<Lesson> for LessonContent {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            video_url: lesson.video_url,
            description: lesson.description,
            links: lesson.links,
            drip_days: lesson.drip_days,
            order_index: lesson.order_index,
        }
    }
}

/// Full lesson for admin responses, links decoded.
#[derive(Debug, Clone, Serialize)]
pub struct LessonResponse {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub video_url: Option<String>,
    pub description: Option<String>,
    pub links: Option<serde_json::Value>,
    pub drip_days: i32,
    pub order_index: i32,
    pub created_at: Timestamp,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        let links = decode_links(lesson.links.as_deref());
        Self {
            id: lesson.id,
            module_id: lesson.module_id,
            title: lesson.title,
            video_url: lesson.video_url,
            description: lesson.description,
            links,
            drip_days: lesson.drip_days,
            order_index: lesson.order_index,
            created_at: lesson.created_at,
        }
    }
}

/// Public outline entry: enough to show a syllabus, no content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonOutline {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub drip_days: i32,
    pub order_index: i32,
}

/// DTO for creating a lesson. `links` must already be validated JSON text.
#[derive(Debug)]
pub struct CreateLesson {
    pub module_id: DbId,
    pub title: String,
    pub video_url: Option<String>,
    pub description: Option<String>,
    pub links: Option<String>,
    pub drip_days: i32,
    pub order_index: i32,
}
