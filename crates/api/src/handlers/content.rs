//! Purchaser view of a course: the module/lesson tree with drip release applied.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use coursehub_core::drip::{present_lesson, LessonView};
use coursehub_core::error::CoreError;
use coursehub_core::types::{DbId, Timestamp};
use coursehub_db::models::course::CourseResponse;
use coursehub_db::repositories::{CourseRepo, LessonRepo, ModuleRepo, PurchaseRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::middleware::rbac::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModuleContent {
    pub id: DbId,
    pub name: String,
    pub order_index: i32,
    pub lessons: Vec<LessonView>,
}

#[derive(Debug, Serialize)]
pub struct CourseContent {
    pub course: CourseResponse,
    pub purchased_at: Timestamp,
    pub modules: Vec<ModuleContent>,
}

/// GET /user/course/{course_id}/content
///
/// 403 unless the caller purchased the course. Lessons whose drip delay has
/// not elapsed are returned in redacted form.
pub async fn course_content(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    AppPath(course_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<CourseContent>>> {
    let purchase = PurchaseRepo::find_for_user(&state.pool, user.subject_id, course_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Course has not been purchased".into(),
            ))
        })?;

    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let modules = ModuleRepo::list_by_course(&state.pool, course_id).await?;
    let lessons = LessonRepo::list_by_course(&state.pool, course_id).await?;

    let now = Utc::now();
    let mut by_module: HashMap<DbId, Vec<LessonView>> = HashMap::new();
    for lesson in lessons {
        by_module
            .entry(lesson.module_id)
            .or_default()
            .push(present_lesson(lesson.into(), purchase.purchased_at, now));
    }

    let modules = modules
        .into_iter()
        .map(|module| ModuleContent {
            lessons: by_module.remove(&module.id).unwrap_or_default(),
            id: module.id,
            name: module.name,
            order_index: module.order_index,
        })
        .collect();

    Ok(Json(DataResponse {
        data: CourseContent {
            course: course.into(),
            purchased_at: purchase.purchased_at,
            modules,
        },
    }))
}
