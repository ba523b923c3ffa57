//! Public catalog handlers for the `/courses` resource.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::course::CourseResponse;
use coursehub_db::models::lesson::LessonOutline;
use coursehub_db::models::module::CourseModule;
use coursehub_db::repositories::{CourseRepo, LessonRepo, ModuleRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// A module with the titles of its lessons, for the public syllabus.
#[derive(Debug, Serialize)]
pub struct ModuleOutline {
    #[serde(flatten)]
    pub module: CourseModule,
    pub lessons: Vec<LessonOutline>,
}

/// Course detail: the course plus its syllabus. No lesson content.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub modules: Vec<ModuleOutline>,
}

/// GET /courses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<CourseResponse>>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: courses.into_iter().map(CourseResponse::from).collect(),
    }))
}

/// GET /courses/{course_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(course_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<CourseDetail>>> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let modules = ModuleRepo::list_by_course(&state.pool, course_id).await?;
    let mut by_module: HashMap<DbId, Vec<LessonOutline>> = HashMap::new();
    for lesson in LessonRepo::list_outline_by_course(&state.pool, course_id).await? {
        by_module.entry(lesson.module_id).or_default().push(lesson);
    }

    let modules = modules
        .into_iter()
        .map(|module| ModuleOutline {
            lessons: by_module.remove(&module.id).unwrap_or_default(),
            module,
        })
        .collect();

    Ok(Json(DataResponse {
        data: CourseDetail {
            course: course.into(),
            modules,
        },
    }))
}
