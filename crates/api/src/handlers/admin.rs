//! Admin-only catalog authoring: courses, modules, lessons.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::catalog::{parse_int, parse_links, parse_price, require, require_text};
use coursehub_core::drip::validate_drip_days;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::models::course::{CourseResponse, CreateCourse};
use coursehub_db::models::lesson::{CreateLesson, LessonResponse};
use coursehub_db::models::module::{CourseModule, CreateModule};
use coursehub_db::repositories::{CourseRepo, LessonRepo, ModuleRepo};
use coursehub_storage::{AssetKind, BlobUpload};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppMultipart};
use crate::handlers::form::{FormFile, MultipartForm};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/module`.
#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub course_id: Option<DbId>,
    pub name: Option<String>,
    pub order_index: Option<i32>,
}

/// POST /admin/course
///
/// Multipart fields: `name`, `price`, optional `description`, and an `image`
/// file. All fields are validated before the image is uploaded.
pub async fn create_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<CourseResponse>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let name = require_text("name", form.text("name"))?.to_string();
    let price_cents = parse_price(require_text("price", form.text("price"))?)?;
    let description = form.optional_text("description");
    let image = require("image", form.take_file("image"))?;
    let upload = into_upload(AssetKind::CourseCover, image)?;

    let image_url = state.blob_store.store(upload).await?;

    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            name,
            image_url,
            description,
            price_cents,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.subject_id, course_id = course.id, "Course created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: course.into() })))
}

/// POST /admin/module
pub async fn create_module(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateModuleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CourseModule>>)> {
    let course_id = require("course_id", input.course_id)?;
    let name = require_text("name", input.name.as_deref())?.to_string();
    let order_index = require("order_index", input.order_index)?;

    if CourseRepo::find_by_id(&state.pool, course_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }));
    }

    let module = ModuleRepo::create(
        &state.pool,
        &CreateModule {
            course_id,
            name,
            order_index,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.subject_id, course_id, module_id = module.id, "Module created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: module })))
}

/// POST /admin/lesson
///
/// Multipart fields: `module_id`, `title`, `order_index`, optional
/// `description`, `links` (JSON text), `drip_days` (default 0), and an
/// optional `video` file.
pub async fn create_lesson(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<LessonResponse>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let module_id: DbId = require_text("module_id", form.text("module_id"))?
        .parse()
        .map_err(|_| CoreError::Validation("module_id must be an integer".into()))?;
    let title = require_text("title", form.text("title"))?.to_string();
    let order_index = parse_int("order_index", form.text("order_index"))?;
    let drip_days = match form.optional_text("drip_days") {
        Some(raw) => validate_drip_days(parse_int("drip_days", Some(raw.as_str()))?)?,
        None => 0,
    };
    let description = form.optional_text("description");
    let links = parse_links(form.text("links"))?;
    let video = form
        .take_file("video")
        .map(|file| into_upload(AssetKind::LessonVideo, file))
        .transpose()?;

    if ModuleRepo::find_by_id(&state.pool, module_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id: module_id,
        }));
    }

    let video_url = match video {
        Some(upload) => Some(state.blob_store.store(upload).await?),
        None => None,
    };

    let lesson = LessonRepo::create(
        &state.pool,
        &CreateLesson {
            module_id,
            title,
            video_url,
            description,
            links,
            drip_days,
            order_index,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.subject_id, module_id, lesson_id = lesson.id, "Lesson created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson.into() })))
}

fn into_upload(kind: AssetKind, file: FormFile) -> AppResult<BlobUpload> {
    Ok(BlobUpload::new(
        kind,
        file.file_name.as_deref(),
        file.content_type.as_deref(),
        file.bytes,
    )?)
}
