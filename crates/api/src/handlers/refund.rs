//! Refund requests from purchasers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use coursehub_core::catalog::require;
use coursehub_core::error::CoreError;
use coursehub_core::refund::{ensure_refund_window, validate_message};
use coursehub_core::types::DbId;
use coursehub_db::models::refund::{CreateRefundRequest, RefundRequest};
use coursehub_db::repositories::{CourseRepo, PurchaseRepo, RefundRepo, UserRepo};
use coursehub_notifications::RefundNotice;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /user/refund`.
#[derive(Debug, Deserialize)]
pub struct RefundRequestBody {
    pub course_id: Option<DbId>,
    pub message: Option<String>,
}

/// POST /user/refund
///
/// Rejections, in evaluation order:
/// - 400 missing course or message
/// - 403 course not purchased, or refund window closed
/// - 409 a pending request already exists
///
/// The request row is committed before the administrator is notified. If
/// delivery fails the row stays and the caller gets 500.
pub async fn request_refund(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<RefundRequestBody>,
) -> AppResult<(StatusCode, Json<DataResponse<RefundRequest>>)> {
    let course_id = require("course_id", input.course_id)?;
    let message = validate_message(input.message.as_deref().unwrap_or_default())?;

    let purchase = PurchaseRepo::find_for_user(&state.pool, user.subject_id, course_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Course has not been purchased".into(),
            ))
        })?;

    ensure_refund_window(purchase.purchased_at, Utc::now())?;

    if RefundRepo::has_pending(&state.pool, user.subject_id, course_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A refund request for this course is already pending".into(),
        )));
    }

    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;
    let account = UserRepo::find_by_id(&state.pool, user.subject_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.subject_id,
        }))?;

    let refund = RefundRepo::create(
        &state.pool,
        &CreateRefundRequest {
            user_id: user.subject_id,
            course_id,
            message,
        },
    )
    .await?;

    let notice = RefundNotice {
        refund_id: refund.id,
        user_name: account.name,
        user_email: account.email,
        course_id,
        course_name: course.name,
        message: refund.message.clone(),
        purchased_at: purchase.purchased_at,
        requested_at: refund.requested_at,
    };

    if let Err(e) = state.notifier.refund_requested(&notice).await {
        tracing::error!(refund_id = refund.id, error = %e, "Refund request stored but notification failed");
        return Err(e.into());
    }

    tracing::info!(user_id = user.subject_id, course_id, refund_id = refund.id, "Refund requested");
    Ok((StatusCode::CREATED, Json(DataResponse { data: refund })))
}
