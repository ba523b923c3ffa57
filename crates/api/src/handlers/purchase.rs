//! Purchase recording and the purchaser's dashboard.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use coursehub_core::catalog::{format_price, require};
use coursehub_core::error::CoreError;
use coursehub_core::refund::{days_since_purchase, is_refund_eligible};
use coursehub_core::types::{DbId, Timestamp};
use coursehub_db::models::purchase::{Purchase, PurchasedCourse};
use coursehub_db::repositories::purchase_repo::USER_COURSE_UNIQUE_CONSTRAINT;
use coursehub_db::repositories::{CourseRepo, PurchaseRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /user/purchase`.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub course_id: Option<DbId>,
}

/// One row of the dashboard: a purchased course annotated with refund state.
#[derive(Debug, Serialize)]
pub struct DashboardEntry {
    pub course_id: DbId,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub price: String,
    pub purchase_id: DbId,
    pub purchased_at: Timestamp,
    pub days_since_purchase: i64,
    pub refund_eligible: bool,
    /// Status of the most recent refund request, if any was made.
    pub refund_status: Option<String>,
}

impl DashboardEntry {
    fn new(row: PurchasedCourse, now: Timestamp) -> Self {
        Self {
            course_id: row.course_id,
            name: row.name,
            image_url: row.image_url,
            description: row.description,
            price: format_price(row.price_cents),
            purchase_id: row.purchase_id,
            purchased_at: row.purchased_at,
            days_since_purchase: days_since_purchase(row.purchased_at, now),
            refund_eligible: is_refund_eligible(row.purchased_at, now),
            refund_status: row.refund_status,
        }
    }
}

/// POST /user/purchase
///
/// Record a purchase of `course_id` by the caller. 409 if already purchased.
pub async fn purchase(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<PurchaseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Purchase>>)> {
    let course_id = require("course_id", input.course_id)?;

    if CourseRepo::find_by_id(&state.pool, course_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }));
    }

    let purchase = PurchaseRepo::create(&state.pool, user.subject_id, course_id)
        .await
        .map_err(|e| {
            if coursehub_db::is_unique_violation(&e, USER_COURSE_UNIQUE_CONSTRAINT) {
                AppError::Core(CoreError::Conflict("Course already purchased".into()))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = user.subject_id, course_id, purchase_id = purchase.id, "Course purchased");
    Ok((StatusCode::CREATED, Json(DataResponse { data: purchase })))
}

/// GET /user/dashboard
pub async fn dashboard(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DashboardEntry>>>> {
    let rows = PurchaseRepo::list_courses_for_user(&state.pool, user.subject_id).await?;
    let now = Utc::now();

    Ok(Json(DataResponse {
        data: rows.into_iter().map(|row| DashboardEntry::new(row, now)).collect(),
    }))
}
