//! HTTP-level integration tests for purchases, the dashboard, and drip content.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get_auth, post_json_auth};
use coursehub_db::models::lesson::CreateLesson;
use coursehub_db::models::module::CreateModule;
use coursehub_db::repositories::{LessonRepo, ModuleRepo, PurchaseRepo};
use serde_json::json;
use sqlx::PgPool;

async fn user_app(pool: &PgPool, name: &str) -> (common::TestApp, String, i64) {
    let user_id = common::create_user(pool, name).await;
    let app = common::build_test_app(pool.clone());
    let token = common::user_token(&app.router, name).await;
    (app, token, user_id)
}

/// One module with three lessons dripping at 0, 3 and 10 days.
async fn seed_drip_course(pool: &PgPool) -> i64 {
    let course_id = common::create_course(pool, "Drip Course").await;
    let module = ModuleRepo::create(
        pool,
        &CreateModule {
            course_id,
            name: "Week one".into(),
            order_index: 1,
        },
    )
    .await
    .unwrap();

    for (title, drip_days, order_index) in [("Welcome", 0, 1), ("Traits", 3, 2), ("Async", 10, 3)] {
        LessonRepo::create(
            pool,
            &CreateLesson {
                module_id: module.id,
                title: title.into(),
                video_url: Some(format!("https://cdn.test/lessons/{order_index}.mp4")),
                description: Some(format!("{title} in depth")),
                links: Some(r#"[{"label":"Docs","url":"https://docs.rs"}]"#.into()),
                drip_days,
                order_index,
            },
        )
        .await
        .unwrap();
    }
    course_id
}

// ---------------------------------------------------------------------------
// Purchase
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_then_duplicate_conflicts(pool: PgPool) {
    let course_id = common::create_course(&pool, "Course").await;
    let (app, token, user_id) = user_app(&pool, "Ada").await;

    let body = json!({ "course_id": course_id });
    let response = post_json_auth(app.router.clone(), "/user/purchase", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user_id);
    assert_eq!(json["data"]["course_id"], course_id);

    let response = post_json_auth(app.router, "/user/purchase", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_unknown_course_is_404(pool: PgPool) {
    let (app, token, _) = user_app(&pool, "Ada").await;

    let response =
        post_json_auth(app.router, "/user/purchase", json!({ "course_id": 777 }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_requires_course_id(pool: PgPool) {
    let (app, token, _) = user_app(&pool, "Ada").await;

    let response = post_json_auth(app.router, "/user/purchase", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_annotates_refund_eligibility(pool: PgPool) {
    let recent = common::create_course(&pool, "Recent").await;
    let old = common::create_course(&pool, "Old").await;
    let (app, token, user_id) = user_app(&pool, "Ada").await;

    let now = Utc::now();
    PurchaseRepo::create_at(&pool, user_id, recent, now - Duration::hours(30)).await.unwrap();
    PurchaseRepo::create_at(&pool, user_id, old, now - Duration::days(9) + Duration::hours(1))
        .await
        .unwrap();

    let response = get_auth(app.router, "/user/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(rows.len(), 2);

    let by_name = |name: &str| rows.iter().find(|r| r["name"] == name).unwrap().clone();
    let recent_row = by_name("Recent");
    assert_eq!(recent_row["days_since_purchase"], 2);
    assert_eq!(recent_row["refund_eligible"], true);
    assert!(recent_row["refund_status"].is_null());

    let old_row = by_name("Old");
    assert_eq!(old_row["days_since_purchase"], 9);
    assert_eq!(old_row["refund_eligible"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_only_lists_own_purchases(pool: PgPool) {
    let course_id = common::create_course(&pool, "Course").await;
    let other = common::create_user(&pool, "Grace").await;
    PurchaseRepo::create(&pool, other, course_id).await.unwrap();
    let (app, token, _) = user_app(&pool, "Ada").await;

    let json = body_json(get_auth(app.router, "/user/dashboard", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Content tree
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_requires_purchase(pool: PgPool) {
    let course_id = seed_drip_course(&pool).await;
    let (app, token, _) = user_app(&pool, "Ada").await;

    let response = get_auth(app.router, &format!("/user/course/{course_id}/content"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_applies_drip_release(pool: PgPool) {
    let course_id = seed_drip_course(&pool).await;
    let (app, token, user_id) = user_app(&pool, "Ada").await;

    let purchased_at = Utc::now() - Duration::days(2);
    PurchaseRepo::create_at(&pool, user_id, course_id, purchased_at).await.unwrap();

    let response = get_auth(app.router, &format!("/user/course/{course_id}/content"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["course"]["id"], course_id);
    let lessons = data["modules"][0]["lessons"].as_array().unwrap().clone();
    assert_eq!(lessons.len(), 3);

    let welcome = &lessons[0];
    assert_eq!(welcome["title"], "Welcome");
    assert_eq!(welcome["is_released"], true);
    assert_eq!(welcome["description"], "Welcome in depth");
    assert_eq!(welcome["links"][0]["url"], "https://docs.rs");
    assert!(welcome["video_url"].is_string());

    let traits = &lessons[1];
    assert_eq!(traits["title"], "Traits");
    assert_eq!(traits["is_released"], false);
    assert_eq!(traits["description"], "Coming soon");
    assert!(traits["video_url"].is_null());
    assert!(traits["links"].is_null());
    let expected = (purchased_at + Duration::days(3)).date_naive().to_string();
    assert_eq!(traits["release_date"], expected);

    assert_eq!(lessons[2]["is_released"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_released_after_drip_elapses(pool: PgPool) {
    let course_id = seed_drip_course(&pool).await;
    let (app, token, user_id) = user_app(&pool, "Ada").await;

    PurchaseRepo::create_at(&pool, user_id, course_id, Utc::now() - Duration::days(3)).await.unwrap();

    let data = body_json(
        get_auth(app.router, &format!("/user/course/{course_id}/content"), &token).await,
    )
    .await["data"]
        .clone();
    let lessons = data["modules"][0]["lessons"].as_array().unwrap().clone();
    assert_eq!(lessons[1]["is_released"], true);
    assert_eq!(lessons[1]["description"], "Traits in depth");
    assert_eq!(lessons[2]["is_released"], false);
}
