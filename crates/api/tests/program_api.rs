//! HTTP-level integration tests for the public and admin program endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, delete_with_cookie, get, get_with_cookie, post_json,
    post_json_with_cookie, put_json_with_cookie, stored_path, upload_png,
};
use imi_core::enquiry::NewEnquiry;
use imi_core::program::ProgramInput;
use imi_core::types::DbId;
use imi_db::repositories::{EnquiryRepo, ProgramRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_program(pool: &PgPool, title: &str, display_order: i32) -> DbId {
    let input = ProgramInput {
        title: Some(title.to_string()),
        features: Some(vec!["Live sessions".to_string()]),
        display_order: Some(display_order),
        ..Default::default()
    }
    .into_new_program()
    .unwrap();
    ProgramRepo::create(pool, &input).await.unwrap()
}

async fn seed_enquiry(pool: &PgPool, program: &str) {
    let input = NewEnquiry {
        name: "Ruwan Jayasinghe".to_string(),
        email: "ruwan@example.com".to_string(),
        phone: "0712345678".to_string(),
        program: program.to_string(),
        message: None,
    };
    EnquiryRepo::create(pool, &input).await.unwrap();
}

fn titles(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Public listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_active_programs_in_display_order(pool: PgPool) {
    seed_program(&pool, "Second", 2).await;
    seed_program(&pool, "First", 1).await;
    let hidden = seed_program(&pool, "Hidden", 0).await;
    ProgramRepo::deactivate(&pool, hidden).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/api/programs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(titles(&json), vec!["First", "Second"]);
    assert_eq!(json[0]["features"], json!(["Live sessions"]));
    assert_eq!(json[0]["icon"], "Laptop");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn popular_ranks_by_enquiry_count_before_display_order(pool: PgPool) {
    seed_program(&pool, "A", 5).await;
    seed_program(&pool, "B", 1).await;
    seed_enquiry(&pool, "A").await;
    seed_enquiry(&pool, "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/programs/popular?limit=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(titles(&json), vec!["A", "B"]);
    assert_eq!(json[0]["enquiry_count"], 2);
    assert_eq!(json[1]["enquiry_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn popular_defaults_to_four_results(pool: PgPool) {
    for i in 0..6 {
        seed_program(&pool, &format!("Program {i}"), i).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/programs/popular").await).await;

    assert_eq!(json.as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn popular_with_non_numeric_limit_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/programs/popular?limit=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("limit"));
}

// ---------------------------------------------------------------------------
// Admin management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_require_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/admin/programs", json!({ "title": "X" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app, "/api/admin/programs").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_applies_defaults_and_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let body = json!({
        "title": "  Certificate in Practical AI Tools  ",
        "features": ["Prompting", "Automation"],
        "delivery_mode": "Online & Virtual",
        "for_whom": ["Office staff"],
        "price": 18500.0
    });
    let response = post_json_with_cookie(app, "/api/admin/programs", body, &cookie).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["title"], "Certificate in Practical AI Tools");
    assert_eq!(json["description"], "");
    assert_eq!(json["icon"], "Laptop");
    assert_eq!(json["features"], json!(["Prompting", "Automation"]));
    assert_eq!(json["delivery_mode"], "Online & Virtual");
    assert_eq!(json["for_whom"], json!(["Office staff"]));
    assert_eq!(json["display_order"], 0);
    assert_eq!(json["is_active"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_blank_title_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let response =
        post_json_with_cookie(app, "/api/admin/programs", json!({ "title": "   " }), &cookie).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field"], "title");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_program(pool: PgPool) {
    let id = seed_program(&pool, "Bookkeeping", 3).await;
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let body = json!({ "title": "Bookkeeping Basics", "icon": "Calculator" });
    let response =
        put_json_with_cookie(app, &format!("/api/admin/programs/{id}"), body, &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["title"], "Bookkeeping Basics");
    assert_eq!(json["icon"], "Calculator");
    // Full replacement: omitted fields fall back to defaults.
    assert_eq!(json["features"], json!([]));
    assert_eq!(json["display_order"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_unknown_program_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let response = put_json_with_cookie(
        app,
        "/api/admin/programs/999999",
        json!({ "title": "Ghost" }),
        &cookie,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_soft_deletes_program(pool: PgPool) {
    let id = seed_program(&pool, "Retired Course", 1).await;
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let response =
        delete_with_cookie(app.clone(), &format!("/api/admin/programs/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let public = body_json(get(app.clone(), "/api/programs").await).await;
    assert!(titles(&public).is_empty());

    let active_only =
        body_json(get_with_cookie(app.clone(), "/api/admin/programs", &cookie).await).await;
    assert!(titles(&active_only).is_empty());

    let all = body_json(
        get_with_cookie(app, "/api/admin/programs?include_inactive=true", &cookie).await,
    )
    .await;
    assert_eq!(titles(&all), vec!["Retired Course"]);
    assert_eq!(all[0]["is_active"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unknown_program_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let response = delete_with_cookie(app, "/api/admin/programs/424242", &cookie).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_program_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let response = delete_with_cookie(app.clone(), "/api/admin/programs/abc", &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = put_json_with_cookie(
        app,
        "/api/admin/programs/abc",
        json!({ "title": "Ghost" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn include_inactive_must_be_boolean(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let response =
        get_with_cookie(app, "/api/admin/programs?include_inactive=maybe", &cookie).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Image cleanup
// ---------------------------------------------------------------------------

async fn create_with_image(app: axum::Router, cookie: &str, image: &str) -> DbId {
    let body = json!({ "title": "Graphic Design", "image": image });
    let response = post_json_with_cookie(app, "/api/admin/programs", body, cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_program_image_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_uploads(pool.clone(), dir.path());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let url = upload_png(app.clone(), &cookie, "banner.png").await;
    let file = stored_path(dir.path(), &url);
    assert!(file.exists());
    let id = create_with_image(app.clone(), &cookie, &url).await;

    let response = delete_with_cookie(app, &format!("/api/admin/programs/{id}"), &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!file.exists(), "image file should be removed on delete");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_new_image_removes_old_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_uploads(pool.clone(), dir.path());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let old_url = upload_png(app.clone(), &cookie, "old.png").await;
    let new_url = upload_png(app.clone(), &cookie, "new.png").await;
    let id = create_with_image(app.clone(), &cookie, &old_url).await;

    let body = json!({ "title": "Graphic Design", "image": new_url });
    let response =
        put_json_with_cookie(app, &format!("/api/admin/programs/{id}"), body, &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["image"], new_url.as_str());
    assert!(!stored_path(dir.path(), &old_url).exists());
    assert!(stored_path(dir.path(), &new_url).exists());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_keeping_image_leaves_file_in_place(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_uploads(pool.clone(), dir.path());
    let cookie = admin_cookie(&pool, app.clone()).await;

    let url = upload_png(app.clone(), &cookie, "keep.png").await;
    let id = create_with_image(app.clone(), &cookie, &url).await;

    let body = json!({ "title": "Graphic Design Pro", "image": url });
    let response =
        put_json_with_cookie(app, &format!("/api/admin/programs/{id}"), body, &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(stored_path(dir.path(), &url).exists());
}
