#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{ImageFormat, Rgb, RgbImage};
use sqlx::PgPool;
use tower::ServiceExt;

use imi_api::auth::password::hash_password;
use imi_api::auth::session::SESSION_COOKIE;
use imi_api::config::{ServerConfig, SessionConfig};
use imi_api::notifications::EnquiryNotifier;
use imi_api::router::build_app_router;
use imi_api::state::AppState;
use imi_api::storage::ImageStore;
use imi_db::models::admin::{Admin, CreateAdmin};
use imi_db::repositories::AdminRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 5,
        upload_dir: upload_dir.to_path_buf(),
        session: SessionConfig {
            ttl_hours: 24,
            cookie_secure: false,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
///
/// Uploads go to a shared scratch directory; tests that write files should
/// use [`build_test_app_with_uploads`] with their own temp dir.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_uploads(pool, &scratch_upload_dir())
}

pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path) -> Router {
    let config = test_config(upload_dir);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier: Arc::new(EnquiryNotifier::log_only()),
        images: Arc::new(ImageStore::new(upload_dir)),
    };
    build_app_router(state, &config)
}

fn scratch_upload_dir() -> PathBuf {
    std::env::temp_dir().join("imi-api-tests-uploads")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send(app, builder.body(body).unwrap()).await
}

pub async fn get(app: Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    request(app, Method::GET, uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    request(app, Method::POST, uri, Some(body), Some(cookie)).await
}

pub async fn post_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    request(app, Method::POST, uri, None, Some(cookie)).await
}

pub async fn put_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    request(app, Method::PUT, uri, Some(body), Some(cookie)).await
}

pub async fn patch_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response {
    request(app, Method::PATCH, uri, Some(body), Some(cookie)).await
}

pub async fn delete_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    request(app, Method::DELETE, uri, None, Some(cookie)).await
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

pub const BOUNDARY: &str = "imi-test-boundary";
pub const UPLOAD_URI: &str = "/api/admin/upload/program-image";

pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload(app: Router, cookie: Option<&str>, body: Vec<u8>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(UPLOAD_URI)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Upload a small PNG as an admin and return the stored image URL.
pub async fn upload_png(app: Router, cookie: &str, filename: &str) -> String {
    let body = multipart_body("image", filename, "image/png", &png_bytes(320, 180));
    let response = upload(app, Some(cookie), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["imageUrl"]
        .as_str()
        .expect("upload should return imageUrl")
        .to_string()
}

/// Filesystem location of an `/uploads/...` URL under `upload_dir`.
pub fn stored_path(upload_dir: &Path, url: &str) -> PathBuf {
    upload_dir.join(url.trim_start_matches("/uploads/"))
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// The raw `Set-Cookie` header for the session cookie, if any.
pub fn set_session_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .map(str::to_string)
}

/// `imi_session=<token>` from the response, ready for a `Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    set_session_cookie_header(response)
        .and_then(|h| h.split(';').next().map(|pair| pair.trim().to_string()))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an admin with a bcrypt-hashed password.
pub async fn create_admin(pool: &PgPool, username: &str, password: &str, name: &str) -> Admin {
    let input = CreateAdmin {
        username: username.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
        name: name.to_string(),
    };
    AdminRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed")
}

/// Log in through the API and return the session cookie pair.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/admin/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("login should set the session cookie")
}

/// Create an admin and log in as them.
pub async fn admin_cookie(pool: &PgPool, app: Router) -> String {
    create_admin(pool, "admin", "s3cret-pass", "Site Admin").await;
    login(app, "admin", "s3cret-pass").await
}
