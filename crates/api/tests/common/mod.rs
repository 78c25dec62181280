#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use wosmap_api::auth::password::hash_password;
use wosmap_api::config::ServerConfig;
use wosmap_api::router::build_app_router;
use wosmap_api::state::AppState;
use wosmap_core::roles::Role;
use wosmap_db::models::user::{CreateUser, User};
use wosmap_db::repositories::UserRepo;

/// Password given to every account made by [`create_user`].
pub const PASSWORD: &str = "secret-pw";

/// Pages written into the test public directory.
pub const PAGES: [&str; 5] = ["map", "list", "history", "users", "levels"];

/// A router over a fresh in-memory database and a throwaway public directory.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(public_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_path: wosmap_db::MEMORY_PATH.to_string(),
        public_dir: public_dir.to_path_buf(),
        ..ServerConfig::default()
    }
}

pub async fn build_test_app() -> TestApp {
    build_test_app_with(|_| {}).await
}

/// Build the full application router, letting the caller adjust the config.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub async fn build_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let pool = wosmap_db::create_pool(wosmap_db::MEMORY_PATH)
        .await
        .expect("in-memory pool should open");
    wosmap_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");

    let public_dir = tempfile::tempdir().expect("tempdir should be created");
    for page in PAGES {
        std::fs::write(
            public_dir.path().join(format!("{page}.html")),
            format!("<h1>{page}</h1>"),
        )
        .expect("page should be written");
    }
    std::fs::write(public_dir.path().join("app.js"), "console.log('board');")
        .expect("asset should be written");

    let mut config = test_config(public_dir.path());
    adjust(&mut config);

    let state = AppState::new(pool.clone(), config.clone());
    TestApp {
        router: build_app_router(state, &config),
        pool,
        public_dir,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, None, cookie).await
}

pub async fn post_json(app: Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    send(app, Method::POST, uri, Some(body), cookie).await
}

pub async fn put_json(app: Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    send(app, Method::PUT, uri, Some(body), cookie).await
}

pub async fn delete(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, None, cookie).await
}

/// POST a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, raw: &'static str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::from(raw)).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Assert an error response's status and message.
pub async fn assert_error(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"], message, "unexpected body: {json}");
    assert!(json["code"].is_string());
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert a user with [`PASSWORD`] directly into the database.
pub async fn create_user(pool: &SqlitePool, username: &str, role: Role) -> User {
    UserRepo::upsert(
        pool,
        &CreateUser {
            id: format!("u-{username}"),
            username: username.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
        },
    )
    .await
    .unwrap()
}

/// Log in through the API and return the `sid=...` cookie pair.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/login",
        serde_json::json!({ "username": username, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    session_cookie(&response).expect("login should set the session cookie")
}

/// The `sid=...` pair from a response's `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Create a user holding `role` (named after it) and sign them in.
pub async fn login_as(test: &TestApp, role: Role) -> String {
    let username = role.as_str();
    create_user(&test.pool, username, role).await;
    login(test.app(), username, PASSWORD).await
}
