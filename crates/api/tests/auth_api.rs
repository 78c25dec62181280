//! HTTP-level integration tests for login, logout and the session probe.

mod common;

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{CONTENT_TYPE, RETRY_AFTER, SET_COOKIE};
use axum::http::{Request, StatusCode};
use common::{
    assert_error, body_json, create_user, get, login, post_json, post_raw, session_cookie,
    PASSWORD,
};
use serde_json::json;
use wosmap_core::roles::Role;
use wosmap_db::models::audit::AuditQuery;
use tower::ServiceExt;
use wosmap_db::repositories::{AuditLogRepo, UserRepo};

#[tokio::test]
async fn login_sets_http_only_cookie_and_returns_user() {
    let test = common::build_test_app().await;
    let user = create_user(&test.pool, "alice", Role::Moderator).await;

    let response = post_json(
        test.app(),
        "/api/login",
        json!({ "username": "alice", "password": PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("sid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["role"], "moderator");
    assert!(json["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn secure_cookie_in_production() {
    let test = common::build_test_app_with(|c| c.secure_cookies = true).await;
    create_user(&test.pool, "alice", Role::Viewer).await;

    let response = post_json(
        test.app(),
        "/api/login",
        json!({ "username": "alice", "password": PASSWORD }),
        None,
    )
    .await;
    assert!(response.headers()[SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Secure"));
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let test = common::build_test_app().await;
    create_user(&test.pool, "alice", Role::Viewer).await;

    let wrong_password = post_json(
        test.app(),
        "/api/login",
        json!({ "username": "alice", "password": "nope" }),
        None,
    )
    .await;
    assert!(session_cookie(&wrong_password).is_none());
    assert_error(wrong_password, StatusCode::UNAUTHORIZED, "Invalid credentials").await;

    let unknown_user = post_json(
        test.app(),
        "/api/login",
        json!({ "username": "ghost", "password": PASSWORD }),
        None,
    )
    .await;
    assert_error(unknown_user, StatusCode::UNAUTHORIZED, "Invalid credentials").await;

    let empty_body = post_json(test.app(), "/api/login", json!({}), None).await;
    assert_eq!(empty_body.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let test = common::build_test_app().await;
    let response = post_raw(test.app(), "/api/login", "{\"username\":", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn me_reports_the_session_user_or_null() {
    let test = common::build_test_app().await;
    create_user(&test.pool, "alice", Role::Admin).await;

    let anonymous = body_json(get(test.app(), "/api/me", None).await).await;
    assert_eq!(anonymous["user"], serde_json::Value::Null);

    let stale = body_json(get(test.app(), "/api/me", Some("sid=not-a-session")).await).await;
    assert_eq!(stale["user"], serde_json::Value::Null);

    let cookie = login(test.app(), "alice", PASSWORD).await;
    let me = body_json(get(test.app(), "/api/me", Some(&cookie)).await).await;
    assert_eq!(me["user"]["username"], "alice");
    assert_eq!(me["user"]["role"], "admin");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let test = common::build_test_app().await;
    create_user(&test.pool, "alice", Role::Viewer).await;
    let cookie = login(test.app(), "alice", PASSWORD).await;

    let response = post_json(test.app(), "/api/logout", json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(removal.starts_with("sid="));
    assert!(removal.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["success"], true);

    let me = body_json(get(test.app(), "/api/me", Some(&cookie)).await).await;
    assert_eq!(me["user"], serde_json::Value::Null);

    let again = post_json(test.app(), "/api/logout", json!({}), Some(&cookie)).await;
    assert_error(again, StatusCode::UNAUTHORIZED, "Invalid or expired session").await;
}

#[tokio::test]
async fn logout_without_session_is_401() {
    let test = common::build_test_app().await;
    let response = post_json(test.app(), "/api/logout", json!({}), None).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "Authentication required").await;
}

#[tokio::test]
async fn login_and_logout_are_audited() {
    let test = common::build_test_app().await;
    create_user(&test.pool, "alice", Role::Viewer).await;
    let cookie = login(test.app(), "alice", PASSWORD).await;
    post_json(test.app(), "/api/logout", json!({}), Some(&cookie)).await;

    let query = AuditQuery {
        entity: Some("sessions".into()),
        ..AuditQuery::default()
    };
    let logs = AuditLogRepo::list(&test.pool, &query).await.unwrap();
    let actions: Vec<&str> = logs.iter().map(|l| l.action.as_str()).collect();
    assert_eq!(actions, vec!["logout", "login"]);
    assert_eq!(logs[1].details.as_deref(), Some("alice login"));
}

#[tokio::test]
async fn deleting_a_user_invalidates_their_session() {
    let test = common::build_test_app().await;
    let user = create_user(&test.pool, "alice", Role::Viewer).await;
    let cookie = login(test.app(), "alice", PASSWORD).await;

    UserRepo::delete(&test.pool, &user.id).await.unwrap();

    let me = body_json(get(test.app(), "/api/me", Some(&cookie)).await).await;
    assert_eq!(me["user"], serde_json::Value::Null);
}

#[tokio::test]
async fn login_is_rate_limited_per_client() {
    let test = common::build_test_app_with(|c| c.login_rate_limit_max = 2).await;
    create_user(&test.pool, "alice", Role::Viewer).await;
    let attempt = json!({ "username": "alice", "password": "wrong" });

    for _ in 0..2 {
        let response = post_json(test.app(), "/api/login", attempt.clone(), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let limited = post_json(test.app(), "/api/login", attempt.clone(), None).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = limited.headers()[RETRY_AFTER].to_str().unwrap().parse().unwrap();
    assert!(retry_after > 0 && retry_after <= 900);
    assert_eq!(body_json(limited).await["code"], "RATE_LIMITED");

    // Even correct credentials are refused until the window resets.
    let correct = json!({ "username": "alice", "password": PASSWORD });
    let still_limited = post_json(test.app(), "/api/login", correct, None).await;
    assert_eq!(still_limited.status(), StatusCode::TOO_MANY_REQUESTS);
}

async fn login_from(
    app: axum::Router,
    forwarded_for: Option<&str>,
    peer: Option<SocketAddr>,
) -> axum::response::Response {
    let mut request = Request::post("/api/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "alice", "password": "wrong" }).to_string(),
        ))
        .unwrap();
    if let Some(value) = forwarded_for {
        request
            .headers_mut()
            .insert("x-forwarded-for", value.parse().unwrap());
    }
    if let Some(addr) = peer {
        request.extensions_mut().insert(ConnectInfo(addr));
    }
    app.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn rotating_forwarded_for_does_not_escape_the_limit() {
    let test = common::build_test_app_with(|c| c.login_rate_limit_max = 2).await;
    create_user(&test.pool, "alice", Role::Viewer).await;

    let mut statuses = Vec::new();
    for i in 0..5 {
        let forwarded = format!("10.0.0.{i}, 198.51.100.1");
        statuses.push(login_from(test.app(), Some(&forwarded), None).await.status());
    }
    assert_eq!(
        statuses,
        vec![
            StatusCode::UNAUTHORIZED,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );
}

#[tokio::test]
async fn without_a_trusted_proxy_peers_are_limited_separately() {
    let test = common::build_test_app_with(|c| {
        c.login_rate_limit_max = 1;
        c.trust_proxy = false;
    })
    .await;
    create_user(&test.pool, "alice", Role::Viewer).await;
    let first: SocketAddr = "192.0.2.1:40000".parse().unwrap();
    let second: SocketAddr = "192.0.2.2:40000".parse().unwrap();

    let response = login_from(test.app(), Some("203.0.113.9"), Some(first)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // A forged header does not buy the same peer a fresh budget.
    let response = login_from(test.app(), Some("203.0.113.10"), Some(first)).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = login_from(test.app(), None, Some(second)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
