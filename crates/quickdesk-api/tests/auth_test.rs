//! Integration tests for registration, login and role upgrades.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};
use quickdesk_entity::user::UserRole;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(response.body["message"], "Missing Authorization header");

    let response = app.request("GET", "/auth/me", None, Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_me() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({ "name": "Ann", "email": "Ann@Example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["email"], "ann@example.com");
    assert_eq!(response.body["user"]["role"], "user");
    assert!(response.body["user"].get("passwordHash").is_none());

    let duplicate = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({ "name": "Ann", "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let login = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().unwrap().to_string();

    let me = app.get("/auth/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["name"], "Ann");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.create_user("Ann", UserRole::User).await;
    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "ann@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Missing required fields");
}

#[tokio::test]
async fn test_upgrade_request_flow() {
    let app = TestApp::new();
    let admin = app.create_user("Root", UserRole::Admin).await;
    let user = app.create_user("Ann", UserRole::User).await;

    let filed = app
        .request("POST", "/auth/request-upgrade", None, Some(&user.token))
        .await;
    assert_eq!(filed.status, StatusCode::CREATED);
    assert_eq!(filed.body["request"]["status"], "pending");

    let again = app
        .request("POST", "/auth/request-upgrade", None, Some(&user.token))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let forbidden = app.get("/auth/upgrade-requests", &user.token).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let pending = app.get("/auth/upgrade-requests", &admin.token).await;
    assert_eq!(pending.status, StatusCode::OK);
    let id = pending.body[0]["id"].as_str().unwrap().to_string();

    let approved = app
        .send(
            "PUT",
            &format!("/auth/approve-upgrade/{id}"),
            json!({ "approved": true }),
            &admin.token,
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["request"]["status"], "approved");

    // The old token now resolves to the promoted account.
    let me = app.get("/auth/me", &user.token).await;
    assert_eq!(me.body["user"]["role"], "agent");

    let twice = app
        .send(
            "PUT",
            &format!("/auth/approve-upgrade/{id}"),
            json!({ "approved": false }),
            &admin.token,
        )
        .await;
    assert_eq!(twice.status, StatusCode::CONFLICT);
}
