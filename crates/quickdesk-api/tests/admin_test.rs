//! Integration tests for the admin routes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;
use quickdesk_entity::user::UserRole;

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new();
    let agent = app.create_user("Agent", UserRole::Agent).await;

    for uri in ["/admin/users", "/admin/dashboard/stats", "/admin/database/stats"] {
        let response = app.get(uri, &agent.token).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{uri}");
    }

    let anonymous = app.request("GET", "/admin/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_user_validation_and_conflict() {
    let app = TestApp::new();
    let admin = app.create_user("Root", UserRole::Admin).await;

    let missing = app
        .send("POST", "/admin/users", json!({ "name": "Ann", "email": "ann@example.com" }), &admin.token)
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "Missing required fields");

    let created = app
        .send(
            "POST",
            "/admin/users",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "secret123",
                "role": "agent",
            }),
            &admin.token,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["user"]["role"], "agent");
    assert!(created.body["user"].get("passwordHash").is_none());

    let duplicate = app
        .send(
            "POST",
            "/admin/users",
            json!({ "name": "Ann", "email": "ann@example.com", "password": "secret123" }),
            &admin.token,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["message"], "Email already exists");

    let listed = app.get("/admin/users", &admin.token).await;
    assert_eq!(listed.body["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_user_role_password_and_delete() {
    let app = TestApp::new();
    let admin = app.create_user("Root", UserRole::Admin).await;
    let user = app.create_user("Ann", UserRole::User).await;
    let base = format!("/admin/users/{}", user.id());

    let role = app
        .send("PUT", &format!("{base}/role"), json!({ "role": "agent" }), &admin.token)
        .await;
    assert_eq!(role.status, StatusCode::OK);
    assert_eq!(role.body["user"]["role"], "agent");

    let no_password = app
        .send("PUT", &format!("{base}/reset-password"), json!({}), &admin.token)
        .await;
    assert_eq!(no_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_password.body["message"], "New password required");

    let reset = app
        .send(
            "PUT",
            &format!("{base}/reset-password"),
            json!({ "newPassword": "brand-new-pass" }),
            &admin.token,
        )
        .await;
    assert_eq!(reset.body["message"], "Password reset successfully");

    let login = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "ann@example.com", "password": "brand-new-pass" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);

    let deleted = app.request("DELETE", &base, None, Some(&admin.token)).await;
    assert_eq!(deleted.body["message"], "Deleted");

    let again = app.request("DELETE", &base, None, Some(&admin.token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_operations() {
    let app = TestApp::new();
    let admin = app.create_user("Root", UserRole::Admin).await;
    let a = app.create_user("Ann", UserRole::User).await;
    let b = app.create_user("Bob", UserRole::User).await;

    let invalid = app
        .send("DELETE", "/admin/users/bulk", json!({ "userIds": [] }), &admin.token)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["message"], "Invalid user IDs array");

    let no_role = app
        .send("PUT", "/admin/users/bulk/roles", json!({ "userIds": [a.id()] }), &admin.token)
        .await;
    assert_eq!(no_role.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_role.body["message"], "Invalid parameters");

    let promoted = app
        .send(
            "PUT",
            "/admin/users/bulk/roles",
            json!({ "userIds": [a.id(), b.id()], "newRole": "agent" }),
            &admin.token,
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["message"], "Updated 2 users to agent role");

    let deleted = app
        .send("DELETE", "/admin/users/bulk", json!({ "userIds": [a.id(), b.id()] }), &admin.token)
        .await;
    assert_eq!(deleted.body["message"], "Deleted 2 users");
}

#[tokio::test]
async fn test_category_crud_and_public_listing() {
    let app = TestApp::new();
    let admin = app.create_user("Root", UserRole::Admin).await;
    let user = app.create_user("Ann", UserRole::User).await;

    let nameless = app
        .send("POST", "/admin/categories", json!({ "description": "x" }), &admin.token)
        .await;
    assert_eq!(nameless.status, StatusCode::BAD_REQUEST);
    assert_eq!(nameless.body["message"], "Category name is required");

    let created = app
        .send("POST", "/admin/categories", json!({ "name": "Hardware" }), &admin.token)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["category"]["color"], "#6366f1");
    let id = created.body["category"]["id"].as_str().unwrap().to_string();

    let edited = app
        .send(
            "PUT",
            &format!("/admin/categories/{id}"),
            json!({ "color": "#ff0000" }),
            &admin.token,
        )
        .await;
    assert_eq!(edited.body["category"]["color"], "#ff0000");
    assert_eq!(edited.body["category"]["name"], "Hardware");

    let public = app.request("GET", "/categories", None, None).await;
    assert_eq!(public.body["categories"].as_array().unwrap().len(), 1);

    let forbidden = app
        .send("POST", "/admin/categories", json!({ "name": "Nope" }), &user.token)
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/admin/categories/{id}"), None, Some(&admin.token))
        .await;
    assert_eq!(deleted.body["message"], "Deleted");
}

#[tokio::test]
async fn test_system_maintenance() {
    let app = TestApp::new();
    let admin = app.create_user("Root", UserRole::Admin).await;
    app.send(
        "POST",
        "/tickets",
        json!({ "title": "Broken", "description": "Screen flickers" }),
        &admin.token,
    )
    .await;

    let stats = app.get("/admin/dashboard/stats", &admin.token).await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["stats"]["totalTickets"], 1);
    assert_eq!(stats.body["stats"]["totalAdmins"], 1);
    assert_eq!(stats.body["recentTickets"].as_array().unwrap().len(), 1);

    let db = app.get("/admin/database/stats", &admin.token).await;
    assert!(db.body["dbStats"].is_array());

    let health = app.get("/admin/system/health", &admin.token).await;
    assert_eq!(health.status, StatusCode::OK);
    assert!(health.body["server"]["memory"]["rss"].as_str().unwrap().ends_with(" MB"));

    let users = app.request("DELETE", "/admin/database/users", None, Some(&admin.token)).await;
    assert_eq!(users.status, StatusCode::BAD_REQUEST);
    assert_eq!(users.body["message"], "Collection not allowed for clearing");

    let cleared = app.request("DELETE", "/admin/database/tickets", None, Some(&admin.token)).await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["message"], "Cleared 1 documents from tickets");

    let export = app.get("/admin/export/users", &admin.token).await;
    assert_eq!(export.status, StatusCode::OK);
    assert_eq!(export.body["data"]["users"].as_array().unwrap().len(), 1);
    assert!(export.body["data"].get("tickets").is_none());
    assert!(export.body["exportedAt"].is_string());

    let unknown = app.get("/admin/export/everything", &admin.token).await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
}
