use httpmock::prelude::*;
use serde_json::json;

use quickdesk_client::views::{AgentPanel, UsersView};
use quickdesk_client::{ApiClient, FALLBACK_MESSAGE};
use quickdesk_core::types::{TicketId, UserId};
use quickdesk_entity::user::UserRole;

fn user_json(id: UserId, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Ann",
        "email": "ann@example.com",
        "role": role,
        "language": "en",
        "categoryInInterest": [],
        "createdAt": "2024-03-09T10:00:00Z",
        "updatedAt": "2024-03-09T10:00:00Z"
    })
}

fn ticket_json(id: TicketId, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "details",
        "category": null,
        "priority": "medium",
        "status": "open",
        "tags": [],
        "createdBy": null,
        "assignedTo": null,
        "resolvedAt": null,
        "createdAt": "2024-03-09T10:00:00Z",
        "updatedAt": "2024-03-09T10:00:00Z"
    })
}

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    let server = MockServer::start_async().await;
    let id = UserId::new();
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({ "email": "ann@example.com", "password": "password123" }));
            then.status(200)
                .json_body(json!({ "token": "tok-1", "user": user_json(id, "user") }));
        })
        .await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/me")
                .header("authorization", "Bearer tok-1");
            then.status(200).json_body(json!({ "user": user_json(id, "user") }));
        })
        .await;

    let client = ApiClient::new(server.base_url());
    let session = client.login("ann@example.com", "password123").await.unwrap();
    assert_eq!(session.user.id, id);
    assert!(client.is_authenticated());

    let user = client.me().await.unwrap();
    assert_eq!(user.role, UserRole::User);
    login.assert_async().await;
    me.assert_async().await;

    client.logout();
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_error_message_comes_from_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register");
            then.status(409)
                .json_body(json!({ "error": "CONFLICT", "message": "Email already exists" }));
        })
        .await;

    let client = ApiClient::new(server.base_url());
    let err = client
        .register("Ann", "ann@example.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.status, 409);
    assert_eq!(err.message, "Email already exists");
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_error_without_message_uses_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tickets");
            then.status(502).body("bad gateway");
        })
        .await;

    let err = ApiClient::new(server.base_url()).tickets().await.unwrap_err();
    assert_eq!(err.status, 502);
    assert_eq!(err.message, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_transport_failure_has_status_zero() {
    let err = ApiClient::new("http://127.0.0.1:1")
        .health()
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_question_query_string() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/questions")
                .query_param("search", "vpn")
                .query_param("page", "2");
            then.status(200).json_body(json!({
                "questions": [],
                "pagination": { "page": 2, "limit": 10, "total": 11, "totalPages": 2 }
            }));
        })
        .await;

    let page = ApiClient::new(server.base_url())
        .questions(&quickdesk_client::types::QuestionListQuery {
            search: Some("vpn".into()),
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total_pages, 2);
    list.assert_async().await;
}

#[tokio::test]
async fn test_agent_panel_refetches_after_claim() {
    let server = MockServer::start_async().await;
    let ticket = TicketId::new();
    let agent = UserId::new();
    let claim = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/tickets/{ticket}/claim"));
            then.status(200)
                .json_body(json!({ "claimed": true, "ticket": ticket_json(ticket, "Printer") }));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/tickets");
            then.status(200)
                .json_body(json!({ "tickets": [ticket_json(ticket, "Printer")] }));
        })
        .await;
    let overview = server
        .mock_async(|when, then| {
            when.method(GET).path("/dashboard/agent/overview");
            then.status(200).json_body(json!({
                "assignedTickets": 1,
                "resolvedToday": 0,
                "pendingTickets": 0,
                "totalResolved": 0
            }));
        })
        .await;

    let mut panel = AgentPanel::new(ApiClient::new(server.base_url()), agent);
    assert!(panel.assign_to_self(ticket).await.unwrap());
    assert_eq!(panel.state().tickets.len(), 1);
    assert_eq!(panel.state().overview.assigned_tickets, 1);
    claim.assert_async().await;
    list.assert_async().await;
    overview.assert_async().await;
}

#[tokio::test]
async fn test_users_view_reverts_failed_role_change() {
    let server = MockServer::start_async().await;
    let id = UserId::new();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/users");
            then.status(200)
                .json_body(json!({ "users": [user_json(id, "user")] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path(format!("/admin/users/{id}/role"));
            then.status(403)
                .json_body(json!({ "error": "FORBIDDEN", "message": "Access denied" }));
        })
        .await;

    let mut view = UsersView::new(ApiClient::new(server.base_url()));
    view.load().await.unwrap();
    let err = view.change_role(id, UserRole::Admin).await.unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(view.state().users[0].role, UserRole::User);
    assert_eq!(view.state().error.as_deref(), Some("Access denied"));
}
