//! Integration tests for questions, votes and answers.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;
use quickdesk_entity::user::UserRole;

#[tokio::test]
async fn test_question_lifecycle() {
    let app = TestApp::new();
    let author = app.create_user("Ann", UserRole::User).await;
    let voter = app.create_user("Bob", UserRole::User).await;

    let created = app
        .send(
            "POST",
            "/questions",
            json!({
                "title": "How do I reset my VPN token?",
                "description": "The portal link is broken",
                "tags": ["vpn"],
            }),
            &author.token,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["question"]["id"].as_str().unwrap().to_string();

    let first = app
        .send("POST", &format!("/questions/{id}/vote"), json!({ "type": "up" }), &voter.token)
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["outcome"], "recorded");
    assert_eq!(first.body["question"]["score"], 1);

    let repeat = app
        .send("POST", &format!("/questions/{id}/vote"), json!({ "type": "up" }), &voter.token)
        .await;
    assert_eq!(repeat.body["outcome"], "unchanged");
    assert_eq!(repeat.body["question"]["score"], 1);

    let flipped = app
        .send("POST", &format!("/questions/{id}/vote"), json!({ "type": "down" }), &voter.token)
        .await;
    assert_eq!(flipped.body["outcome"], "flipped");
    assert_eq!(flipped.body["question"]["score"], -1);

    let bad_vote = app
        .send("POST", &format!("/questions/{id}/vote"), json!({ "type": "sideways" }), &voter.token)
        .await;
    assert_eq!(bad_vote.status, StatusCode::BAD_REQUEST);

    let answered = app
        .send(
            "POST",
            &format!("/questions/{id}/answer"),
            json!({ "content": "Use the self-service page" }),
            &voter.token,
        )
        .await;
    assert_eq!(answered.status, StatusCode::CREATED);
    assert_eq!(answered.body["question"]["answers"][0]["author"]["name"], "Bob");

    let not_author = app
        .send("PUT", &format!("/questions/{id}"), json!({ "title": "Mine now" }), &voter.token)
        .await;
    assert_eq!(not_author.status, StatusCode::FORBIDDEN);

    let public = app.request("GET", &format!("/questions/{id}"), None, None).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["question"]["answers"].as_array().unwrap().len(), 1);

    let deleted = app
        .request("DELETE", &format!("/questions/{id}"), None, Some(&author.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Deleted");
}

#[tokio::test]
async fn test_question_search_and_paging() {
    let app = TestApp::new();
    let author = app.create_user("Ann", UserRole::User).await;
    for (title, tag) in [("Printer offline", "hardware"), ("Email bounce", "mail"), ("Printer jam", "hardware")] {
        let response = app
            .send(
                "POST",
                "/questions",
                json!({ "title": title, "description": "details", "tags": [tag] }),
                &author.token,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let printers = app
        .request("GET", "/questions?search=PRINTER&limit=1", None, None)
        .await;
    assert_eq!(printers.status, StatusCode::OK);
    assert_eq!(printers.body["questions"].as_array().unwrap().len(), 1);
    assert_eq!(printers.body["pagination"]["total"], 2);
    assert_eq!(printers.body["pagination"]["totalPages"], 2);

    let mail = app
        .request("GET", "/questions?tag=mail&category=all", None, None)
        .await;
    assert_eq!(mail.body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_question_list_with_huge_page_number() {
    let app = TestApp::new();
    let author = app.create_user("Ann", UserRole::User).await;
    app.send(
        "POST",
        "/questions",
        json!({ "title": "Printer offline", "description": "details" }),
        &author.token,
    )
    .await;

    let response = app
        .request("GET", "/questions?page=18446744073709551615&limit=10", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["questions"].as_array().unwrap().is_empty());
    assert_eq!(response.body["pagination"]["total"], 1);
}
