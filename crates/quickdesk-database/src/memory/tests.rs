use std::collections::HashSet;

use quickdesk_core::types::UserId;
use quickdesk_entity::question::{CreateAnswer, CreateQuestion, VoteOutcome, VoteTally, VoteType};
use quickdesk_entity::ticket::{CreateComment, CreateTicket, TicketPriority, TicketStatus};
use quickdesk_entity::user::{CreateUser, UpdateUser, UserRole};

use crate::collection::Collection;
use crate::memory::MemoryStore;
use crate::store::Store;

fn store() -> Store {
    Store::memory(MemoryStore::new())
}

fn new_user(name: &str, email: &str, role: UserRole) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role,
        language: "en".to_string(),
        categories_of_interest: vec![],
    }
}

fn new_ticket(created_by: UserId) -> CreateTicket {
    CreateTicket {
        title: "VPN drops".to_string(),
        description: "Every hour".to_string(),
        category: None,
        priority: TicketPriority::Medium,
        tags: vec!["network".to_string()],
        created_by,
    }
}

#[tokio::test]
async fn test_email_unique_case_insensitive() {
    let store = store();
    store
        .users
        .create(&new_user("Ann", "Ann@Example.com", UserRole::User))
        .await
        .unwrap();
    let err = store
        .users
        .create(&new_user("Other", "ann@example.COM", UserRole::User))
        .await
        .unwrap_err();
    assert_eq!(err.kind, quickdesk_core::error::ErrorKind::Conflict);
    assert_eq!(store.users.count().await.unwrap(), 1);
    assert!(store.users.find_by_email("ANN@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_update_email_to_taken_conflicts_and_frees_old() {
    let store = store();
    let a = store.users.create(&new_user("A", "a@x.io", UserRole::User)).await.unwrap();
    store.users.create(&new_user("B", "b@x.io", UserRole::User)).await.unwrap();

    let taken = UpdateUser {
        email: Some("B@x.io".into()),
        ..Default::default()
    };
    assert!(store.users.update(a.id, &taken).await.is_err());

    let moved = UpdateUser {
        email: Some("c@x.io".into()),
        ..Default::default()
    };
    let updated = store.users.update(a.id, &moved).await.unwrap().unwrap();
    assert_eq!(updated.email, "c@x.io");
    assert!(store.users.find_by_email("a@x.io").await.unwrap().is_none());
    store.users.create(&new_user("A2", "a@x.io", UserRole::User)).await.unwrap();
}

#[tokio::test]
async fn test_bulk_role_change_counts_modified_only() {
    let store = store();
    let a = store.users.create(&new_user("A", "a@x.io", UserRole::User)).await.unwrap();
    let b = store.users.create(&new_user("B", "b@x.io", UserRole::Agent)).await.unwrap();
    let modified = store
        .users
        .set_role_many(&[a.id, b.id, UserId::new()], UserRole::Agent)
        .await
        .unwrap();
    assert_eq!(modified, 1);
    assert_eq!(store.users.count_by_role(UserRole::Agent).await.unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_have_one_winner() {
    let store = store();
    let ticket = store.tickets.create(&new_ticket(UserId::new())).await.unwrap();

    let agents: Vec<UserId> = (0..8).map(|_| UserId::new()).collect();
    let handles: Vec<_> = agents
        .iter()
        .map(|agent| {
            let tickets = store.tickets.clone();
            let agent = *agent;
            tokio::spawn(async move { tickets.claim(ticket.id, agent).await.unwrap() })
        })
        .collect();
    let results = futures::future::join_all(handles).await;
    let winners = results.into_iter().filter(|r| *r.as_ref().unwrap()).count();
    assert_eq!(winners, 1);

    let stored = store.tickets.find_by_id(ticket.id).await.unwrap().unwrap();
    assert!(agents.contains(&stored.assigned_to.unwrap()));
    assert_eq!(stored.status, TicketStatus::Open);
}

#[tokio::test]
async fn test_closed_ticket_rejects_status_change() {
    let store = store();
    let ticket = store.tickets.create(&new_ticket(UserId::new())).await.unwrap();
    let closed = store
        .tickets
        .set_status(ticket.id, TicketStatus::Closed)
        .await
        .unwrap()
        .unwrap();
    assert!(closed.resolved_at.is_some());
    assert!(store
        .tickets
        .set_status(ticket.id, TicketStatus::Open)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_ticket_delete_removes_comments() {
    let store = store();
    let author = UserId::new();
    let ticket = store.tickets.create(&new_ticket(author)).await.unwrap();
    store
        .comments
        .create(&CreateComment {
            ticket_id: ticket.id,
            author,
            content: "any update?".into(),
            is_internal: false,
        })
        .await
        .unwrap();
    assert!(store.tickets.delete(ticket.id).await.unwrap());
    assert!(store.comments.find_by_ticket(ticket.id).await.unwrap().is_empty());
    assert!(!store.tickets.delete(ticket.id).await.unwrap());
}

#[tokio::test]
async fn test_votes_deduplicated_per_actor() {
    let store = store();
    let question = store
        .questions
        .create(&CreateQuestion {
            title: "Rust?".into(),
            description: "Why".into(),
            tags: vec![],
            category: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();
    let voter = UserId::new();

    let q = store.questions.as_ref();
    assert_eq!(q.cast_vote(question.id, voter, VoteType::Up).await.unwrap(), VoteOutcome::Recorded);
    assert_eq!(q.cast_vote(question.id, voter, VoteType::Up).await.unwrap(), VoteOutcome::Unchanged);
    let votes = q.votes_for(&[question.id]).await.unwrap();
    assert_eq!(VoteTally::from_votes(&votes).score(), 1);

    assert_eq!(q.cast_vote(question.id, voter, VoteType::Down).await.unwrap(), VoteOutcome::Flipped);
    let votes = q.votes_for(&[question.id]).await.unwrap();
    assert_eq!(VoteTally::from_votes(&votes).score(), -1);
}

#[tokio::test]
async fn test_clear_allow_listed_collection() {
    let store = store();
    let creator = UserId::new();
    store.tickets.create(&new_ticket(creator)).await.unwrap();
    store.tickets.create(&new_ticket(creator)).await.unwrap();
    store.users.create(&new_user("A", "a@x.io", UserRole::User)).await.unwrap();

    let removed = store.maintenance.clear(Collection::Tickets).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store.tickets.count().await.unwrap(), 0);
    assert_eq!(store.users.count().await.unwrap(), 1);

    let stats = store.maintenance.collection_stats().await.unwrap();
    let names: HashSet<_> = stats.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains("users"));
    assert_eq!(stats.len(), Collection::ALL.len());
}

#[tokio::test]
async fn test_clear_users_releases_emails() {
    let store = store();
    store.users.create(&new_user("A", "a@x.io", UserRole::User)).await.unwrap();

    let removed = store.maintenance.clear(Collection::Users).await.unwrap();
    assert_eq!(removed, 1);
    assert!(store.users.find_by_email("a@x.io").await.unwrap().is_none());
    store.users.create(&new_user("A2", "a@x.io", UserRole::User)).await.unwrap();
    assert_eq!(store.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_one_pending_upgrade_request() {
    let store = store();
    let user = UserId::new();
    let request = store.upgrades.create(user).await.unwrap();
    assert!(store.upgrades.create(user).await.is_err());

    let admin = UserId::new();
    let resolved = store
        .upgrades
        .resolve(request.id, quickdesk_entity::upgrade::UpgradeStatus::Rejected, admin)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.resolved_by, Some(admin));
    assert!(store
        .upgrades
        .resolve(request.id, quickdesk_entity::upgrade::UpgradeStatus::Approved, admin)
        .await
        .unwrap()
        .is_none());

    // A resolved request no longer blocks a new one.
    store.upgrades.create(user).await.unwrap();
}

#[tokio::test]
async fn test_answers_ordered_and_deleted_with_question() {
    let store = store();
    let question = store
        .questions
        .create(&CreateQuestion {
            title: "t".into(),
            description: "d".into(),
            tags: vec![],
            category: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();
    for content in ["first", "second"] {
        store
            .questions
            .add_answer(&CreateAnswer {
                question_id: question.id,
                author: UserId::new(),
                content: content.into(),
            })
            .await
            .unwrap();
    }
    let answers = store.questions.answers_for(&[question.id]).await.unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].content, "first");

    assert!(store.questions.delete(question.id).await.unwrap());
    assert!(store.questions.answers_for(&[question.id]).await.unwrap().is_empty());
}
