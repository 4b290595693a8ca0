//! Read-side join: attach user and category summaries to stored rows.
//!
//! Every loader collects the referenced ids of a whole batch, fetches each
//! referenced collection once, and resolves references by map lookup.
//! A reference whose target was deleted resolves to `None`.

use std::collections::{BTreeSet, HashMap};

use quickdesk_core::error::AppError;
use quickdesk_core::result::AppResult;
use quickdesk_core::types::{CategoryId, QuestionId, UserId};
use quickdesk_database::Store;
use quickdesk_entity::category::CategorySummary;
use quickdesk_entity::question::{Answer, Question, Vote, VoteTally};
use quickdesk_entity::ticket::{Ticket, TicketComment};
use quickdesk_entity::upgrade::RoleUpgradeRequest;
use quickdesk_entity::user::UserSummary;
use quickdesk_entity::view::{
    AnswerView, CommentView, QuestionView, TicketView, UpgradeRequestView,
};

/// Summaries of every user and category referenced by one batch.
#[derive(Debug, Default)]
pub struct Directory {
    users: HashMap<UserId, UserSummary>,
    categories: HashMap<CategoryId, CategorySummary>,
}

impl Directory {
    /// Batch-load the given user and category ids.
    pub async fn load(
        store: &Store,
        users: impl IntoIterator<Item = UserId>,
        categories: impl IntoIterator<Item = CategoryId>,
    ) -> AppResult<Self> {
        let user_ids: Vec<UserId> = users.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let category_ids: Vec<CategoryId> = categories
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let users = if user_ids.is_empty() {
            HashMap::new()
        } else {
            store
                .users
                .find_by_ids(&user_ids)
                .await?
                .iter()
                .map(|u| (u.id, u.summary()))
                .collect()
        };

        let categories = if category_ids.is_empty() {
            HashMap::new()
        } else {
            store
                .categories
                .find_by_ids(&category_ids)
                .await?
                .iter()
                .map(|c| (c.id, CategorySummary::from(c)))
                .collect()
        };

        Ok(Self { users, categories })
    }

    /// Summary of `id`, if that user still exists.
    pub fn user(&self, id: UserId) -> Option<UserSummary> {
        self.users.get(&id).cloned()
    }

    /// Summary of `id`, if set and the category still exists.
    pub fn category(&self, id: Option<CategoryId>) -> Option<CategorySummary> {
        id.and_then(|id| self.categories.get(&id).cloned())
    }
}

/// Attach creator, assignee and category to each ticket.
pub async fn ticket_views(store: &Store, tickets: Vec<Ticket>) -> AppResult<Vec<TicketView>> {
    let users = tickets
        .iter()
        .flat_map(|t| std::iter::once(t.created_by).chain(t.assigned_to));
    let categories = tickets.iter().filter_map(|t| t.category);
    let dir = Directory::load(store, users, categories).await?;

    Ok(tickets.into_iter().map(|t| ticket_view(&dir, t)).collect())
}

/// Attach references to a single ticket.
pub async fn ticket_view_one(store: &Store, ticket: Ticket) -> AppResult<TicketView> {
    ticket_views(store, vec![ticket])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("Ticket join produced no view"))
}

fn ticket_view(dir: &Directory, t: Ticket) -> TicketView {
    TicketView {
        id: t.id,
        category: dir.category(t.category),
        created_by: dir.user(t.created_by),
        assigned_to: t.assigned_to.and_then(|id| dir.user(id)),
        title: t.title,
        description: t.description,
        priority: t.priority,
        status: t.status,
        tags: t.tags,
        resolved_at: t.resolved_at,
        created_at: t.created_at,
        updated_at: t.updated_at,
    }
}

/// Attach authors to ticket comments.
pub async fn comment_views(
    store: &Store,
    comments: Vec<TicketComment>,
) -> AppResult<Vec<CommentView>> {
    let dir = Directory::load(store, comments.iter().map(|c| c.author), std::iter::empty()).await?;

    Ok(comments
        .into_iter()
        .map(|c| CommentView {
            id: c.id,
            ticket_id: c.ticket_id,
            author: dir.user(c.author),
            content: c.content,
            is_internal: c.is_internal,
            created_at: c.created_at,
        })
        .collect())
}

/// Attach author, category, vote tally and answers to each question.
pub async fn question_views(
    store: &Store,
    questions: Vec<Question>,
) -> AppResult<Vec<QuestionView>> {
    if questions.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<QuestionId> = questions.iter().map(|q| q.id).collect();
    let votes = store.questions.votes_for(&ids).await?;
    let answers = store.questions.answers_for(&ids).await?;

    let mut votes_by_question: HashMap<QuestionId, Vec<Vote>> = HashMap::new();
    for vote in votes {
        votes_by_question.entry(vote.question_id).or_default().push(vote);
    }
    let mut answers_by_question: HashMap<QuestionId, Vec<Answer>> = HashMap::new();
    for answer in answers {
        answers_by_question
            .entry(answer.question_id)
            .or_default()
            .push(answer);
    }

    let users = questions
        .iter()
        .map(|q| q.created_by)
        .chain(answers_by_question.values().flatten().map(|a| a.author))
        .collect::<Vec<_>>();
    let categories = questions.iter().filter_map(|q| q.category);
    let dir = Directory::load(store, users, categories).await?;

    Ok(questions
        .into_iter()
        .map(|q| {
            let tally = votes_by_question
                .get(&q.id)
                .map(|v| VoteTally::from_votes(v))
                .unwrap_or_default();
            let answers = answers_by_question
                .remove(&q.id)
                .unwrap_or_default()
                .into_iter()
                .map(|a| AnswerView {
                    id: a.id,
                    author: dir.user(a.author),
                    content: a.content,
                    created_at: a.created_at,
                })
                .collect();
            QuestionView {
                id: q.id,
                category: dir.category(q.category),
                created_by: dir.user(q.created_by),
                votes: tally,
                score: tally.score(),
                answers,
                title: q.title,
                description: q.description,
                tags: q.tags,
                created_at: q.created_at,
                updated_at: q.updated_at,
            }
        })
        .collect())
}

/// Attach references to a single question.
pub async fn question_view_one(store: &Store, question: Question) -> AppResult<QuestionView> {
    question_views(store, vec![question])
        .await?
        .pop()
        .ok_or_else(|| AppError::internal("Question join produced no view"))
}

/// Attach requester and resolver to upgrade requests.
pub async fn upgrade_views(
    store: &Store,
    requests: Vec<RoleUpgradeRequest>,
) -> AppResult<Vec<UpgradeRequestView>> {
    let users = requests
        .iter()
        .flat_map(|r| std::iter::once(r.requester).chain(r.resolved_by));
    let dir = Directory::load(store, users, std::iter::empty()).await?;

    Ok(requests
        .into_iter()
        .map(|r| UpgradeRequestView {
            id: r.id,
            requester: dir.user(r.requester),
            status: r.status,
            created_at: r.created_at,
            resolved_at: r.resolved_at,
            resolved_by: r.resolved_by.and_then(|id| dir.user(id)),
        })
        .collect())
}
