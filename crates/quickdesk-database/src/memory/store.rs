//! Shared tables behind [`MemoryStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;

use quickdesk_core::types::{
    AnswerId, CategoryId, CommentId, QuestionId, TicketId, UpgradeRequestId, UserId,
};
use quickdesk_entity::category::Category;
use quickdesk_entity::question::{Answer, Question, Vote};
use quickdesk_entity::ticket::{Ticket, TicketComment};
use quickdesk_entity::upgrade::RoleUpgradeRequest;
use quickdesk_entity::user::User;

/// Process-local store. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub(super) tables: Arc<Tables>,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub users: DashMap<UserId, User>,
    /// Lowercased email -> owner. Doubles as the unique index.
    pub emails: DashMap<String, UserId>,
    pub categories: DashMap<CategoryId, Category>,
    pub tickets: DashMap<TicketId, Ticket>,
    pub comments: DashMap<CommentId, TicketComment>,
    pub questions: DashMap<QuestionId, Question>,
    pub answers: DashMap<AnswerId, Answer>,
    pub votes: DashMap<(QuestionId, UserId), Vote>,
    pub upgrades: DashMap<UpgradeRequestId, RoleUpgradeRequest>,
    /// Serializes multi-row mutations (bulk ops, pending-request checks).
    pub write_lock: Mutex<()>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Snapshot all values of a table.
pub(super) fn values<K, V>(map: &DashMap<K, V>) -> Vec<V>
where
    K: Eq + std::hash::Hash,
    V: Clone,
{
    map.iter().map(|entry| entry.value().clone()).collect()
}

/// Sort newest first by the given timestamp.
pub(super) fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}
