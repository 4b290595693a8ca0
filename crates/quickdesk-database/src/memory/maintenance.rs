use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;

use quickdesk_core::result::AppResult;

use super::store::MemoryStore;
use crate::collection::{Collection, CollectionStats, DatabaseHealth};
use crate::repositories::MaintenanceRepository;

/// Serialized size of a table's rows, as a stand-in for on-disk size.
fn json_size<K, V>(map: &DashMap<K, V>) -> u64
where
    K: Eq + std::hash::Hash,
    V: Serialize,
{
    map.iter()
        .map(|entry| serde_json::to_vec(entry.value()).map_or(0, |b| b.len() as u64))
        .sum()
}

impl MemoryStore {
    fn stats_for(&self, collection: Collection) -> CollectionStats {
        let t = &self.tables;
        let (count, size, indexes) = match collection {
            Collection::Users => (t.users.len(), json_size(&t.users), 2),
            Collection::Categories => (t.categories.len(), json_size(&t.categories), 1),
            Collection::Tickets => (t.tickets.len(), json_size(&t.tickets), 1),
            Collection::TicketComments => (t.comments.len(), json_size(&t.comments), 1),
            Collection::Questions => (t.questions.len(), json_size(&t.questions), 1),
            Collection::Answers => (t.answers.len(), json_size(&t.answers), 1),
            Collection::QuestionVotes => (t.votes.len(), json_size(&t.votes), 1),
            Collection::RoleUpgradeRequests => (t.upgrades.len(), json_size(&t.upgrades), 1),
        };
        CollectionStats::new(collection, count as u64, size, size, indexes)
    }
}

#[async_trait]
impl MaintenanceRepository for MemoryStore {
    async fn collection_stats(&self) -> AppResult<Vec<CollectionStats>> {
        Ok(Collection::ALL.iter().map(|c| self.stats_for(*c)).collect())
    }

    async fn clear(&self, collection: Collection) -> AppResult<u64> {
        let _guard = self.tables.write_lock.lock();
        let t = &self.tables;
        let removed = match collection {
            // Not clearable by name (`Collection::clearable_from_name`);
            // only direct repository callers reach these two arms.
            Collection::Users => {
                let n = t.users.len();
                t.users.clear();
                t.emails.clear();
                n
            }
            Collection::Categories => {
                let n = t.categories.len();
                t.categories.clear();
                n
            }
            Collection::Tickets => {
                let n = t.tickets.len();
                t.tickets.clear();
                t.comments.clear();
                n
            }
            Collection::TicketComments => {
                let n = t.comments.len();
                t.comments.clear();
                n
            }
            Collection::Questions => {
                let n = t.questions.len();
                t.questions.clear();
                t.answers.clear();
                t.votes.clear();
                n
            }
            Collection::Answers => {
                let n = t.answers.len();
                t.answers.clear();
                n
            }
            Collection::QuestionVotes => {
                let n = t.votes.len();
                t.votes.clear();
                n
            }
            Collection::RoleUpgradeRequests => {
                let n = t.upgrades.len();
                t.upgrades.clear();
                n
            }
        };
        Ok(removed as u64)
    }

    async fn health(&self) -> AppResult<DatabaseHealth> {
        Ok(DatabaseHealth {
            status: "connected".to_string(),
            host: "memory".to_string(),
            name: "quickdesk".to_string(),
        })
    }
}
