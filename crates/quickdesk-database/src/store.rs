//! Repository bundle selected by configuration.

use std::sync::Arc;

use tracing::info;

use quickdesk_core::config::{DatabaseConfig, StoreProvider};
use quickdesk_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::postgres::{
    PgCategoryRepository, PgCommentRepository, PgMaintenanceRepository, PgQuestionRepository,
    PgTicketRepository, PgUpgradeRequestRepository, PgUserRepository,
};
use crate::repositories::{
    CategoryRepository, CommentRepository, MaintenanceRepository, QuestionRepository,
    TicketRepository, UpgradeRequestRepository, UserRepository,
};

/// One implementation of every repository, shared by all services.
#[derive(Debug, Clone)]
pub struct Store {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Tickets.
    pub tickets: Arc<dyn TicketRepository>,
    /// Ticket comments.
    pub comments: Arc<dyn CommentRepository>,
    /// Questions, votes and answers.
    pub questions: Arc<dyn QuestionRepository>,
    /// Categories.
    pub categories: Arc<dyn CategoryRepository>,
    /// Role upgrade requests.
    pub upgrades: Arc<dyn UpgradeRequestRepository>,
    /// Collection-wide maintenance.
    pub maintenance: Arc<dyn MaintenanceRepository>,
}

impl Store {
    /// Build the store configured by `config.provider`.
    ///
    /// The PostgreSQL provider connects the pool and applies pending
    /// migrations before returning.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL store");
                let db = DatabasePool::connect(config).await?;
                run_migrations(db.pool()).await?;
                Ok(Self::postgres(db))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory store");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Bundle the PostgreSQL repositories over one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tickets: Arc::new(PgTicketRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            questions: Arc::new(PgQuestionRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            upgrades: Arc::new(PgUpgradeRequestRepository::new(pool)),
            maintenance: Arc::new(PgMaintenanceRepository::new(db)),
        }
    }

    /// Bundle an in-memory store; every field shares the same tables.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            tickets: Arc::new(store.clone()),
            comments: Arc::new(store.clone()),
            questions: Arc::new(store.clone()),
            categories: Arc::new(store.clone()),
            upgrades: Arc::new(store.clone()),
            maintenance: Arc::new(store),
        }
    }
}
