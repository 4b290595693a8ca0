//! Shared fixtures for service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use quickdesk_auth::{JwtEncoder, PasswordHasher, PasswordValidator, RbacEnforcer};
use quickdesk_core::config::AuthConfig;
use quickdesk_core::types::CategoryId;
use quickdesk_database::{MemoryStore, Store};
use quickdesk_entity::category::{Category, CreateCategory, DEFAULT_CATEGORY_COLOR};
use quickdesk_entity::question::{Answer, CreateAnswer, CreateQuestion, Question};
use quickdesk_entity::ticket::{CreateTicket, Ticket, TicketPriority};
use quickdesk_entity::user::{CreateUser, User, UserRole};

use crate::{
    AccountService, AdminService, DashboardService, QuestionService, RequestContext,
    TicketService,
};

pub(crate) struct Fixture {
    pub store: Store,
    pub auth: AuthConfig,
    seq: AtomicU32,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Store::memory(MemoryStore::new()),
            auth: AuthConfig {
                jwt_secret: "test-secret".into(),
                ..AuthConfig::default()
            },
            seq: AtomicU32::new(0),
        }
    }

    pub fn ctx(user: &User) -> RequestContext {
        RequestContext::for_user(user)
    }

    pub async fn user(&self, name: &str, role: UserRole) -> User {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        self.store
            .users
            .create(&CreateUser {
                name: name.into(),
                email: format!("{}{n}@example.com", name.to_lowercase()),
                password_hash: "not-a-hash".into(),
                role,
                language: "en".into(),
                categories_of_interest: vec![],
            })
            .await
            .unwrap()
    }

    pub async fn category(&self, name: &str) -> Category {
        self.store
            .categories
            .create(&CreateCategory {
                name: name.into(),
                description: None,
                color: DEFAULT_CATEGORY_COLOR.into(),
                created_by: None,
            })
            .await
            .unwrap()
    }

    pub async fn ticket(&self, owner: &User, category: Option<CategoryId>) -> Ticket {
        self.store
            .tickets
            .create(&CreateTicket {
                title: "Printer jammed".into(),
                description: "Paper stuck in tray 2".into(),
                category,
                priority: TicketPriority::Medium,
                tags: vec!["hardware".into()],
                created_by: owner.id,
            })
            .await
            .unwrap()
    }

    pub async fn question(&self, owner: &User) -> Question {
        self.store
            .questions
            .create(&CreateQuestion {
                title: "How do I reset MFA?".into(),
                description: "Lost my phone".into(),
                tags: vec!["account".into()],
                category: None,
                created_by: owner.id,
            })
            .await
            .unwrap()
    }

    pub async fn answer(&self, question: &Question, author: &User, content: &str) -> Answer {
        self.store
            .questions
            .add_answer(&CreateAnswer {
                question_id: question.id,
                author: author.id,
                content: content.into(),
            })
            .await
            .unwrap()
    }

    pub fn admin_service(&self) -> AdminService {
        AdminService::new(
            self.store.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&self.auth)),
            Arc::new(RbacEnforcer::new()),
        )
    }

    pub fn ticket_service(&self) -> TicketService {
        TicketService::new(self.store.clone(), Arc::new(RbacEnforcer::new()))
    }

    pub fn question_service(&self) -> QuestionService {
        QuestionService::new(self.store.clone(), Arc::new(RbacEnforcer::new()))
    }

    pub fn account_service(&self) -> AccountService {
        AccountService::new(
            self.store.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&self.auth)),
            Arc::new(JwtEncoder::new(&self.auth)),
            Arc::new(RbacEnforcer::new()),
        )
    }

    pub fn dashboard_service(&self) -> DashboardService {
        DashboardService::new(self.store.clone(), Arc::new(RbacEnforcer::new()))
    }
}
