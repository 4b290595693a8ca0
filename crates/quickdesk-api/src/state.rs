//! Shared application state passed to all Axum handlers.

use std::sync::Arc;

use quickdesk_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, RbacEnforcer};
use quickdesk_core::config::AppConfig;
use quickdesk_database::Store;
use quickdesk_service::{
    AccountService, AdminService, DashboardService, QuestionService, TicketService,
};

/// Application state shared across all handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Repository bundle, used directly by the auth extractor.
    pub store: Store,

    // -- Auth --
    /// JWT decoder for validating bearer tokens.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// RBAC enforcer.
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // -- Services --
    /// Admin controller.
    pub admin_service: Arc<AdminService>,
    /// Ticket lifecycle.
    pub ticket_service: Arc<TicketService>,
    /// Questions, votes and answers.
    pub question_service: Arc<QuestionService>,
    /// Registration, login, profile and upgrade requests.
    pub account_service: Arc<AccountService>,
    /// Agent and user dashboards.
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Wires every service over one store.
    pub fn new(config: AppConfig, store: Store) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let rbac = Arc::new(RbacEnforcer::new());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let admin_service = Arc::new(AdminService::new(
            store.clone(),
            Arc::clone(&hasher),
            Arc::clone(&validator),
            Arc::clone(&rbac),
        ));
        let ticket_service = Arc::new(TicketService::new(store.clone(), Arc::clone(&rbac)));
        let question_service = Arc::new(QuestionService::new(store.clone(), Arc::clone(&rbac)));
        let account_service = Arc::new(AccountService::new(
            store.clone(),
            hasher,
            validator,
            encoder,
            Arc::clone(&rbac),
        ));
        let dashboard_service = Arc::new(DashboardService::new(store.clone(), Arc::clone(&rbac)));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder: decoder,
            rbac_enforcer: rbac,
            admin_service,
            ticket_service,
            question_service,
            account_service,
            dashboard_service,
        }
    }
}
