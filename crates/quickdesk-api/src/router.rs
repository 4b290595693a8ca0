//! Route definitions for the QuickDesk HTTP API.
//!
//! Routes are grouped by domain. Each group is a `Router<AppState>`; the
//! state is attached once in [`build_router`].

use axum::Router;
use axum::routing::{delete, get, patch, post, put};

use crate::handlers;
use crate::state::AppState;

/// Builds the router with every route group and the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(ticket_routes())
        .merge(question_routes())
        .merge(dashboard_routes())
        .merge(admin_routes())
        .merge(public_routes())
        .with_state(state)
}

/// Registration, login, profile and role upgrades
fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/profile", put(auth::update_profile))
        .route("/auth/request-upgrade", post(auth::request_upgrade))
        .route("/auth/upgrade-requests", get(auth::upgrade_requests))
        .route("/auth/approve-upgrade/{id}", put(auth::approve_upgrade))
}

/// Ticket CRUD, claim/assign and comments
fn ticket_routes() -> Router<AppState> {
    use handlers::tickets;

    Router::new()
        .route(
            "/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/tickets/agents", get(tickets::list_agents))
        .route(
            "/tickets/{id}",
            get(tickets::get_ticket)
                .patch(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route("/tickets/{id}/assign", patch(tickets::assign_ticket))
        .route("/tickets/{id}/claim", post(tickets::claim_ticket))
        .route(
            "/tickets/{id}/comments",
            get(tickets::list_comments).post(tickets::add_comment),
        )
}

/// Questions, votes and answers
fn question_routes() -> Router<AppState> {
    use handlers::questions;

    Router::new()
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/questions/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        .route("/questions/{id}/vote", post(questions::vote))
        .route("/questions/{id}/answer", post(questions::add_answer))
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::dashboard;

    Router::new()
        .route("/dashboard/agent/overview", get(dashboard::agent_overview))
        .route("/dashboard/user/stats", get(dashboard::user_stats))
        .route("/dashboard/tickets", get(dashboard::tickets))
}

/// Admin controller: users, categories, content and system
fn admin_routes() -> Router<AppState> {
    use handlers::admin::{categories, content, system, users};

    Router::new()
        // Categories
        .route(
            "/admin/categories",
            get(categories::list_categories).post(categories::add_category),
        )
        .route(
            "/admin/categories/{id}",
            put(categories::edit_category).delete(categories::delete_category),
        )
        // Users
        .route("/admin/users", get(users::list_users).post(users::create_user))
        .route("/admin/users/bulk", delete(users::bulk_delete))
        .route("/admin/users/bulk/roles", put(users::bulk_change_roles))
        .route(
            "/admin/users/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/admin/users/{id}/role", put(users::change_role))
        .route("/admin/users/{id}/reset-password", put(users::reset_password))
        // Content
        .route("/admin/tickets", get(content::list_tickets))
        .route("/admin/tickets/{id}", delete(content::delete_ticket))
        .route("/admin/questions", get(content::list_questions))
        .route("/admin/questions/{id}", delete(content::delete_question))
        // System
        .route("/admin/dashboard/stats", get(system::dashboard_stats))
        .route("/admin/database/stats", get(system::database_stats))
        .route("/admin/database/{collection}", delete(system::clear_collection))
        .route("/admin/system/health", get(system::system_health))
        .route("/admin/export/{type}", get(system::export_data))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::categories::list_categories))
        .route("/health", get(handlers::health::health))
}
