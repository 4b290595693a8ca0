//! Ticket workflow: creation, reads, edits, status transitions, claiming,
//! assignment and comments.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use quickdesk_auth::{RbacEnforcer, SystemPermission};
use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, TicketId, UserId};
use quickdesk_database::Store;
use quickdesk_entity::ticket::{
    CreateComment, CreateTicket, Ticket, TicketPriority, TicketStatus, UpdateTicket,
};
use quickdesk_entity::user::{UserRole, UserSummary};
use quickdesk_entity::view::{CommentView, TicketView};

use crate::context::RequestContext;
use crate::join;

/// Request to open a ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTicket {
    /// Short summary.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Optional category.
    pub category: Option<CategoryId>,
    /// Priority, `medium` when absent.
    pub priority: Option<TicketPriority>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// Combined edit: descriptive fields and an optional status change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketChanges {
    /// Descriptive field updates.
    pub fields: UpdateTicket,
    /// Requested status.
    pub status: Option<TicketStatus>,
}

/// A ticket with its visible comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetail {
    pub ticket: TicketView,
    pub comments: Vec<CommentView>,
}

/// Result of a claim attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutcome {
    /// Whether this caller became the assignee.
    pub claimed: bool,
    /// The ticket as it is after the attempt.
    pub ticket: TicketView,
}

/// Orchestrates the ticket lifecycle.
#[derive(Debug, Clone)]
pub struct TicketService {
    /// Repository bundle.
    store: Store,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl TicketService {
    /// Creates a new ticket service.
    pub fn new(store: Store, rbac: Arc<RbacEnforcer>) -> Self {
        Self { store, rbac }
    }

    async fn load(&self, ticket_id: TicketId) -> Result<Ticket, AppError> {
        self.store
            .tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))
    }

    fn can_read(&self, ctx: &RequestContext, ticket: &Ticket) -> bool {
        ticket.created_by == ctx.user_id
            || self
                .rbac
                .has_permission(&ctx.role, &SystemPermission::TicketReadAll)
    }

    fn ensure_can_read(&self, ctx: &RequestContext, ticket: &Ticket) -> Result<(), AppError> {
        if self.can_read(ctx, ticket) {
            Ok(())
        } else {
            Err(AppError::forbidden("You do not have access to this ticket"))
        }
    }

    fn ensure_owner_or_admin(&self, ctx: &RequestContext, ticket: &Ticket) -> Result<(), AppError> {
        if ticket.created_by == ctx.user_id
            || self
                .rbac
                .has_permission(&ctx.role, &SystemPermission::TicketManageAll)
        {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Only the ticket creator or an admin can modify this ticket",
            ))
        }
    }

    fn ensure_can_change_status(
        &self,
        ctx: &RequestContext,
        ticket: &Ticket,
    ) -> Result<(), AppError> {
        let is_admin = self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::TicketManageAll);
        let is_assignee = ticket.is_assigned_to(ctx.user_id)
            && self
                .rbac
                .has_permission(&ctx.role, &SystemPermission::TicketWork);
        if is_admin || is_assignee {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Only the assignee or an admin can change ticket status",
            ))
        }
    }

    fn sees_internal(&self, ctx: &RequestContext) -> bool {
        self.rbac
            .has_permission(&ctx.role, &SystemPermission::CommentInternal)
    }

    /// Opens a ticket on behalf of the caller.
    pub async fn create(&self, ctx: &RequestContext, req: NewTicket) -> Result<TicketView, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::TicketCreate)?;

        let title = req.title.trim();
        let description = req.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(AppError::validation("Title and description are required"));
        }

        let ticket = self
            .store
            .tickets
            .create(&CreateTicket {
                title: title.to_string(),
                description: description.to_string(),
                category: req.category,
                priority: req.priority.unwrap_or_default(),
                tags: normalize_tags(req.tags),
                created_by: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, ticket_id = %ticket.id, "Ticket created");
        join::ticket_view_one(&self.store, ticket).await
    }

    /// Reads a ticket with the comments visible to the caller.
    pub async fn get(&self, ctx: &RequestContext, ticket_id: TicketId) -> Result<TicketDetail, AppError> {
        let ticket = self.load(ticket_id).await?;
        self.ensure_can_read(ctx, &ticket)?;

        let comments = self.visible_comments(ctx, ticket_id).await?;
        Ok(TicketDetail {
            ticket: join::ticket_view_one(&self.store, ticket).await?,
            comments,
        })
    }

    /// Lists the caller's own tickets, or every ticket for staff.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<TicketView>, AppError> {
        let tickets = if self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::TicketReadAll)
        {
            self.store.tickets.find_all().await?
        } else {
            self.store.tickets.find_by_creator(ctx.user_id).await?
        };
        join::ticket_views(&self.store, tickets).await
    }

    /// Applies descriptive edits and, if requested, a status change.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
        changes: TicketChanges,
    ) -> Result<TicketView, AppError> {
        let ticket = self.load(ticket_id).await?;
        if changes.status.is_some() {
            self.ensure_can_change_status(ctx, &ticket)?;
        }

        if !changes.fields.is_empty() {
            self.ensure_owner_or_admin(ctx, &ticket)?;
            if ticket.status.is_terminal() {
                return Err(AppError::conflict("Closed tickets cannot be edited"));
            }
            if changes.fields.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
                return Err(AppError::validation("Title must not be empty"));
            }
            if changes
                .fields
                .description
                .as_deref()
                .is_some_and(|d| d.trim().is_empty())
            {
                return Err(AppError::validation("Description must not be empty"));
            }

            let mut fields = changes.fields;
            fields.tags = fields.tags.map(normalize_tags);
            self.store
                .tickets
                .update(ticket_id, &fields)
                .await?
                .ok_or_else(|| AppError::not_found("Ticket not found"))?;
            debug!(user_id = %ctx.user_id, ticket_id = %ticket_id, "Ticket fields updated");
        }

        match changes.status {
            Some(status) => self.change_status(ctx, ticket_id, status).await,
            None => {
                let ticket = self.load(ticket_id).await?;
                join::ticket_view_one(&self.store, ticket).await
            }
        }
    }

    /// Moves a ticket to `status`.
    ///
    /// Only the current assignee or an admin may do this; an unassigned
    /// ticket is therefore admin-only. `closed` is terminal and a
    /// same-status request is a no-op.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
        status: TicketStatus,
    ) -> Result<TicketView, AppError> {
        let ticket = self.load(ticket_id).await?;
        self.ensure_can_change_status(ctx, &ticket)?;

        if ticket.status == status {
            return join::ticket_view_one(&self.store, ticket).await;
        }
        if !ticket.status.can_transition_to(status) {
            return Err(AppError::conflict(format!(
                "Cannot move a {} ticket to {status}",
                ticket.status
            )));
        }

        let updated = match self.store.tickets.set_status(ticket_id, status).await? {
            Some(t) => t,
            None => {
                // Deleted or closed since it was loaded.
                self.load(ticket_id).await?;
                return Err(AppError::conflict("Ticket was closed concurrently"));
            }
        };

        info!(
            user_id = %ctx.user_id,
            ticket_id = %ticket_id,
            from = %ticket.status,
            to = %status,
            "Ticket status changed"
        );
        join::ticket_view_one(&self.store, updated).await
    }

    /// Claims an open, unassigned ticket for the caller.
    ///
    /// Exactly one of several concurrent claimers wins. Losers get
    /// `claimed = false` and the ticket as it now is.
    pub async fn claim(&self, ctx: &RequestContext, ticket_id: TicketId) -> Result<ClaimOutcome, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::TicketWork)?;

        self.load(ticket_id).await?;
        let claimed = self.store.tickets.claim(ticket_id, ctx.user_id).await?;
        if claimed {
            info!(agent_id = %ctx.user_id, ticket_id = %ticket_id, "Ticket claimed");
        } else {
            debug!(agent_id = %ctx.user_id, ticket_id = %ticket_id, "Claim lost");
        }

        let ticket = self.load(ticket_id).await?;
        Ok(ClaimOutcome {
            claimed,
            ticket: join::ticket_view_one(&self.store, ticket).await?,
        })
    }

    /// Sets the assignee.
    ///
    /// Admins may assign any agent or admin, replacing a current assignee.
    /// Agents may only assign to themselves, which is a claim.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
        agent: Option<UserId>,
    ) -> Result<TicketView, AppError> {
        let target = agent.unwrap_or(ctx.user_id);
        let ticket = self.load(ticket_id).await?;

        if self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::TicketManageAll)
        {
            let assignee = self
                .store
                .users
                .find_by_id(target)
                .await?
                .ok_or_else(|| AppError::not_found("Agent not found"))?;
            if !assignee.is_staff() {
                return Err(AppError::validation(
                    "Tickets can only be assigned to agents or admins",
                ));
            }
            if ticket.status.is_terminal() {
                return Err(AppError::conflict("Closed tickets cannot be reassigned"));
            }

            let updated = self
                .store
                .tickets
                .assign(ticket_id, target)
                .await?
                .ok_or_else(|| AppError::not_found("Ticket not found"))?;
            info!(
                admin_id = %ctx.user_id,
                ticket_id = %ticket_id,
                assignee_id = %target,
                "Ticket assigned"
            );
            return join::ticket_view_one(&self.store, updated).await;
        }

        self.rbac
            .require_permission(&ctx.role, &SystemPermission::TicketWork)?;
        if target != ctx.user_id {
            return Err(AppError::forbidden(
                "Agents can only assign tickets to themselves",
            ));
        }
        if ticket.is_assigned_to(ctx.user_id) {
            return join::ticket_view_one(&self.store, ticket).await;
        }

        let outcome = self.claim(ctx, ticket_id).await?;
        if outcome.claimed {
            Ok(outcome.ticket)
        } else {
            Err(AppError::conflict("Ticket is already assigned or not open"))
        }
    }

    /// Hard-deletes a ticket and its comments.
    pub async fn delete(&self, ctx: &RequestContext, ticket_id: TicketId) -> Result<(), AppError> {
        let ticket = self.load(ticket_id).await?;
        self.ensure_owner_or_admin(ctx, &ticket)?;

        if !self.store.tickets.delete(ticket_id).await? {
            return Err(AppError::not_found("Ticket not found"));
        }
        info!(user_id = %ctx.user_id, ticket_id = %ticket_id, "Ticket deleted");
        Ok(())
    }

    /// Posts a comment. `is_internal` is honoured only for staff.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
        content: &str,
        is_internal: bool,
    ) -> Result<CommentView, AppError> {
        let ticket = self.load(ticket_id).await?;
        self.ensure_can_read(ctx, &ticket)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment content is required"));
        }

        let comment = self
            .store
            .comments
            .create(&CreateComment {
                ticket_id,
                author: ctx.user_id,
                content: content.to_string(),
                is_internal: is_internal && self.sees_internal(ctx),
            })
            .await?;

        debug!(user_id = %ctx.user_id, ticket_id = %ticket_id, "Comment added");
        let mut views = join::comment_views(&self.store, vec![comment]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::internal("Comment join produced no view"))
    }

    /// Comments on a ticket, internal notes hidden from regular users.
    pub async fn list_comments(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
    ) -> Result<Vec<CommentView>, AppError> {
        let ticket = self.load(ticket_id).await?;
        self.ensure_can_read(ctx, &ticket)?;
        self.visible_comments(ctx, ticket_id).await
    }

    async fn visible_comments(
        &self,
        ctx: &RequestContext,
        ticket_id: TicketId,
    ) -> Result<Vec<CommentView>, AppError> {
        let sees_internal = self.sees_internal(ctx);
        let comments = self
            .store
            .comments
            .find_by_ticket(ticket_id)
            .await?
            .into_iter()
            .filter(|c| sees_internal || !c.is_internal)
            .collect();
        join::comment_views(&self.store, comments).await
    }

    /// Every account that can work tickets.
    pub async fn list_agents(&self, ctx: &RequestContext) -> Result<Vec<UserSummary>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::TicketReadAll)?;

        let staff = self
            .store
            .users
            .find_by_roles(&[UserRole::Agent, UserRole::Admin])
            .await?;
        Ok(staff.iter().map(UserSummary::from).collect())
    }
}

/// Trim tags, drop empties and duplicates, keep first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
