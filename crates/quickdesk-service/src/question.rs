//! Q&A: questions, per-actor voting and answers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use quickdesk_auth::{RbacEnforcer, SystemPermission};
use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, PageRequest, PageResponse, QuestionId};
use quickdesk_database::Store;
use quickdesk_entity::question::{
    CreateAnswer, CreateQuestion, Question, UpdateQuestion, VoteOutcome, VoteType,
};
use quickdesk_entity::view::QuestionView;

use crate::context::RequestContext;
use crate::join;

/// Request to ask a question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Option<CategoryId>,
}

/// Filters for listing questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionQuery {
    /// Case-insensitive text over title, description and tags.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<CategoryId>,
    /// Exact tag, case-insensitive.
    pub tag: Option<String>,
    /// Page window.
    pub page: PageRequest,
}

impl QuestionQuery {
    fn matches(&self, question: &Question) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !question.matches_text(search) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if question.category != Some(category) {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            if !question.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        true
    }
}

/// Result of casting a vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResult {
    /// What the vote changed.
    pub outcome: VoteOutcome,
    /// The question with its new tally.
    pub question: QuestionView,
}

/// Orchestrates questions, votes and answers.
#[derive(Debug, Clone)]
pub struct QuestionService {
    /// Repository bundle.
    store: Store,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl QuestionService {
    /// Creates a new question service.
    pub fn new(store: Store, rbac: Arc<RbacEnforcer>) -> Self {
        Self { store, rbac }
    }

    async fn load(&self, question_id: QuestionId) -> Result<Question, AppError> {
        self.store
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))
    }

    fn ensure_author_or_moderator(
        &self,
        ctx: &RequestContext,
        question: &Question,
    ) -> Result<(), AppError> {
        if question.created_by == ctx.user_id
            || self
                .rbac
                .has_permission(&ctx.role, &SystemPermission::QuestionModerate)
        {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Only the author or an admin can modify this question",
            ))
        }
    }

    /// Posts a question.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: NewQuestion,
    ) -> Result<QuestionView, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::QuestionParticipate)?;

        let title = req.title.trim();
        let description = req.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(AppError::validation("Title and description are required"));
        }

        let question = self
            .store
            .questions
            .create(&CreateQuestion {
                title: title.to_string(),
                description: description.to_string(),
                tags: req
                    .tags
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
                category: req.category,
                created_by: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, question_id = %question.id, "Question posted");
        join::question_view_one(&self.store, question).await
    }

    /// Lists questions matching `query`, newest first, one page at a time.
    ///
    /// Only the requested page is joined.
    pub async fn list(&self, query: &QuestionQuery) -> Result<PageResponse<QuestionView>, AppError> {
        let matching: Vec<Question> = self
            .store
            .questions
            .find_all()
            .await?
            .into_iter()
            .filter(|q| query.matches(q))
            .collect();

        let page = PageResponse::from_vec(matching, query.page);
        let views = join::question_views(&self.store, page.items).await?;
        Ok(PageResponse {
            items: views,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        })
    }

    /// Reads one question with votes and answers.
    pub async fn get(&self, question_id: QuestionId) -> Result<QuestionView, AppError> {
        let question = self.load(question_id).await?;
        join::question_view_one(&self.store, question).await
    }

    /// Edits a question.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        question_id: QuestionId,
        update: UpdateQuestion,
    ) -> Result<QuestionView, AppError> {
        let question = self.load(question_id).await?;
        self.ensure_author_or_moderator(ctx, &question)?;

        if update.title.as_deref().is_some_and(|t| t.trim().is_empty())
            || update.description.as_deref().is_some_and(|d| d.trim().is_empty())
        {
            return Err(AppError::validation("Title and description must not be empty"));
        }

        let updated = self
            .store
            .questions
            .update(question_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Question not found"))?;
        join::question_view_one(&self.store, updated).await
    }

    /// Deletes a question with its answers and votes.
    pub async fn delete(&self, ctx: &RequestContext, question_id: QuestionId) -> Result<(), AppError> {
        let question = self.load(question_id).await?;
        self.ensure_author_or_moderator(ctx, &question)?;

        if !self.store.questions.delete(question_id).await? {
            return Err(AppError::not_found("Question not found"));
        }
        info!(user_id = %ctx.user_id, question_id = %question_id, "Question deleted");
        Ok(())
    }

    /// Casts the caller's vote. Repeating a vote changes nothing; the
    /// opposite vote replaces the earlier one.
    pub async fn vote(
        &self,
        ctx: &RequestContext,
        question_id: QuestionId,
        vote_type: VoteType,
    ) -> Result<VoteResult, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::QuestionParticipate)?;

        self.load(question_id).await?;
        let outcome = self
            .store
            .questions
            .cast_vote(question_id, ctx.user_id, vote_type)
            .await?;
        debug!(
            user_id = %ctx.user_id,
            question_id = %question_id,
            vote = %vote_type,
            ?outcome,
            "Vote cast"
        );

        Ok(VoteResult {
            outcome,
            question: self.get(question_id).await?,
        })
    }

    /// Appends an answer and returns the updated question.
    pub async fn add_answer(
        &self,
        ctx: &RequestContext,
        question_id: QuestionId,
        content: &str,
    ) -> Result<QuestionView, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::QuestionParticipate)?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Answer content is required"));
        }
        self.load(question_id).await?;

        let answer = self
            .store
            .questions
            .add_answer(&CreateAnswer {
                question_id,
                author: ctx.user_id,
                content: content.to_string(),
            })
            .await?;
        info!(
            user_id = %ctx.user_id,
            question_id = %question_id,
            answer_id = %answer.id,
            "Answer posted"
        );

        self.get(question_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use quickdesk_core::error::ErrorKind;
    use quickdesk_entity::user::UserRole;

    #[tokio::test]
    async fn test_duplicate_vote_does_not_change_score() {
        let fx = Fixture::new();
        let asker = fx.user("Ann", UserRole::User).await;
        let voter = fx.user("Bob", UserRole::User).await;
        let question = fx.question(&asker).await;
        let svc = fx.question_service();
        let ctx = Fixture::ctx(&voter);

        let first = svc.vote(&ctx, question.id, VoteType::Up).await.unwrap();
        assert_eq!(first.outcome, VoteOutcome::Recorded);
        assert_eq!(first.question.score, 1);

        let again = svc.vote(&ctx, question.id, VoteType::Up).await.unwrap();
        assert_eq!(again.outcome, VoteOutcome::Unchanged);
        assert_eq!(again.question.score, 1);

        let flipped = svc.vote(&ctx, question.id, VoteType::Down).await.unwrap();
        assert_eq!(flipped.outcome, VoteOutcome::Flipped);
        assert_eq!(flipped.question.score, -1);
        assert_eq!(flipped.question.votes.up, 0);
    }

    #[tokio::test]
    async fn test_vote_on_missing_question() {
        let fx = Fixture::new();
        let voter = fx.user("Bob", UserRole::User).await;
        let err = fx
            .question_service()
            .vote(&Fixture::ctx(&voter), QuestionId::new(), VoteType::Up)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_answers_append_in_order() {
        let fx = Fixture::new();
        let asker = fx.user("Ann", UserRole::User).await;
        let helper = fx.user("Bob", UserRole::Agent).await;
        let question = fx.question(&asker).await;
        let svc = fx.question_service();

        svc.add_answer(&Fixture::ctx(&helper), question.id, "First")
            .await
            .unwrap();
        let view = svc
            .add_answer(&Fixture::ctx(&asker), question.id, "Second")
            .await
            .unwrap();
        let contents: Vec<_> = view.answers.iter().map(|a| a.content.as_str()).collect();
        assert_eq!(contents, ["First", "Second"]);

        let err = svc
            .add_answer(&Fixture::ctx(&asker), question.id, "   ")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let fx = Fixture::new();
        let asker = fx.user("Ann", UserRole::User).await;
        let svc = fx.question_service();
        let ctx = Fixture::ctx(&asker);

        for i in 0..3 {
            svc.create(
                &ctx,
                NewQuestion {
                    title: format!("VPN issue {i}"),
                    description: "Tunnel drops".into(),
                    tags: vec!["Network".into()],
                    category: None,
                },
            )
            .await
            .unwrap();
        }
        svc.create(
            &ctx,
            NewQuestion {
                title: "Printer".into(),
                description: "Out of toner".into(),
                tags: vec![],
                category: None,
            },
        )
        .await
        .unwrap();

        let page = svc
            .list(&QuestionQuery {
                search: Some("vpn".into()),
                page: PageRequest::new(1, 2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);

        let tagged = svc
            .list(&QuestionQuery {
                tag: Some("network".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tagged.total_items, 3);
    }

    #[tokio::test]
    async fn test_only_author_or_admin_edits() {
        let fx = Fixture::new();
        let asker = fx.user("Ann", UserRole::User).await;
        let other = fx.user("Bob", UserRole::User).await;
        let admin = fx.user("Root", UserRole::Admin).await;
        let question = fx.question(&asker).await;
        let svc = fx.question_service();
        let edit = UpdateQuestion {
            title: Some("Reset MFA on new phone".into()),
            ..Default::default()
        };

        let err = svc
            .update(&Fixture::ctx(&other), question.id, edit.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        let view = svc
            .update(&Fixture::ctx(&admin), question.id, edit)
            .await
            .unwrap();
        assert_eq!(view.title, "Reset MFA on new phone");

        svc.delete(&Fixture::ctx(&asker), question.id).await.unwrap();
        let err = svc.get(question.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
