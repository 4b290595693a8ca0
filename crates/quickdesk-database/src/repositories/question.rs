//! Question repository contract, including votes and answers.

use async_trait::async_trait;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{QuestionId, UserId};
use quickdesk_entity::question::{
    Answer, CreateAnswer, CreateQuestion, Question, UpdateQuestion, Vote, VoteOutcome, VoteType,
};

/// Persistence operations on questions and their owned votes and answers.
#[async_trait]
pub trait QuestionRepository: Send + Sync + std::fmt::Debug {
    /// Find a question by primary key.
    async fn find_by_id(&self, id: QuestionId) -> AppResult<Option<Question>>;

    /// All questions, newest first.
    async fn find_all(&self) -> AppResult<Vec<Question>>;

    /// Insert a new question.
    async fn create(&self, data: &CreateQuestion) -> AppResult<Question>;

    /// Apply a partial update.
    async fn update(&self, id: QuestionId, data: &UpdateQuestion) -> AppResult<Option<Question>>;

    /// Hard-delete a question with its votes and answers.
    async fn delete(&self, id: QuestionId) -> AppResult<bool>;

    /// Record `user`'s vote. One vote per (question, user): repeating the
    /// same vote is a no-op and the opposite vote replaces it.
    async fn cast_vote(
        &self,
        question: QuestionId,
        user: UserId,
        vote_type: VoteType,
    ) -> AppResult<VoteOutcome>;

    /// Votes on any of `questions`.
    async fn votes_for(&self, questions: &[QuestionId]) -> AppResult<Vec<Vote>>;

    /// Append an answer.
    async fn add_answer(&self, data: &CreateAnswer) -> AppResult<Answer>;

    /// Answers on any of `questions`, oldest first.
    async fn answers_for(&self, questions: &[QuestionId]) -> AppResult<Vec<Answer>>;

    /// Total number of questions.
    async fn count(&self) -> AppResult<u64>;

    /// Number of questions asked by `user`.
    async fn count_by_creator(&self, user: UserId) -> AppResult<u64>;
}
