//! Question repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{AnswerId, QuestionId, UserId};
use quickdesk_entity::question::{
    Answer, CreateAnswer, CreateQuestion, Question, UpdateQuestion, Vote, VoteOutcome, VoteType,
};

use super::{db_error, to_count};
use crate::repositories::QuestionRepository;

/// PostgreSQL-backed question repository.
#[derive(Debug, Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    /// Create a new question repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn find_by_id(&self, id: QuestionId) -> AppResult<Option<Question>> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find question"))
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list questions"))
    }

    async fn create(&self, data: &CreateQuestion) -> AppResult<Question> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (id, title, description, tags, category, created_by,
                                   created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(QuestionId::new())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.tags)
        .bind(data.category)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create question"))
    }

    async fn update(&self, id: QuestionId, data: &UpdateQuestion) -> AppResult<Option<Question>> {
        sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tags = COALESCE($4, tags),
                category = COALESCE($5, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.tags)
        .bind(data.category)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update question"))
    }

    async fn delete(&self, id: QuestionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete question"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn cast_vote(
        &self,
        question: QuestionId,
        user: UserId,
        vote_type: VoteType,
    ) -> AppResult<VoteOutcome> {
        // The conditional DO UPDATE returns no row when the same vote exists.
        // `xmax = 0` holds only for freshly inserted rows.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO question_votes (question_id, user_id, vote_type, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (question_id, user_id) DO UPDATE
                SET vote_type = EXCLUDED.vote_type, created_at = NOW()
                WHERE question_votes.vote_type <> EXCLUDED.vote_type
            RETURNING (xmax = 0)
            "#,
        )
        .bind(question)
        .bind(user)
        .bind(vote_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to record vote"))?;

        Ok(match inserted {
            Some(true) => VoteOutcome::Recorded,
            Some(false) => VoteOutcome::Flipped,
            None => VoteOutcome::Unchanged,
        })
    }

    async fn votes_for(&self, questions: &[QuestionId]) -> AppResult<Vec<Vote>> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Vote>("SELECT * FROM question_votes WHERE question_id = ANY($1)")
            .bind(questions)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load votes"))
    }

    async fn add_answer(&self, data: &CreateAnswer) -> AppResult<Answer> {
        sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (id, question_id, author, content, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            "#,
        )
        .bind(AnswerId::new())
        .bind(data.question_id)
        .bind(data.author)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to add answer"))
    }

    async fn answers_for(&self, questions: &[QuestionId]) -> AppResult<Vec<Answer>> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Answer>(
            "SELECT * FROM answers WHERE question_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(questions)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load answers"))
    }

    async fn count(&self) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count questions"))
    }

    async fn count_by_creator(&self, user: UserId) -> AppResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions WHERE created_by = $1")
            .bind(user)
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error("Failed to count questions by creator"))
    }
}
