use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;

use quickdesk_core::result::AppResult;
use quickdesk_core::types::{AnswerId, QuestionId, UserId};
use quickdesk_entity::question::{
    Answer, CreateAnswer, CreateQuestion, Question, UpdateQuestion, Vote, VoteOutcome, VoteType,
};

use super::store::{newest_first, values, MemoryStore};
use crate::repositories::QuestionRepository;

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn find_by_id(&self, id: QuestionId) -> AppResult<Option<Question>> {
        Ok(self.tables.questions.get(&id).map(|q| q.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let mut questions = values(&self.tables.questions);
        newest_first(&mut questions, |q| q.created_at);
        Ok(questions)
    }

    async fn create(&self, data: &CreateQuestion) -> AppResult<Question> {
        let now = Utc::now();
        let question = Question {
            id: QuestionId::new(),
            title: data.title.clone(),
            description: data.description.clone(),
            tags: data.tags.clone(),
            category: data.category,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn update(&self, id: QuestionId, data: &UpdateQuestion) -> AppResult<Option<Question>> {
        Ok(self.tables.questions.get_mut(&id).map(|mut question| {
            data.apply_to(&mut question);
            question.updated_at = Utc::now();
            question.clone()
        }))
    }

    async fn delete(&self, id: QuestionId) -> AppResult<bool> {
        if self.tables.questions.remove(&id).is_none() {
            return Ok(false);
        }
        self.tables.answers.retain(|_, a| a.question_id != id);
        self.tables.votes.retain(|(question, _), _| *question != id);
        Ok(true)
    }

    async fn cast_vote(
        &self,
        question: QuestionId,
        user: UserId,
        vote_type: VoteType,
    ) -> AppResult<VoteOutcome> {
        Ok(match self.tables.votes.entry((question, user)) {
            Entry::Occupied(mut existing) => {
                if existing.get().vote_type == vote_type {
                    VoteOutcome::Unchanged
                } else {
                    let vote = existing.get_mut();
                    vote.vote_type = vote_type;
                    vote.created_at = Utc::now();
                    VoteOutcome::Flipped
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Vote {
                    question_id: question,
                    user_id: user,
                    vote_type,
                    created_at: Utc::now(),
                });
                VoteOutcome::Recorded
            }
        })
    }

    async fn votes_for(&self, questions: &[QuestionId]) -> AppResult<Vec<Vote>> {
        Ok(self
            .tables
            .votes
            .iter()
            .filter(|v| questions.contains(&v.question_id))
            .map(|v| v.value().clone())
            .collect())
    }

    async fn add_answer(&self, data: &CreateAnswer) -> AppResult<Answer> {
        let answer = Answer {
            id: AnswerId::new(),
            question_id: data.question_id,
            author: data.author,
            content: data.content.clone(),
            created_at: Utc::now(),
        };
        self.tables.answers.insert(answer.id, answer.clone());
        Ok(answer)
    }

    async fn answers_for(&self, questions: &[QuestionId]) -> AppResult<Vec<Answer>> {
        let mut answers: Vec<Answer> = values(&self.tables.answers)
            .into_iter()
            .filter(|a| questions.contains(&a.question_id))
            .collect();
        answers.sort_by_key(|a| a.created_at);
        Ok(answers)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.questions.len() as u64)
    }

    async fn count_by_creator(&self, user: UserId) -> AppResult<u64> {
        Ok(self
            .tables
            .questions
            .iter()
            .filter(|q| q.created_by == user)
            .count() as u64)
    }
}
