//! Per-actor question votes.

use chrono::{DateTime, Utc};
use quickdesk_core::types::{QuestionId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vote_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Upvote.
    Up,
    /// Downvote.
    Down,
}

impl VoteType {
    /// Return the vote type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = quickdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(quickdesk_core::AppError::validation(format!(
                "Invalid vote type: '{s}'. Expected one of: up, down"
            ))),
        }
    }
}

/// One actor's vote on one question. At most one row per (question, user).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Voted question.
    pub question_id: QuestionId,
    /// Voter.
    pub user_id: UserId,
    /// Direction.
    pub vote_type: VoteType,
    /// When the vote was first cast or last flipped.
    pub created_at: DateTime<Utc>,
}

/// What casting a vote did to the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    /// A new vote row was recorded.
    Recorded,
    /// The actor's previous vote was reversed.
    Flipped,
    /// The same vote already existed.
    Unchanged,
}

/// Aggregated vote counts for a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Number of upvotes.
    pub up: u64,
    /// Number of downvotes.
    pub down: u64,
}

impl VoteTally {
    /// Count a slice of votes.
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Self {
        votes.into_iter().fold(Self::default(), |mut tally, vote| {
            match vote.vote_type {
                VoteType::Up => tally.up += 1,
                VoteType::Down => tally.down += 1,
            }
            tally
        })
    }

    /// Net score: ups minus downs.
    pub fn score(&self) -> i64 {
        self.up as i64 - self.down as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(vote_type: VoteType) -> Vote {
        Vote {
            question_id: QuestionId::new(),
            user_id: UserId::new(),
            vote_type,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_tally_score() {
        let votes = [vote(VoteType::Up), vote(VoteType::Up), vote(VoteType::Down)];
        let tally = VoteTally::from_votes(&votes);
        assert_eq!(tally.up, 2);
        assert_eq!(tally.down, 1);
        assert_eq!(tally.score(), 1);
    }

    #[test]
    fn test_negative_score() {
        let tally = VoteTally::from_votes(&[vote(VoteType::Down)]);
        assert_eq!(tally.score(), -1);
    }
}
