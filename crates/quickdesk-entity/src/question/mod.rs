//! Q&A domain entities.

pub mod answer;
pub mod model;
pub mod vote;

pub use answer::{Answer, CreateAnswer};
pub use model::{CreateQuestion, Question, UpdateQuestion};
pub use vote::{Vote, VoteOutcome, VoteTally, VoteType};
