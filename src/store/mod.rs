// src/store/mod.rs

//! Persistence collaborators of the game: users and their points, answers,
//! level progress, the leaderboard, questions and job postings.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    job::{Job, NewJob},
    leaderboard::{AnswerSubmission, LeaderboardEntry},
    question::{NewQuestion, Question},
    user::User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated (e.g. duplicate username).
    #[error("{0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str, role: &str) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Points the user accumulated over all submitted answers.
    async fn user_points(&self, user_id: Uuid) -> Result<i64, StoreError>;

    /// Records one answer; a correct one credits the user's points.
    async fn submit_answer(&self, user_id: Uuid, submission: &AnswerSubmission) -> Result<(), StoreError>;

    async fn save_level_progress(&self, user_id: Uuid, level: i32) -> Result<(), StoreError>;

    async fn is_level_completed(&self, user_id: Uuid, level: i32) -> Result<bool, StoreError>;

    /// Stores the score if it beats the user's best.
    async fn update_leaderboard(&self, user_id: Uuid, score: i64) -> Result<(), StoreError>;

    /// Best scores, highest first.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError>;

    /// Questions of a level in play order.
    async fn questions_for_level(&self, level: i32) -> Result<Vec<Question>, StoreError>;

    async fn insert_question(&self, question: &NewQuestion) -> Result<Question, StoreError>;

    /// Inserts questions not present yet (same level and prompt); returns how many were new.
    async fn insert_questions(&self, questions: &[NewQuestion]) -> Result<u64, StoreError>;

    /// Inserts jobs not present yet (same title and company); returns how many were new.
    async fn insert_jobs(&self, jobs: &[NewJob]) -> Result<u64, StoreError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    async fn get_job(&self, id: i64) -> Result<Option<Job>, StoreError>;
}
