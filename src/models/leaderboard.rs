// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Aggregated struct for displaying the leaderboard.
/// Represents a row joined from `users` and `leaderboard`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardEntry {
    pub username: String,
    /// Best level score the user has reached.
    pub score: i64,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One answer locked in by a player, as handed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    /// Text of the selected option.
    pub answer: String,
    pub is_correct: bool,
}
