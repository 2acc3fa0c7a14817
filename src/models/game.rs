// src/models/game.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::quiz::view::SessionView;

/// DTO for mounting a quiz session on a level.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(range(min = 1, max = 1000))]
    pub level: i32,
}

/// DTO for picking an answer option of the current question.
#[derive(Debug, Deserialize)]
pub struct SelectAnswerRequest {
    pub index: usize,
}

/// Result of submitting an answer.
#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    #[serde(flatten)]
    pub view: SessionView,
    /// `None` when the submission was ignored (already submitted).
    pub is_correct: Option<bool>,
    pub correct_index: Option<usize>,
    /// Set when the answer counted locally but could not be saved.
    pub warning: Option<String>,
}

/// Result of moving on to the next level.
#[derive(Debug, Serialize)]
pub struct NextLevelResponse {
    #[serde(flatten)]
    pub view: SessionView,
    /// Client route of the new level, e.g. `?level=3`.
    pub navigate_to: String,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: i64,
}
