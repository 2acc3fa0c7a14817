// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' table in the database.
/// A question belongs to exactly one level and is immutable once a session loads it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// Level this question is played in.
    pub level: i32,

    /// The text shown to the player.
    pub prompt: String,

    /// Ordered answer options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub answers: Json<Vec<String>>,

    /// Index into `answers` of the correct option.
    pub correct_index: i32,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Question {
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    pub fn answer_text(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    pub fn is_correct(&self, index: usize) -> bool {
        usize::try_from(self.correct_index).is_ok_and(|correct| correct == index)
    }
}

/// DTO for creating a new question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(range(min = 1, max = 1000))]
    pub level: i32,
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,
    #[validate(custom(function = validate_answers))]
    pub answers: Vec<String>,
    #[validate(range(min = 0))]
    pub correct_index: i32,
}

impl CreateQuestionRequest {
    /// The correct index must point at one of the submitted answers.
    pub fn correct_index_in_bounds(&self) -> bool {
        usize::try_from(self.correct_index).is_ok_and(|i| i < self.answers.len())
    }
}

/// A question that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub level: i32,
    pub prompt: String,
    pub answers: Vec<String>,
    pub correct_index: i32,
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(req: CreateQuestionRequest) -> Self {
        Self {
            level: req.level,
            prompt: req.prompt,
            answers: req.answers,
            correct_index: req.correct_index,
        }
    }
}

fn validate_answers(answers: &[String]) -> Result<(), validator::ValidationError> {
    if answers.len() < 2 {
        return Err(validator::ValidationError::new("at_least_two_answers"));
    }
    for answer in answers {
        if answer.is_empty() || answer.len() > 500 {
            return Err(validator::ValidationError::new("answer_length"));
        }
    }
    Ok(())
}
