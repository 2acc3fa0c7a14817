// src/quiz/mod.rs

//! Quiz game engine: a per-player state machine, its countdown and the
//! registry that owns live sessions.

pub mod countdown;
pub mod registry;
pub mod session;
pub mod view;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub use registry::{SessionHandle, SessionRegistry};
pub use session::{Advance, PendingAnswer, PendingCompletion, QuizSession, SubmissionOutcome, Tick};

/// Lifecycle of one quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    Idle,
    Playing,
    Completed,
    TimedOut,
    AlreadyCompleted,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Idle => "idle",
            GameState::Playing => "playing",
            GameState::Completed => "completed",
            GameState::TimedOut => "timedOut",
            GameState::AlreadyCompleted => "alreadyCompleted",
        }
    }

    /// States that end a round and offer "play again".
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            GameState::Completed | GameState::TimedOut | GameState::AlreadyCompleted
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule violations raised by [`QuizSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("cannot {action} while the game is {state}")]
    InvalidTransition { action: &'static str, state: GameState },

    #[error("level {0} has no questions")]
    NoQuestions(i32),

    #[error("answer {index} is out of range for a question with {len} options")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("no answer selected")]
    NoAnswerSelected,

    #[error("the current answer has not been submitted")]
    AnswerNotSubmitted,
}
