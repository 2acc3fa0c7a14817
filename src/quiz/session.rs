// src/quiz/session.rs

use crate::{
    config::POINTS_PER_CORRECT_ANSWER,
    models::{leaderboard::AnswerSubmission, question::Question},
};

use super::{GameState, QuizError};

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still playing, with this many seconds left.
    Running(u32),
    /// The clock hit zero on this tick.
    TimedOut,
    /// The round this countdown belongs to is over.
    Stopped,
}

/// What advancing from the current question led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    /// The last question was passed; progress must be persisted before the
    /// session may complete.
    Finish(PendingCompletion),
    /// A completion attempt is already running.
    InFlight,
}

/// An answer locked in locally, waiting for the store write to settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnswer {
    pub round: u64,
    pub question_index: usize,
    pub submission: AnswerSubmission,
}

/// A level completion waiting for the store writes to settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCompletion {
    pub round: u64,
    pub level: i32,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub is_correct: bool,
    pub correct_index: usize,
    pub score: i64,
}

/// One player's quiz session on one level.
///
/// Pure state machine: every store interaction is split into a `begin`
/// step that hands out a pending token and a `finish` step applied once
/// the store has answered, so the owner can release its lock in between.
#[derive(Debug)]
pub struct QuizSession {
    level: i32,
    questions: Vec<Question>,
    level_completed: bool,
    force_play: bool,
    state: GameState,
    current: usize,
    selected: Option<usize>,
    submitted: bool,
    submitting: bool,
    completing: bool,
    score: i64,
    correct_answers: u32,
    time_limit: u32,
    time_left: u32,
    round: u64,
    celebration_pending: bool,
    celebrated: bool,
}

impl QuizSession {
    pub fn new(level: i32, questions: Vec<Question>, level_completed: bool, time_limit: u32) -> Self {
        Self {
            level,
            questions,
            level_completed,
            force_play: false,
            state: initial_state(level_completed),
            current: 0,
            selected: None,
            submitted: false,
            submitting: false,
            completing: false,
            score: 0,
            correct_answers: 0,
            time_limit,
            time_left: time_limit,
            round: 0,
            celebration_pending: false,
            celebrated: false,
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn max_score(&self) -> i64 {
        self.questions.len() as i64 * POINTS_PER_CORRECT_ANSWER
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_level_completed(&self) -> bool {
        self.level_completed
    }

    /// Begins a round. A level already completed bounces to
    /// `AlreadyCompleted` unless "play again" forced a replay.
    pub fn start(&mut self) -> Result<GameState, QuizError> {
        self.expect_state("start", &[GameState::Idle])?;

        if self.level_completed && !self.force_play {
            self.state = GameState::AlreadyCompleted;
            return Ok(self.state);
        }
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions(self.level));
        }

        self.round += 1;
        self.reset_question_cursor();
        self.score = 0;
        self.correct_answers = 0;
        self.completing = false;
        self.time_left = self.time_limit;
        self.state = GameState::Playing;
        Ok(self.state)
    }

    /// Highlights an option. Ignored once the answer is locked in.
    pub fn select_answer(&mut self, index: usize) -> Result<(), QuizError> {
        self.expect_state("select an answer", &[GameState::Playing])?;

        if self.submitted || self.submitting {
            return Ok(());
        }

        let len = self.current_question().map_or(0, Question::answer_count);
        if index >= len {
            return Err(QuizError::AnswerOutOfRange { index, len });
        }

        self.selected = Some(index);
        Ok(())
    }

    /// Locks in the selected answer. Returns `None` when this question was
    /// already submitted or a submission is in flight.
    pub fn begin_submission(&mut self) -> Result<Option<PendingAnswer>, QuizError> {
        self.expect_state("submit an answer", &[GameState::Playing])?;

        if self.submitted || self.submitting {
            return Ok(None);
        }

        let selected = self.selected.ok_or(QuizError::NoAnswerSelected)?;
        let question = self
            .current_question()
            .ok_or(QuizError::NoQuestions(self.level))?;
        let answer = question
            .answer_text(selected)
            .ok_or(QuizError::AnswerOutOfRange {
                index: selected,
                len: question.answer_count(),
            })?
            .to_string();
        let is_correct = question.is_correct(selected);

        self.submitting = true;
        Ok(Some(PendingAnswer {
            round: self.round,
            question_index: self.current,
            submission: AnswerSubmission { answer, is_correct },
        }))
    }

    /// Applies a locked-in answer whether or not the store accepted it.
    ///
    /// Returns `None` when the round moved on in the meantime (timed out,
    /// restarted) and the answer no longer counts.
    pub fn finish_submission(&mut self, pending: &PendingAnswer) -> Option<SubmissionOutcome> {
        if pending.round != self.round {
            return None;
        }
        self.submitting = false;

        if self.state != GameState::Playing || self.submitted || pending.question_index != self.current {
            return None;
        }

        if pending.submission.is_correct {
            self.score += POINTS_PER_CORRECT_ANSWER;
            self.correct_answers += 1;
        }
        self.submitted = true;

        let correct_index = self
            .current_question()
            .and_then(|q| usize::try_from(q.correct_index).ok())
            .unwrap_or_default();

        Some(SubmissionOutcome {
            is_correct: pending.submission.is_correct,
            correct_index,
            score: self.score,
        })
    }

    /// Moves to the next question, or asks for completion after the last one.
    pub fn next_question(&mut self) -> Result<Advance, QuizError> {
        self.expect_state("advance", &[GameState::Playing])?;

        if !self.submitted {
            return Err(QuizError::AnswerNotSubmitted);
        }

        if !self.is_last_question() {
            self.current += 1;
            self.selected = None;
            self.submitted = false;
            return Ok(Advance::NextQuestion);
        }

        if self.completing {
            return Ok(Advance::InFlight);
        }
        self.completing = true;
        Ok(Advance::Finish(PendingCompletion {
            round: self.round,
            level: self.level,
            score: self.score,
        }))
    }

    /// Marks the level completed after progress was persisted.
    ///
    /// Returns `false` when the round ended first (e.g. the clock ran out
    /// while the store was writing); a timed-out round never completes.
    pub fn complete_level(&mut self, pending: &PendingCompletion) -> bool {
        if pending.round != self.round {
            return false;
        }
        self.completing = false;

        if self.state != GameState::Playing {
            return false;
        }

        self.state = GameState::Completed;
        self.level_completed = true;
        if !self.celebrated {
            self.celebration_pending = true;
        }
        true
    }

    /// Leaves the session playing so the player can retry advancing.
    pub fn abort_completion(&mut self, pending: &PendingCompletion) {
        if pending.round == self.round {
            self.completing = false;
        }
    }

    /// One second of the countdown for `round`.
    pub fn tick(&mut self, round: u64) -> Tick {
        if round != self.round || self.state != GameState::Playing {
            return Tick::Stopped;
        }

        if self.time_left <= 1 {
            self.time_left = 0;
            self.state = GameState::TimedOut;
            self.submitting = false;
            self.completing = false;
            return Tick::TimedOut;
        }

        self.time_left -= 1;
        Tick::Running(self.time_left)
    }

    /// Returns `true` exactly once after a completion.
    pub fn take_celebration(&mut self) -> bool {
        if self.celebration_pending {
            self.celebration_pending = false;
            self.celebrated = true;
            return true;
        }
        false
    }

    /// Back to idle with replay forced, even on a completed level.
    pub fn play_again(&mut self) -> Result<(), QuizError> {
        if !self.state.is_finished() {
            return Err(QuizError::InvalidTransition {
                action: "play again",
                state: self.state,
            });
        }

        self.state = GameState::Idle;
        self.force_play = true;
        self.reset_question_cursor();
        self.reset_celebration();
        Ok(())
    }

    /// Checks that the player may move on and returns the next level number.
    pub fn next_level_number(&self) -> Result<i32, QuizError> {
        self.expect_state(
            "move to the next level",
            &[GameState::Completed, GameState::AlreadyCompleted],
        )?;
        Ok(self.level + 1)
    }

    /// Swaps in a freshly loaded level and returns to idle.
    pub fn load_level(&mut self, level: i32, questions: Vec<Question>, level_completed: bool) -> Result<(), QuizError> {
        self.next_level_number()?;

        self.level = level;
        self.questions = questions;
        self.level_completed = level_completed;
        self.force_play = false;
        self.state = GameState::Idle;
        self.time_left = self.time_limit;
        self.reset_question_cursor();
        self.reset_celebration();
        Ok(())
    }

    fn expect_state(&self, action: &'static str, allowed: &[GameState]) -> Result<(), QuizError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn reset_question_cursor(&mut self) {
        self.current = 0;
        self.selected = None;
        self.submitted = false;
        self.submitting = false;
    }

    fn reset_celebration(&mut self) {
        self.celebration_pending = false;
        self.celebrated = false;
    }
}

fn initial_state(level_completed: bool) -> GameState {
    if level_completed {
        GameState::AlreadyCompleted
    } else {
        GameState::Idle
    }
}
