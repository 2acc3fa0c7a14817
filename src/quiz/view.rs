// src/quiz/view.rs

//! Render-ready projection of a [`QuizSession`].

use serde::Serialize;
use uuid::Uuid;

use crate::config::LOW_TIME_THRESHOLD_SECS;

use super::{GameState, QuizSession};

/// Everything a client needs to draw the game card.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub level: i32,
    pub state: GameState,
    /// Card title, e.g. "Level 3".
    pub headline: String,
    pub description: String,
    /// Large heading of the finished screens.
    pub banner: Option<&'static str>,
    pub message: Option<String>,
    pub score: i64,
    pub max_score: i64,
    /// Score as a percentage of the maximum, capped at 100.
    pub score_progress: f64,
    /// Points accumulated across all sessions, as reported by the store.
    pub user_points: i64,
    pub time_left: u32,
    pub time_display: String,
    pub low_time: bool,
    pub question: Option<QuestionView>,
    pub actions: Vec<Action>,
    /// True on the first view after a completion only.
    pub celebrate: bool,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    /// 1-based position.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub selected: Option<usize>,
    pub submitted: bool,
    pub submitting: bool,
    pub progress: f64,
    pub primary_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    Neutral,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Start,
    Select,
    Submit,
    Next,
    PlayAgain,
    NextLevel,
}

impl SessionView {
    /// Builds the view, consuming a pending celebration.
    pub fn build(id: Uuid, session: &mut QuizSession, user_points: i64) -> Self {
        let state = session.state();
        let question = (state == GameState::Playing)
            .then(|| question_view(session))
            .flatten();

        Self {
            id,
            level: session.level(),
            state,
            headline: format!("Level {}", session.level()),
            description: description(session),
            banner: banner(state),
            message: message(session),
            score: session.score(),
            max_score: session.max_score(),
            score_progress: score_progress(session.score(), session.max_score()),
            user_points,
            time_left: session.time_left(),
            time_display: format_time(session.time_left()),
            low_time: state == GameState::Playing && session.time_left() < LOW_TIME_THRESHOLD_SECS,
            question,
            actions: actions(session),
            celebrate: session.take_celebration(),
        }
    }
}

/// Formats seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Position of the current question along the level, in percent.
pub fn question_progress(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    index as f64 / (total - 1) as f64 * 100.0
}

pub fn score_progress(score: i64, max_score: i64) -> f64 {
    if max_score <= 0 {
        return 0.0;
    }
    (score as f64 / max_score as f64 * 100.0).min(100.0)
}

fn description(session: &QuizSession) -> String {
    match session.state() {
        GameState::Idle => "Welcome to the Job Application Challenge!".to_string(),
        GameState::Playing => format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.questions().len()
        ),
        GameState::Completed => "Congratulations on completing this level!".to_string(),
        GameState::TimedOut => "You ran out of time!".to_string(),
        GameState::AlreadyCompleted => "You've already mastered this level!".to_string(),
    }
}

fn banner(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Completed => Some("Level Complete!"),
        GameState::TimedOut => Some("Time's Up!"),
        GameState::AlreadyCompleted => Some("Level Already Completed!"),
        GameState::Idle | GameState::Playing => None,
    }
}

fn message(session: &QuizSession) -> Option<String> {
    match session.state() {
        GameState::Idle => Some(format!(
            "Ready to test your knowledge? Answer {} questions to complete this level!",
            session.questions().len()
        )),
        GameState::Completed => Some(format!("Your Score: {}", session.score())),
        GameState::TimedOut => Some(format!("Your Final Score: {}", session.score())),
        GameState::AlreadyCompleted => Some(
            "You've already completed this level. Would you like to play again or move to the next level?"
                .to_string(),
        ),
        GameState::Playing => None,
    }
}

fn question_view(session: &QuizSession) -> Option<QuestionView> {
    let question = session.current_question()?;
    let selected = session.selected();
    let submitted = session.is_submitted();

    let options = question
        .answers
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let mark = match (submitted, question.is_correct(index), selected == Some(index)) {
                (true, true, _) => OptionMark::Correct,
                (true, false, true) => OptionMark::Incorrect,
                (false, _, true) => OptionMark::Selected,
                _ => OptionMark::Neutral,
            };
            OptionView {
                index,
                text: text.clone(),
                mark,
            }
        })
        .collect();

    let primary_label = match (submitted, session.is_last_question()) {
        (false, _) => "Submit Answer",
        (true, false) => "Next Question",
        (true, true) => "Complete Level",
    };

    Some(QuestionView {
        number: session.current_index() + 1,
        total: session.questions().len(),
        prompt: question.prompt.clone(),
        options,
        selected,
        submitted,
        submitting: session.is_submitting(),
        progress: question_progress(session.current_index(), session.questions().len()),
        primary_label,
    })
}

fn actions(session: &QuizSession) -> Vec<Action> {
    match session.state() {
        GameState::Idle => vec![Action::Start],
        GameState::Playing if session.is_submitted() => vec![Action::Next],
        GameState::Playing if session.is_submitting() => Vec::new(),
        GameState::Playing if session.selected().is_some() => vec![Action::Select, Action::Submit],
        GameState::Playing => vec![Action::Select],
        GameState::Completed | GameState::AlreadyCompleted => vec![Action::NextLevel, Action::PlayAgain],
        GameState::TimedOut => vec![Action::PlayAgain],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::session::tests::questions;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(90), "1:30");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(600), "10:00");
    }

    #[test]
    fn question_progress_spans_first_to_last() {
        assert_eq!(question_progress(0, 10), 0.0);
        assert_eq!(question_progress(9, 10), 100.0);
        assert_eq!(question_progress(1, 3), 50.0);
        assert_eq!(question_progress(0, 1), 0.0);
    }

    #[test]
    fn score_progress_is_capped() {
        assert_eq!(score_progress(200, 400), 50.0);
        assert_eq!(score_progress(500, 400), 100.0);
        assert_eq!(score_progress(100, 0), 0.0);
    }

    #[test]
    fn idle_view_offers_start() {
        let mut session = QuizSession::new(2, questions(10), false, 90);
        let view = SessionView::build(Uuid::nil(), &mut session, 1200);

        assert_eq!(view.headline, "Level 2");
        assert_eq!(view.description, "Welcome to the Job Application Challenge!");
        assert_eq!(view.actions, vec![Action::Start]);
        assert_eq!(view.user_points, 1200);
        assert!(view.question.is_none());
        assert!(!view.low_time);
    }

    #[test]
    fn submitted_wrong_answer_marks_both_options() {
        let mut session = QuizSession::new(1, questions(2), false, 90);
        session.start().unwrap();
        session.select_answer(1).unwrap();
        let pending = session.begin_submission().unwrap().unwrap();
        session.finish_submission(&pending);

        let view = SessionView::build(Uuid::nil(), &mut session, 0);
        let question = view.question.expect("playing view has a question");
        let marks: Vec<OptionMark> = question.options.iter().map(|o| o.mark).collect();

        assert_eq!(marks, vec![OptionMark::Correct, OptionMark::Incorrect, OptionMark::Neutral]);
        assert_eq!(question.primary_label, "Next Question");
        assert_eq!(view.actions, vec![Action::Next]);
        assert_eq!(view.description, "Question 1 of 2");
    }

    #[test]
    fn selection_before_submit_is_highlighted() {
        let mut session = QuizSession::new(1, questions(1), false, 90);
        session.start().unwrap();
        session.select_answer(2).unwrap();

        let view = SessionView::build(Uuid::nil(), &mut session, 0);
        let question = view.question.unwrap();
        assert_eq!(question.options[2].mark, OptionMark::Selected);
        assert_eq!(question.options[0].mark, OptionMark::Neutral);
        assert_eq!(question.primary_label, "Submit Answer");
        assert_eq!(view.actions, vec![Action::Select, Action::Submit]);
    }

    #[test]
    fn low_time_flag_below_thirty_seconds() {
        let mut session = QuizSession::new(1, questions(1), false, 31);
        session.start().unwrap();
        assert!(!SessionView::build(Uuid::nil(), &mut session, 0).low_time);

        session.tick(session.round());
        session.tick(session.round());
        let view = SessionView::build(Uuid::nil(), &mut session, 0);
        assert_eq!(view.time_display, "0:29");
        assert!(view.low_time);
    }
}
