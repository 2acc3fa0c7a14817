// src/handlers/game.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::game::{
        CreateSessionRequest, NextLevelResponse, PointsResponse, SelectAnswerRequest,
        SubmitAnswerResponse,
    },
    quiz::{
        Advance, GameState, PendingCompletion, QuizSession, SessionHandle, SessionRegistry,
        view::SessionView,
    },
    store::{QuizStore, StoreError},
    utils::jwt::Claims,
};

const ANSWER_NOT_SAVED: &str = "Failed to save your answer";
const PROGRESS_NOT_SAVED: &str = "Error saving progress";

fn find_session(sessions: &SessionRegistry, id: Uuid, user_id: Uuid) -> Result<Arc<SessionHandle>, AppError> {
    sessions
        .get(id, user_id)
        .ok_or(AppError::NotFound("Session not found".to_string()))
}

/// Builds the current view. The points lookup is best effort.
async fn render(handle: &SessionHandle, store: &dyn QuizStore, user_id: Uuid) -> SessionView {
    let points = store.user_points(user_id).await.unwrap_or_else(|e| {
        tracing::debug!("Could not load user points: {}", e);
        0
    });
    let mut session = handle.session.lock().await;
    SessionView::build(handle.id, &mut session, points)
}

/// Mounts a new session on a level for the current user.
///
/// Loads the level's questions and whether the user already completed it.
pub async fn create_session(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let user_id = claims.user_id()?;

    let questions = store.questions_for_level(req.level).await?;
    let completed = store.is_level_completed(user_id, req.level).await?;

    let session = QuizSession::new(req.level, questions, completed, config.quiz_time_limit);
    let handle = sessions.insert(user_id, session);
    tracing::info!(session_id = %handle.id, level = req.level, completed, "Quiz session mounted");

    let view = render(&handle, store.as_ref(), user_id).await;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    Ok(Json(render(&handle, store.as_ref(), user_id).await))
}

/// Tears a session down, stopping its countdown.
pub async fn delete_session(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    if !sessions.remove(id, user_id).await {
        return Err(AppError::NotFound("Session not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Starts a round and its countdown.
pub async fn start(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    let started_round = {
        let mut session = handle.session.lock().await;
        let state = session.start()?;
        (state == GameState::Playing).then(|| session.round())
    };

    if let Some(round) = started_round {
        handle.restart_countdown(round).await;
        tracing::info!(session_id = %id, round, "Quiz round started");
    }

    Ok(Json(render(&handle, store.as_ref(), user_id).await))
}

pub async fn select_answer(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    handle.session.lock().await.select_answer(req.index)?;

    Ok(Json(render(&handle, store.as_ref(), user_id).await))
}

/// Locks in the selected answer and records it in the store.
///
/// A failed store write does not hold the player back: the answer still
/// counts locally and the response carries a warning.
pub async fn submit_answer(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    let pending = handle.session.lock().await.begin_submission()?;

    let Some(pending) = pending else {
        return Ok(Json(SubmitAnswerResponse {
            view: render(&handle, store.as_ref(), user_id).await,
            is_correct: None,
            correct_index: None,
            warning: None,
        }));
    };

    let warning = match store.submit_answer(user_id, &pending.submission).await {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(session_id = %id, "Error saving answer: {}", e);
            Some(ANSWER_NOT_SAVED.to_string())
        }
    };

    let outcome = handle.session.lock().await.finish_submission(&pending);

    Ok(Json(SubmitAnswerResponse {
        view: render(&handle, store.as_ref(), user_id).await,
        is_correct: outcome.map(|o| o.is_correct),
        correct_index: outcome.map(|o| o.correct_index),
        warning,
    }))
}

/// Persists level progress, then the leaderboard score.
async fn persist_completion(store: &dyn QuizStore, user_id: Uuid, pending: &PendingCompletion) -> Result<(), StoreError> {
    store.save_level_progress(user_id, pending.level).await?;
    store.update_leaderboard(user_id, pending.score).await
}

/// Moves to the next question, or completes the level after the last one.
///
/// Completion is only applied once progress and leaderboard are saved; if
/// either write fails the session keeps playing and the player may retry.
///
/// The clock keeps running during the writes. If it runs out before they
/// return, the round ends `timedOut` but the saved progress and score stay
/// recorded, so the level mounts as already completed next time.
pub async fn next_question(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    let advance = handle.session.lock().await.next_question()?;

    if let Advance::Finish(pending) = advance {
        let persisted = persist_completion(store.as_ref(), user_id, &pending).await;

        let completed = {
            let mut session = handle.session.lock().await;
            match persisted {
                Ok(()) => session.complete_level(&pending),
                Err(e) => {
                    session.abort_completion(&pending);
                    tracing::error!(session_id = %id, level = pending.level, "Error completing level: {}", e);
                    return Err(AppError::ServiceUnavailable(PROGRESS_NOT_SAVED.to_string()));
                }
            }
        };

        if completed {
            handle.stop_countdown().await;
            tracing::info!(session_id = %id, level = pending.level, score = pending.score, "Level completed");
        } else {
            tracing::warn!(session_id = %id, level = pending.level, "Round ended while saving progress; progress kept");
        }
    }

    Ok(Json(render(&handle, store.as_ref(), user_id).await))
}

pub async fn play_again(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    handle.session.lock().await.play_again()?;

    Ok(Json(render(&handle, store.as_ref(), user_id).await))
}

/// Loads the following level into the session and returns it idle.
pub async fn next_level(
    State(store): State<Arc<dyn QuizStore>>,
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let handle = find_session(&sessions, id, user_id)?;

    let level = handle.session.lock().await.next_level_number()?;

    let questions = store.questions_for_level(level).await?;
    let completed = store.is_level_completed(user_id, level).await?;

    handle
        .session
        .lock()
        .await
        .load_level(level, questions, completed)?;
    tracing::info!(session_id = %id, level, "Moved to next level");

    Ok(Json(NextLevelResponse {
        view: render(&handle, store.as_ref(), user_id).await,
        navigate_to: format!("?level={}", level),
    }))
}

/// Points the current user accumulated across all sessions.
pub async fn get_points(
    State(store): State<Arc<dyn QuizStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let points = store.user_points(claims.user_id()?).await?;
    Ok(Json(PointsResponse { points }))
}
