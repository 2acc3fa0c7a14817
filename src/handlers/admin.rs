// src/handlers/admin.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::question::{CreateQuestionRequest, NewQuestion},
    seed::{seed_jobs, seed_questions},
    store::QuizStore,
};

/// Adds a question to a level.
/// Admin only.
pub async fn create_question(
    State(store): State<Arc<dyn QuizStore>>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !payload.correct_index_in_bounds() {
        return Err(AppError::BadRequest(
            "correct_index must point at one of the answers".to_string(),
        ));
    }

    let question = store.insert_question(&NewQuestion::from(payload)).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// Inserts the job postings and the starter question bank.
/// Admin only. Rows that already exist are skipped.
pub async fn run_seed(
    State(store): State<Arc<dyn QuizStore>>,
    State(config): State<Config>,
) -> Result<impl IntoResponse, AppError> {
    let jobs_inserted = seed_jobs(store.as_ref(), config.job_seed_owner).await?;
    let questions_inserted = seed_questions(store.as_ref()).await?;

    Ok(Json(json!({
        "jobs_inserted": jobs_inserted,
        "questions_inserted": questions_inserted
    })))
}
