// src/handlers/jobs.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, store::QuizStore};

/// Lists all job postings.
pub async fn list_jobs(State(store): State<Arc<dyn QuizStore>>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_jobs().await?))
}

/// Retrieves a single job posting by ID.
pub async fn get_job(
    State(store): State<Arc<dyn QuizStore>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let job = store
        .get_job(id)
        .await?
        .ok_or(AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(job))
}
