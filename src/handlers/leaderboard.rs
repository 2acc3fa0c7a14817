// src/handlers/leaderboard.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{config::LEADERBOARD_SIZE, error::AppError, store::QuizStore};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}

/// Retrieves the best level scores, highest first.
pub async fn get_leaderboard(
    State(store): State<Arc<dyn QuizStore>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(LEADERBOARD_SIZE).clamp(1, 100);

    let leaderboard = store.leaderboard(limit).await.map_err(|e| {
        tracing::error!("Failed to fetch leaderboard: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(leaderboard))
}
