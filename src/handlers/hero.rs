// src/handlers/hero.rs

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::hero::{HeroParams, ServiceHero},
};

/// Returns the marketing panel for a service page.
pub async fn get_hero(Query(params): Query<HeroParams>) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    Ok(Json(ServiceHero::from(params)))
}

/// "Book a Demo": sends the browser to the external scheduling page.
pub async fn book_demo(State(config): State<Config>) -> Redirect {
    Redirect::to(config.booking_url.as_str())
}
