// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, game, hero, jobs, leaderboard},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, game, jobs, services, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, live sessions, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Every game route acts on behalf of the logged-in player
    let game_routes = Router::new()
        .route("/sessions", post(game::create_session))
        .route(
            "/sessions/{id}",
            get(game::get_session).delete(game::delete_session),
        )
        .route("/sessions/{id}/start", post(game::start))
        .route("/sessions/{id}/select", post(game::select_answer))
        .route("/sessions/{id}/submit", post(game::submit_answer))
        .route("/sessions/{id}/next", post(game::next_question))
        .route("/sessions/{id}/play-again", post(game::play_again))
        .route("/sessions/{id}/next-level", post(game::next_level))
        .route("/points", get(game::get_points))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let job_routes = Router::new()
        .route("/", get(jobs::list_jobs))
        .route("/{id}", get(jobs::get_job));

    let service_routes = Router::new()
        .route("/hero", get(hero::get_hero))
        .route("/book-demo", get(hero::book_demo));

    let admin_routes = Router::new()
        .route("/questions", post(admin::create_question))
        .route("/seed", post(admin::run_seed))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/game", game_routes)
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .nest("/api/jobs", job_routes)
        .nest("/api/services", service_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
