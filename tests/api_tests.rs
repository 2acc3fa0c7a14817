// tests/api_tests.rs

use std::sync::Arc;

use jobquest::{
    config::Config,
    models::user::ROLE_ADMIN,
    routes,
    state::AppState,
    store::{MemoryStore, QuizStore},
    utils::hash::hash_password,
};

fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        bind_addr: ([127, 0, 0, 1], 0).into(),
        quiz_time_limit: 90,
        booking_url: "https://calendly.com/example/30min".parse().unwrap(),
        admin_username: None,
        admin_password: None,
        job_seed_owner: uuid::Uuid::new_v4(),
        seed_on_start: false,
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and the backing store.
async fn spawn_app() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), test_config());
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, store)
}

async fn register_and_login(client: &reqwest::Client, address: &str, username: &str) -> String {
    client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .expect("Register failed");

    login(client, address, username).await
}

async fn login(client: &reqwest::Client, address: &str, username: &str) -> String {
    let resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    resp["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": "jordan",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "jordan");
    assert_eq!(body["points"], 0);
    assert!(body.get("password").is_none(), "password hash must not leak");
}

#[tokio::test]
async fn register_fails_validation() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: Send a username that is too short
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": "yo",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    let body = serde_json::json!({ "username": "morgan", "password": "password123" });

    let first = client
        .post(format!("{}/api/auth/register", address))
        .json(&body)
        .send()
        .await
        .unwrap();
    let second = client
        .post(format!("{}/api/auth/register", address))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(first.status().as_u16(), 201);
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    register_and_login(&client, &address, "riley").await;

    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": "riley", "password": "not-the-password" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn game_routes_require_a_token() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/game/sessions", address))
        .json(&serde_json::json!({ "level": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .get(format!("{}/api/game/points", address))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn hero_panel_and_demo_link() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let hero: serde_json::Value = client
        .get(format!("{}/api/services/hero", address))
        .query(&[("title", "Career Coaching"), ("description", "One-on-one sessions")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(hero["title"], "Career Coaching");
    assert_eq!(hero["image_src"], "/placeholder.svg");
    assert_eq!(hero["cta_label"], "Book a Demo");
    assert_eq!(hero["cta_href"], "/api/services/book-demo");

    let redirect = client
        .get(format!("{}/api/services/book-demo", address))
        .send()
        .await
        .unwrap();

    assert_eq!(redirect.status().as_u16(), 303);
    assert_eq!(
        redirect.headers()["location"].to_str().unwrap(),
        "https://calendly.com/example/30min"
    );
}

#[tokio::test]
async fn hero_requires_a_title() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/services/hero", address))
        .query(&[("title", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn admin_seeds_jobs_once() {
    let (address, store) = spawn_app().await;
    let client = reqwest::Client::new();

    let hashed = hash_password("password123").unwrap();
    store.create_user("boss", &hashed, ROLE_ADMIN).await.unwrap();
    let admin_token = login(&client, &address, "boss").await;
    let player_token = register_and_login(&client, &address, "player").await;

    // Players may not seed
    let forbidden = client
        .post(format!("{}/api/admin/seed", address))
        .header("Authorization", format!("Bearer {}", player_token))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status().as_u16(), 403);

    let first: serde_json::Value = client
        .post(format!("{}/api/admin/seed", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["jobs_inserted"], 10);
    assert_eq!(first["questions_inserted"], 10);

    let second: serde_json::Value = client
        .post(format!("{}/api/admin/seed", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["jobs_inserted"], 0);

    let jobs: Vec<serde_json::Value> = client
        .get(format!("{}/api/jobs", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(jobs.len(), 10);
    assert_eq!(jobs[3]["title"], "DevOps Engineer");
    assert_eq!(jobs[3]["location"], "Remote");
    assert_eq!(jobs[3]["requirements"].as_array().unwrap().len(), 4);

    let id = jobs[0]["id"].as_i64().unwrap();
    let job = client
        .get(format!("{}/api/jobs/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(job.status().as_u16(), 200);

    let missing = client
        .get(format!("{}/api/jobs/9999", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn admin_question_needs_valid_correct_index() {
    let (address, store) = spawn_app().await;
    let client = reqwest::Client::new();

    let hashed = hash_password("password123").unwrap();
    store.create_user("boss", &hashed, ROLE_ADMIN).await.unwrap();
    let token = login(&client, &address, "boss").await;

    let bad = client
        .post(format!("{}/api/admin/questions", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "level": 3,
            "prompt": "What is a reference?",
            "answers": ["A former manager vouching for you", "A bibliography"],
            "correct_index": 2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status().as_u16(), 400);

    let good = client
        .post(format!("{}/api/admin/questions", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "level": 3,
            "prompt": "What is a reference?",
            "answers": ["A former manager vouching for you", "A bibliography"],
            "correct_index": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(good.status().as_u16(), 201);
    assert_eq!(store.questions_for_level(3).await.unwrap().len(), 1);
}
