// src/bin/seed.rs

//! One-shot seeding of the job board and the starter question bank.

use std::time::Duration;

use jobquest::config::Config;
use jobquest::seed::{seed_jobs, seed_questions};
use jobquest::store::PgStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.rust_log))
        .with(fmt::layer().with_target(false))
        .init();

    let Some(database_url) = config.database_url.as_deref() else {
        tracing::error!("DATABASE_URL must be set to seed the database");
        return Err("DATABASE_URL must be set".into());
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = PgStore::new(pool);
    let jobs = seed_jobs(&store, config.job_seed_owner).await?;
    let questions = seed_questions(&store).await?;

    tracing::info!(jobs, questions, "Seed data inserted successfully");
    Ok(())
}
