// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;
use url::Url;
use uuid::Uuid;

use crate::error::ConfigError;

/// Points awarded for each correctly answered question.
pub const POINTS_PER_CORRECT_ANSWER: i64 = 100;

/// Countdown length of one quiz round, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 90;

/// Below this many seconds the countdown is flagged as running low.
pub const LOW_TIME_THRESHOLD_SECS: u32 = 30;

/// Number of rows returned by the leaderboard endpoint.
pub const LEADERBOARD_SIZE: i64 = 10;

pub const DEFAULT_BOOKING_URL: &str = "https://calendly.com/karansingh-ks7417/30min?month=2025-02";

/// Owner recorded on the seeded job postings unless overridden.
pub const DEFAULT_JOB_SEED_OWNER: &str = "8c0ee35b-fff0-4120-81e8-a0e7be5099ca";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When absent the in-memory store is used.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub quiz_time_limit: u32,
    pub booking_url: Url,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub job_seed_owner: Uuid,
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration = parse_var("JWT_EXPIRATION", 86_400)?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = parse_var("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;

        let quiz_time_limit = parse_var("QUIZ_TIME_LIMIT_SECS", DEFAULT_TIME_LIMIT_SECS)?;
        if quiz_time_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "QUIZ_TIME_LIMIT_SECS",
                reason: "must be at least one second".to_string(),
            });
        }

        let booking_url = env::var("BOOKING_URL").unwrap_or_else(|_| DEFAULT_BOOKING_URL.to_string());
        let booking_url = Url::parse(&booking_url).map_err(|e| ConfigError::Invalid {
            key: "BOOKING_URL",
            reason: e.to_string(),
        })?;

        let job_seed_owner = env::var("JOB_SEED_OWNER_ID").unwrap_or_else(|_| DEFAULT_JOB_SEED_OWNER.to_string());
        let job_seed_owner = Uuid::parse_str(&job_seed_owner).map_err(|e| ConfigError::Invalid {
            key: "JOB_SEED_OWNER_ID",
            reason: e.to_string(),
        })?;

        let seed_on_start = parse_var("SEED_ON_START", false)?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            quiz_time_limit,
            booking_url,
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            job_seed_owner,
            seed_on_start,
        })
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
