// src/models/job.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use uuid::Uuid;

/// Represents the 'jobs' table in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,

    /// Ordered list of requirement bullet points.
    /// Stored as a JSON array in the database.
    pub requirements: Json<Vec<String>>,

    pub location: String,

    /// Yearly salary in whole currency units.
    pub salary: i64,

    /// User who posted the job.
    pub posted_by_id: Uuid,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A job posting that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub location: String,
    pub salary: i64,
    pub posted_by_id: Uuid,
}
