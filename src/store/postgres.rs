// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::{
    config::POINTS_PER_CORRECT_ANSWER,
    models::{
        job::{Job, NewJob},
        leaderboard::{AnswerSubmission, LeaderboardEntry},
        question::{NewQuestion, Question},
        user::User,
    },
};

use super::{QuizStore, StoreError};

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[async_trait]
impl QuizStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str, role: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, role, points, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(format!("Username '{}' already exists", username))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                StoreError::from(e)
            }
        })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, role, points, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_points(&self, user_id: Uuid) -> Result<i64, StoreError> {
        let points: Option<i64> = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(points.unwrap_or(0))
    }

    async fn submit_answer(&self, user_id: Uuid, submission: &AnswerSubmission) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO user_answers (user_id, answer, is_correct) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(&submission.answer)
            .bind(submission.is_correct)
            .execute(&mut *tx)
            .await?;

        if submission.is_correct {
            sqlx::query("UPDATE users SET points = points + $1 WHERE id = $2")
                .bind(POINTS_PER_CORRECT_ANSWER)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save_level_progress(&self, user_id: Uuid, level: i32) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO level_progress (user_id, level)
            VALUES ($1, $2)
            ON CONFLICT (user_id, level) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_level_completed(&self, user_id: Uuid, level: i32) -> Result<bool, StoreError> {
        let completed: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM level_progress WHERE user_id = $1 AND level = $2)",
        )
        .bind(user_id)
        .bind(level)
        .fetch_one(&self.pool)
        .await?;

        Ok(completed)
    }

    async fn update_leaderboard(&self, user_id: Uuid, score: i64) -> Result<(), StoreError> {
        // Upsert: keep the highest score if the user replays a level
        sqlx::query(
            r#"
            INSERT INTO leaderboard (user_id, score)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                score = GREATEST(EXCLUDED.score, leaderboard.score),
                updated_at = CASE WHEN EXCLUDED.score > leaderboard.score THEN NOW() ELSE leaderboard.updated_at END
            "#,
        )
        .bind(user_id)
        .bind(score)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.username, l.score, l.updated_at
            FROM leaderboard l
            JOIN users u ON l.user_id = u.id
            ORDER BY l.score DESC, l.updated_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn questions_for_level(&self, level: i32) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, level, prompt, answers, correct_index, created_at
            FROM questions
            WHERE level = $1
            ORDER BY id
            "#,
        )
        .bind(level)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<Question, StoreError> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (level, prompt, answers, correct_index)
            VALUES ($1, $2, $3, $4)
            RETURNING id, level, prompt, answers, correct_index, created_at
            "#,
        )
        .bind(question.level)
        .bind(&question.prompt)
        .bind(Json(&question.answers))
        .bind(question.correct_index)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(format!(
                    "Level {} already has this question",
                    question.level
                ))
            } else {
                StoreError::from(e)
            }
        })
    }

    async fn insert_questions(&self, questions: &[NewQuestion]) -> Result<u64, StoreError> {
        if questions.is_empty() {
            return Ok(0);
        }

        let mut query_builder =
            QueryBuilder::<Postgres>::new("INSERT INTO questions (level, prompt, answers, correct_index) ");
        query_builder.push_values(questions, |mut row, q| {
            row.push_bind(q.level)
                .push_bind(&q.prompt)
                .push_bind(Json(&q.answers))
                .push_bind(q.correct_index);
        });
        query_builder.push(" ON CONFLICT (level, prompt) DO NOTHING");

        let result = query_builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert_jobs(&self, jobs: &[NewJob]) -> Result<u64, StoreError> {
        if jobs.is_empty() {
            return Ok(0);
        }

        // One batch statement for the whole set
        let mut query_builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO jobs (title, company, description, requirements, location, salary, posted_by_id) ",
        );
        query_builder.push_values(jobs, |mut row, job| {
            row.push_bind(&job.title)
                .push_bind(&job.company)
                .push_bind(&job.description)
                .push_bind(Json(&job.requirements))
                .push_bind(&job.location)
                .push_bind(job.salary)
                .push_bind(job.posted_by_id);
        });
        query_builder.push(" ON CONFLICT (title, company) DO NOTHING");

        let result = query_builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company, description, requirements, location, salary, posted_by_id, created_at
            FROM jobs
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, StoreError> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, company, description, requirements, location, salary, posted_by_id, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }
}
