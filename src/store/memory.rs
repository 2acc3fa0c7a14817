// src/store/memory.rs

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
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

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    answers: Vec<(Uuid, AnswerSubmission)>,
    progress: HashSet<(Uuid, i32)>,
    leaderboard: HashMap<Uuid, (i64, chrono::DateTime<Utc>)>,
    questions: Vec<Question>,
    jobs: Vec<Job>,
}

/// Process-local store used when no database is configured, and in tests.
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of answers recorded for a user.
    pub async fn answer_count(&self, user_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner.answers.iter().filter(|(id, _)| *id == user_id).count()
    }

    /// Number of levels recorded as completed for a user.
    pub async fn completed_levels(&self, user_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner.progress.iter().filter(|(id, _)| *id == user_id).count()
    }
}

impl Inner {
    fn push_question(&mut self, question: &NewQuestion) -> Question {
        let stored = Question {
            id: self.questions.len() as i64 + 1,
            level: question.level,
            prompt: question.prompt.clone(),
            answers: Json(question.answers.clone()),
            correct_index: question.correct_index,
            created_at: Some(Utc::now()),
        };
        self.questions.push(stored.clone());
        stored
    }

    fn has_question(&self, level: i32, prompt: &str) -> bool {
        self.questions
            .iter()
            .any(|q| q.level == level && q.prompt == prompt)
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str, role: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: password_hash.to_string(),
            role: role.to_string(),
            points: 0,
            created_at: Some(Utc::now()),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn user_points(&self, user_id: Uuid) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&user_id).map_or(0, |u| u.points))
    }

    async fn submit_answer(&self, user_id: Uuid, submission: &AnswerSubmission) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if submission.is_correct {
            if let Some(user) = inner.users.get_mut(&user_id) {
                user.points += POINTS_PER_CORRECT_ANSWER;
            }
        }
        inner.answers.push((user_id, submission.clone()));
        Ok(())
    }

    async fn save_level_progress(&self, user_id: Uuid, level: i32) -> Result<(), StoreError> {
        self.inner.write().await.progress.insert((user_id, level));
        Ok(())
    }

    async fn is_level_completed(&self, user_id: Uuid, level: i32) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.progress.contains(&(user_id, level)))
    }

    async fn update_leaderboard(&self, user_id: Uuid, score: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner.leaderboard.entry(user_id).or_insert((score, Utc::now()));
        if score > entry.0 {
            *entry = (score, Utc::now());
        }
        Ok(())
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let inner = self.inner.read().await;
        let mut entries: Vec<LeaderboardEntry> = inner
            .leaderboard
            .iter()
            .filter_map(|(user_id, (score, updated_at))| {
                inner.users.get(user_id).map(|u| LeaderboardEntry {
                    username: u.username.clone(),
                    score: *score,
                    updated_at: Some(*updated_at),
                })
            })
            .collect();

        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.updated_at.cmp(&b.updated_at)));
        entries.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(entries)
    }

    async fn questions_for_level(&self, level: i32) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .iter()
            .filter(|q| q.level == level)
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<Question, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.has_question(question.level, &question.prompt) {
            return Err(StoreError::Conflict(format!(
                "Level {} already has this question",
                question.level
            )));
        }
        Ok(inner.push_question(question))
    }

    async fn insert_questions(&self, questions: &[NewQuestion]) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let mut inserted = 0;
        for question in questions {
            if !inner.has_question(question.level, &question.prompt) {
                inner.push_question(question);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn insert_jobs(&self, jobs: &[NewJob]) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let mut inserted = 0;
        for job in jobs {
            let exists = inner
                .jobs
                .iter()
                .any(|j| j.title == job.title && j.company == job.company);
            if exists {
                continue;
            }

            let id = inner.jobs.len() as i64 + 1;
            inner.jobs.push(Job {
                id,
                title: job.title.clone(),
                company: job.company.clone(),
                description: job.description.clone(),
                requirements: Json(job.requirements.clone()),
                location: job.location.clone(),
                salary: job.salary,
                posted_by_id: job.posted_by_id,
                created_at: Some(Utc::now()),
            });
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.inner.read().await.jobs.clone())
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.iter().find(|j| j.id == id).cloned())
    }
}
