// src/quiz/registry.rs

use std::sync::Arc;

use dashmap::DashMap;
use tokio::{sync::Mutex, task::JoinHandle};
use uuid::Uuid;

use super::{QuizSession, countdown::spawn_countdown};

/// A live session plus the countdown task driving it.
#[derive(Debug)]
pub struct SessionHandle {
    pub id: Uuid,
    /// User who mounted the session.
    pub owner: Uuid,
    pub session: Arc<Mutex<QuizSession>>,
    countdown: Mutex<Option<JoinHandle<()>>>,
}

impl SessionHandle {
    /// Starts the countdown for `round`, aborting the previous one.
    pub async fn restart_countdown(&self, round: u64) {
        let task = spawn_countdown(self.session.clone(), round);
        if let Some(previous) = self.countdown.lock().await.replace(task) {
            previous.abort();
        }
    }

    pub async fn stop_countdown(&self) {
        if let Some(task) = self.countdown.lock().await.take() {
            task.abort();
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.countdown.get_mut().take() {
            task.abort();
        }
    }
}

/// All mounted quiz sessions, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `session` as the owner's only live session.
    ///
    /// Any session the owner mounted before is dropped from the registry; its
    /// countdown is aborted once the last in-flight request lets go of it.
    pub fn insert(&self, owner: Uuid, session: QuizSession) -> Arc<SessionHandle> {
        self.sessions.retain(|_, handle| handle.owner != owner);

        let handle = Arc::new(SessionHandle {
            id: Uuid::new_v4(),
            owner,
            session: Arc::new(Mutex::new(session)),
            countdown: Mutex::new(None),
        });
        self.sessions.insert(handle.id, handle.clone());
        handle
    }

    /// Looks a session up; sessions of other users are invisible.
    pub fn get(&self, id: Uuid, owner: Uuid) -> Option<Arc<SessionHandle>> {
        self.sessions
            .get(&id)
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.value().clone())
    }

    /// Tears a session down and stops its countdown.
    pub async fn remove(&self, id: Uuid, owner: Uuid) -> bool {
        let removed = self.sessions.remove_if(&id, |_, handle| handle.owner == owner);
        match removed {
            Some((_, handle)) => {
                handle.stop_countdown().await;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::quiz::{GameState, session::tests::questions};

    #[tokio::test]
    async fn sessions_are_scoped_to_their_owner() {
        let registry = SessionRegistry::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let handle = registry.insert(alice, QuizSession::new(1, questions(1), false, 90));

        assert!(registry.get(handle.id, alice).is_some());
        assert!(registry.get(handle.id, bob).is_none());
        assert!(!registry.remove(handle.id, bob).await);
        assert!(registry.remove(handle.id, alice).await);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn mounting_again_replaces_the_previous_session() {
        let registry = SessionRegistry::new();
        let owner = Uuid::new_v4();
        let other = registry.insert(Uuid::new_v4(), QuizSession::new(1, questions(1), false, 90));

        let mut last = None;
        for _ in 0..1000 {
            last = Some(registry.insert(owner, QuizSession::new(1, questions(3), false, 90)).id);
        }

        assert_eq!(registry.len(), 2);
        assert!(registry.get(last.unwrap(), owner).is_some());
        assert!(registry.get(other.id, other.owner).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_session_stops_its_countdown() {
        let registry = SessionRegistry::new();
        let owner = Uuid::new_v4();
        let first = registry.insert(owner, QuizSession::new(1, questions(1), false, 10));
        let session = first.session.clone();

        let round = {
            let mut session = session.lock().await;
            session.start().unwrap();
            session.round()
        };
        first.restart_countdown(round).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        registry.insert(owner, QuizSession::new(1, questions(1), false, 10));
        assert!(registry.get(first.id, owner).is_none());
        drop(first);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.lock().await.time_left(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_the_countdown() {
        let registry = SessionRegistry::new();
        let handle = registry.insert(Uuid::new_v4(), QuizSession::new(1, questions(1), false, 10));

        let round = {
            let mut session = handle.session.lock().await;
            session.start().unwrap();
            session.round()
        };
        handle.restart_countdown(round).await;
        handle.restart_countdown(round).await;

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        // Only one countdown may be ticking.
        assert_eq!(handle.session.lock().await.time_left(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_the_clock() {
        let registry = SessionRegistry::new();
        let owner = Uuid::new_v4();
        let handle = registry.insert(owner, QuizSession::new(1, questions(1), false, 10));

        let round = {
            let mut session = handle.session.lock().await;
            session.start().unwrap();
            session.round()
        };
        handle.restart_countdown(round).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert!(registry.remove(handle.id, owner).await);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let session = handle.session.lock().await;
        assert_eq!(session.time_left(), 9);
        assert_eq!(session.state(), GameState::Playing);
    }
}
