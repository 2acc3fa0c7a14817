// src/quiz/countdown.rs

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant},
};

use super::{QuizSession, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns the one-second countdown for `round` of `session`.
///
/// The task ends on its own once the round stops playing; callers abort it
/// when they start a new round or tear the session down.
pub fn spawn_countdown(session: Arc<Mutex<QuizSession>>, round: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            interval.tick().await;

            let (outcome, level) = {
                let mut session = session.lock().await;
                (session.tick(round), session.level())
            };

            match outcome {
                Tick::Running(_) => {}
                Tick::TimedOut => {
                    tracing::info!(level, round, "Quiz round timed out");
                    break;
                }
                Tick::Stopped => {
                    tracing::debug!(level, round, "Countdown stopped");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{GameState, session::tests::questions};

    fn started(time_limit: u32) -> (Arc<Mutex<QuizSession>>, u64) {
        let mut session = QuizSession::new(1, questions(2), false, time_limit);
        session.start().unwrap();
        let round = session.round();
        (Arc::new(Mutex::new(session)), round)
    }

    #[tokio::test(start_paused = true)]
    async fn decrements_once_per_second() {
        let (session, round) = started(10);
        let _task = spawn_countdown(session.clone(), round);

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(session.lock().await.time_left(), 7);
        assert_eq!(session.lock().await.state(), GameState::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn reaching_zero_times_out_and_ends_task() {
        let (session, round) = started(5);
        let task = spawn_countdown(session.clone(), round);

        time::sleep(Duration::from_millis(4_500)).await;
        assert_eq!(session.lock().await.state(), GameState::Playing);

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.lock().await.state(), GameState::TimedOut);
        assert_eq!(session.lock().await.time_left(), 0);

        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn freezes_when_round_leaves_playing() {
        let (session, round) = started(10);
        let task = spawn_countdown(session.clone(), round);

        time::sleep(Duration::from_millis(2_500)).await;
        {
            let mut guard = session.lock().await;
            while guard.state() == GameState::Playing {
                guard.tick(round);
            }
            guard.play_again().unwrap();
        }

        time::sleep(Duration::from_secs(2)).await;
        task.await.unwrap();
        assert_eq!(session.lock().await.state(), GameState::Idle);
    }
}
