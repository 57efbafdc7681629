//! Leading and trailing edge throttle.
//!
//! The first call in a quiet period runs the job immediately and opens a
//! window. Calls that land inside the window are coalesced: only the latest
//! argument is kept, and it runs once when the window closes. That trailing
//! run opens a new window of its own.
//!
//! Timing uses `tokio::time`, so tests can drive it with paused time.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::Instant;

type Job<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// What happened to a throttled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleOutcome {
    /// The job was started right away.
    Fired,
    /// The argument was parked for the trailing run.
    Deferred,
}

struct ThrottleState<T> {
    last_run: Option<Instant>,
    pending: Option<T>,
    trailing_armed: bool,
}

pub struct Throttle<T> {
    interval: Duration,
    job: Job<T>,
    state: Arc<Mutex<ThrottleState<T>>>,
}

impl<T: Send + 'static> Throttle<T> {
    pub fn new<F, Fut>(interval: Duration, job: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job: Job<T> = Arc::new(move |arg| Box::pin(job(arg)));
        Self {
            interval,
            job,
            state: Arc::new(Mutex::new(ThrottleState {
                last_run: None,
                pending: None,
                trailing_armed: false,
            })),
        }
    }

    /// Run the job now or park `arg` for the trailing run.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn call(&self, arg: T) -> ThrottleOutcome {
        let now = Instant::now();
        let mut state = lock(&self.state);

        let window_open = state
            .last_run
            .is_some_and(|last| now.duration_since(last) < self.interval);

        if !window_open && !state.trailing_armed {
            state.last_run = Some(now);
            drop(state);
            tokio::spawn((self.job)(arg));
            return ThrottleOutcome::Fired;
        }

        state.pending = Some(arg);
        if !state.trailing_armed {
            state.trailing_armed = true;
            let deadline = state.last_run.map_or(now, |last| last + self.interval);
            self.spawn_trailing(deadline);
        }

        ThrottleOutcome::Deferred
    }

    fn spawn_trailing(&self, deadline: Instant) {
        let state = Arc::clone(&self.state);
        let job = Arc::clone(&self.job);

        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            let pending = {
                let mut state = lock(&state);
                state.trailing_armed = false;
                let pending = state.pending.take();
                if pending.is_some() {
                    state.last_run = Some(Instant::now());
                }
                pending
            };

            if let Some(arg) = pending {
                job(arg).await;
            }
        });
    }
}

fn lock<T>(state: &Mutex<ThrottleState<T>>) -> MutexGuard<'_, ThrottleState<T>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
