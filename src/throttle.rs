// ABOUTME: Leading+trailing throttle for high-frequency UI and input events
// Runs at most once per window and always delivers the latest arguments

use crate::notify::{Scheduler, TimerHandle};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Wraps a callback so bursts of calls collapse to one run per `delay`.
///
/// The first call in a quiet period runs immediately. Calls inside the window
/// park their arguments and a single trailing run fires when the window ends,
/// using whatever arguments arrived last.
pub struct Throttle<A> {
    inner: Arc<ThrottleInner<A>>,
}

struct ThrottleInner<A> {
    delay: Duration,
    scheduler: Scheduler,
    callback: Box<dyn Fn(A) + Send + Sync>,
    state: Mutex<ThrottleState<A>>,
}

struct ThrottleState<A> {
    last_run: Option<Instant>,
    pending_args: Option<A>,
    trailing: Option<(u64, TimerHandle)>,
    next_token: u64,
    disabled: bool,
}

impl<A: Send + 'static> Throttle<A> {
    pub fn new<F>(scheduler: Scheduler, delay: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ThrottleInner {
                delay,
                scheduler,
                callback: Box::new(callback),
                state: Mutex::new(ThrottleState {
                    last_run: None,
                    pending_args: None,
                    trailing: None,
                    next_token: 0,
                    disabled: false,
                }),
            }),
        }
    }

    pub fn call(&self, args: A) {
        let now = Instant::now();
        let mut state = self.inner.state.lock();
        if state.disabled {
            return;
        }

        let since_last = state.last_run.map(|last| now.duration_since(last));
        match since_last {
            Some(elapsed) if elapsed < self.inner.delay => {
                state.pending_args = Some(args);
                if state.trailing.is_none() {
                    let remaining = self.inner.delay - elapsed;
                    let token = state.next_token;
                    state.next_token += 1;

                    let weak: Weak<ThrottleInner<A>> = Arc::downgrade(&self.inner);
                    let timer = self.inner.scheduler.schedule(remaining, move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.fire_trailing(token);
                        }
                    });
                    state.trailing = Some((token, timer));
                }
            }
            _ => {
                if let Some((_, timer)) = state.trailing.take() {
                    timer.cancel();
                }
                state.pending_args = None;
                state.last_run = Some(now);
                drop(state);
                (self.inner.callback)(args);
            }
        }
    }

    /// Drop a pending trailing run without firing it.
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock();
        if let Some((_, timer)) = state.trailing.take() {
            timer.cancel();
        }
        state.pending_args = None;
    }

    /// Cancel pending work and ignore every later call.
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        state.disabled = true;
        if let Some((_, timer)) = state.trailing.take() {
            timer.cancel();
        }
        state.pending_args = None;
        debug!("Throttle shut down");
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().trailing.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<A> ThrottleInner<A> {
    fn fire_trailing(&self, token: u64) {
        let args = {
            let mut state = self.state.lock();
            // A leading call or cancel may have replaced this timer while it was waking
            match state.trailing {
                Some((current, _)) if current == token => {}
                _ => return,
            }
            state.trailing = None;
            if state.disabled {
                return;
            }
            let Some(args) = state.pending_args.take() else {
                return;
            };
            state.last_run = Some(Instant::now());
            args
        };
        (self.callback)(args);
    }
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A> fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("delay", &self.inner.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    fn recording_throttle(delay_ms: u64) -> (Throttle<u32>, Arc<Mutex<Vec<u32>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let throttle = Throttle::new(
            Scheduler::current().unwrap(),
            Duration::from_millis(delay_ms),
            move |value| sink.lock().push(value),
        );
        (throttle, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_first_and_latest() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(0);
        sleep(Duration::from_millis(10)).await;
        throttle.call(10);
        sleep(Duration::from_millis(10)).await;
        throttle.call(20);

        assert_eq!(*calls.lock(), vec![0]);
        assert!(throttle.is_pending());

        sleep(Duration::from_millis(25)).await;
        assert_eq!(*calls.lock(), vec![0]);

        sleep(Duration::from_millis(10)).await;
        assert_eq!(*calls.lock(), vec![0, 20]);
        assert!(!throttle.is_pending());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(*calls.lock(), vec![0, 20]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trailing_run_starts_new_window() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(1);
        sleep(Duration::from_millis(10)).await;
        throttle.call(2);
        // trailing fires at t=50
        sleep(Duration::from_millis(50)).await;
        assert_eq!(*calls.lock(), vec![1, 2]);

        // t=60 is inside the window opened by the trailing run
        throttle.call(3);
        assert_eq!(*calls.lock(), vec![1, 2]);
        sleep(Duration::from_millis(45)).await;
        assert_eq!(*calls.lock(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_period_runs_immediately() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(1);
        sleep(Duration::from_millis(60)).await;
        throttle.call(2);

        assert_eq!(*calls.lock(), vec![1, 2]);
        assert!(!throttle.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_trailing_run() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(1);
        throttle.call(2);
        throttle.cancel();
        throttle.cancel();

        sleep(Duration::from_millis(100)).await;
        assert_eq!(*calls.lock(), vec![1]);

        // Still usable after cancel
        throttle.call(3);
        assert_eq!(*calls.lock(), vec![1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_disables_everything() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(1);
        throttle.call(2);
        throttle.shutdown();

        sleep(Duration::from_millis(100)).await;
        throttle.call(3);
        sleep(Duration::from_millis(100)).await;

        assert_eq!(*calls.lock(), vec![1]);
    }

    fn trailing_token<A>(throttle: &Throttle<A>) -> Option<u64> {
        throttle.inner.state.lock().trailing.as_ref().map(|(token, _)| *token)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_trailing_after_cancel_is_ignored() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(1);
        throttle.call(2);
        let stale = trailing_token(&throttle).unwrap();
        throttle.cancel();

        // Timer task that woke before its abort landed
        throttle.inner.fire_trailing(stale);
        assert_eq!(*calls.lock(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_trailing_after_fresh_leading_is_ignored() {
        let (throttle, calls) = recording_throttle(50);

        throttle.call(1);
        throttle.call(2);
        let stale = trailing_token(&throttle).unwrap();
        sleep(Duration::from_millis(60)).await;
        assert_eq!(*calls.lock(), vec![1, 2]);

        // Fresh leading run, then a new trailing run is parked
        sleep(Duration::from_millis(60)).await;
        throttle.call(3);
        throttle.call(4);
        assert_ne!(trailing_token(&throttle), Some(stale));

        throttle.inner.fire_trailing(stale);
        assert_eq!(*calls.lock(), vec![1, 2, 3]);
        assert!(throttle.is_pending());

        sleep(Duration::from_millis(60)).await;
        assert_eq!(*calls.lock(), vec![1, 2, 3, 4]);
    }
}
