// ABOUTME: One-shot cancellable timers backed by tokio tasks
// Every scheduled callback hands back a handle that can abort it before it fires

use crate::notify::NotifyError;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawns delayed callbacks onto the runtime it was created on.
#[derive(Debug, Clone)]
pub struct Scheduler {
    handle: Handle,
}

impl Scheduler {
    /// Bind to the runtime the caller is currently running in.
    pub fn current() -> Result<Self, NotifyError> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| NotifyError::NoRuntime)
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// Run `task` once after `delay`. Callable from any thread.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        debug!("Scheduling timer in {:?}", delay);
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle { join }
    }
}

/// Cancellation handle for a scheduled callback.
///
/// Dropping the handle leaves the timer running.
#[derive(Debug)]
pub struct TimerHandle {
    join: JoinHandle<()>,
}

impl TimerHandle {
    /// Idempotent; a no-op once the callback has fired.
    pub fn cancel(&self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
