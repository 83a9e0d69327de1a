// ABOUTME: Notification queue service owning the authoritative list of live toasts
// Handles capacity-bounded insertion, timed expiry, removal, clearing and broadcast

use crate::config::NotificationConfig;
use crate::notify::{NotifyError, Scheduler, ShowOptions, TimerHandle, Toast, ToastId, ToastKind};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Change callback. Listeners re-read state through `get_all`.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle to the process-wide toast queue.
///
/// Cloning shares the same queue. Build one at startup and pass it to whatever
/// needs it.
#[derive(Clone)]
pub struct NotificationService {
    inner: Arc<Inner>,
}

struct Inner {
    config: NotificationConfig,
    scheduler: Scheduler,
    queue: Mutex<QueueState>,
    listeners: Mutex<ListenerSet>,
}

#[derive(Default)]
struct QueueState {
    toasts: VecDeque<Toast>,
    timers: HashMap<ToastId, TimerHandle>,
    next_sequence: u64,
    shut_down: bool,
}

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl NotificationService {
    pub fn new(config: NotificationConfig, scheduler: Scheduler) -> Self {
        info!(
            "Starting notification service (capacity {}, default duration {}ms)",
            config.max_toasts, config.default_duration_ms
        );
        Self {
            inner: Arc::new(Inner {
                config,
                scheduler,
                queue: Mutex::new(QueueState::default()),
                listeners: Mutex::new(ListenerSet::default()),
            }),
        }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.inner.config
    }

    /// Enqueue a toast and return its id. Listeners have been notified by the
    /// time this returns.
    pub fn show(
        &self,
        text: impl Into<String>,
        kind: ToastKind,
        options: ShowOptions,
    ) -> Result<ToastId, NotifyError> {
        let config = &self.inner.config;
        let capacity = config.max_toasts.max(1);
        let id = ToastId::generate();

        {
            let mut queue = self.inner.queue.lock();
            if queue.shut_down {
                return Err(NotifyError::ShutDown);
            }

            let duration = options.duration.unwrap_or_else(|| config.default_duration());
            let toast = Toast {
                id,
                text: text.into(),
                kind,
                duration,
                position: options.position.unwrap_or(config.default_position),
                sequence: queue.next_sequence,
                created_at: Utc::now(),
            };
            queue.next_sequence += 1;

            if !duration.is_zero() {
                let weak: Weak<Inner> = Arc::downgrade(&self.inner);
                let timer = self.inner.scheduler.schedule(duration, move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.expire(id);
                    }
                });
                queue.timers.insert(id, timer);
            }

            debug!("Showing {} {} ({:?})", toast.kind, id, toast.duration);
            queue.toasts.push_back(toast);

            while queue.toasts.len() > capacity {
                if let Some(evicted) = queue.toasts.pop_front() {
                    if let Some(timer) = queue.timers.remove(&evicted.id) {
                        timer.cancel();
                    }
                    debug!("Evicted {} to stay within capacity {}", evicted.id, capacity);
                }
            }
        }

        self.inner.notify();
        Ok(id)
    }

    /// Remove a toast. `Ok(false)` when the id is not live.
    pub fn remove(&self, id: ToastId) -> Result<bool, NotifyError> {
        {
            let mut queue = self.inner.queue.lock();
            if queue.shut_down {
                return Err(NotifyError::ShutDown);
            }
            if !queue.take(id) {
                return Ok(false);
            }
        }
        debug!("Removed {}", id);
        self.inner.notify();
        Ok(true)
    }

    /// Drop every toast and pending expiry. Always notifies.
    pub fn clear(&self) -> Result<(), NotifyError> {
        {
            let mut queue = self.inner.queue.lock();
            if queue.shut_down {
                return Err(NotifyError::ShutDown);
            }
            queue.toasts.clear();
            for (_, timer) in queue.timers.drain() {
                timer.cancel();
            }
        }
        debug!("Cleared all toasts");
        self.inner.notify();
        Ok(())
    }

    /// Snapshot of live toasts, oldest first.
    pub fn get_all(&self) -> Vec<Toast> {
        self.inner.queue.lock().toasts.iter().cloned().collect()
    }

    pub fn get(&self, id: ToastId) -> Option<Toast> {
        self.inner
            .queue
            .lock()
            .toasts
            .iter()
            .find(|toast| toast.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.queue.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut listeners = self.inner.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        debug!("Listener {} subscribed", id);

        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
            detached: false,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().entries.len()
    }

    /// Cancel all timers and drop all state. Later mutations fail with
    /// `NotifyError::ShutDown`. Listeners are not notified.
    pub fn shutdown(&self) {
        {
            let mut queue = self.inner.queue.lock();
            if queue.shut_down {
                return;
            }
            queue.shut_down = true;
            queue.toasts.clear();
            for (_, timer) in queue.timers.drain() {
                timer.cancel();
            }
        }
        // Listeners may own subscriptions; drop them outside the lock
        let dropped = std::mem::take(&mut self.inner.listeners.lock().entries);
        drop(dropped);
        info!("Notification service shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.queue.lock().shut_down
    }
}

impl fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationService")
            .field("toasts", &self.len())
            .field("listeners", &self.listener_count())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl QueueState {
    /// Unlink a toast and cancel its timer. False if it was not live.
    fn take(&mut self, id: ToastId) -> bool {
        let Some(index) = self.toasts.iter().position(|toast| toast.id == id) else {
            return false;
        };
        self.toasts.remove(index);
        if let Some(timer) = self.timers.remove(&id) {
            timer.cancel();
        }
        true
    }
}

impl Inner {
    fn expire(&self, id: ToastId) {
        {
            let mut queue = self.queue.lock();
            // The handle belongs to the task running this callback
            queue.timers.remove(&id);
            if queue.shut_down {
                return;
            }
            let Some(index) = queue.toasts.iter().position(|toast| toast.id == id) else {
                return;
            };
            queue.toasts.remove(index);
        }
        debug!("Expired {}", id);
        self.notify();
    }

    fn notify(&self) {
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for (_, timer) in self.queue.get_mut().timers.drain() {
            timer.cancel();
        }
    }
}

/// Registration returned by `NotificationService::subscribe`.
///
/// Dropping it unsubscribes the listener. Call `detach` to keep the listener
/// registered for the lifetime of the service instead; a detached listener
/// that captures a service handle keeps that service alive until `shutdown`.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    inner: Weak<Inner>,
    id: u64,
    detached: bool,
}

impl Subscription {
    /// Safe to call any number of times.
    pub fn unsubscribe(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let removed = {
            let mut listeners = inner.listeners.lock();
            listeners
                .entries
                .iter()
                .position(|(id, _)| *id == self.id)
                .map(|index| listeners.entries.remove(index).1)
        };
        if removed.is_some() {
            debug!("Listener {} unsubscribed", self.id);
        }
        // The listener may hold the last handles to the service
        drop(removed);
    }

    /// Leave the listener registered after this handle is gone.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.detached {
            self.unsubscribe();
        }
    }
}
