// ABOUTME: Compatibility layer for callers still using the single status message API
// Mirrors each status message into the toast queue and resets the slot after a delay

use crate::notify::{Scheduler, TimerHandle, ToastDuration};
use crate::store::NotificationStore;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, warn};

/// The current status message. Empty text and kind is the reset value.
///
/// `kind` is whatever the caller passed, unnormalised; only the mirrored toast
/// maps unknown kinds to `info`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyMessage {
    pub text: String,
    pub kind: String,
}

impl LegacyMessage {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.kind.is_empty()
    }

    /// Kind as older consumers read it, `""` when cleared.
    pub fn kind_label(&self) -> &str {
        &self.kind
    }
}

/// Self-clearing holder for the legacy message.
///
/// Every `set` schedules its own reset. A reset only applies if no newer
/// `set` or `clear` happened since it was scheduled.
#[derive(Debug)]
pub struct MessageSlot {
    scheduler: Scheduler,
    clear_delay: Duration,
    state: Arc<Mutex<SlotState>>,
}

#[derive(Debug, Default)]
struct SlotState {
    message: LegacyMessage,
    generation: u64,
    pending_clear: Option<TimerHandle>,
    shut_down: bool,
}

impl MessageSlot {
    pub fn new(scheduler: Scheduler, clear_delay: Duration) -> Self {
        Self {
            scheduler,
            clear_delay,
            state: Arc::new(Mutex::new(SlotState::default())),
        }
    }

    pub fn get(&self) -> LegacyMessage {
        self.state.lock().message.clone()
    }

    pub fn set(&self, text: &str, kind: &str) {
        let mut state = self.state.lock();
        if state.shut_down {
            return;
        }
        state.generation += 1;
        let generation = state.generation;
        state.message = LegacyMessage {
            text: text.to_string(),
            kind: kind.to_string(),
        };

        let weak: Weak<Mutex<SlotState>> = Arc::downgrade(&self.state);
        let timer = self.scheduler.schedule(self.clear_delay, move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.lock();
                if state.generation == generation {
                    state.message = LegacyMessage::default();
                    state.pending_clear = None;
                    debug!("Legacy message {} expired", generation);
                }
            }
        });
        if let Some(previous) = state.pending_clear.replace(timer) {
            previous.cancel();
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.message = LegacyMessage::default();
        if let Some(timer) = state.pending_clear.take() {
            timer.cancel();
        }
    }

    pub fn shutdown(&self) {
        self.clear();
        self.state.lock().shut_down = true;
    }
}

/// Routes a legacy `show_message` call to whatever the store supports.
///
/// Missing capabilities are logged and skipped.
pub struct LegacyMessageAdapter<'a, S: ?Sized> {
    store: &'a S,
    toast_duration: ToastDuration,
}

impl<'a, S: NotificationStore + ?Sized> LegacyMessageAdapter<'a, S> {
    pub fn new(store: &'a S, toast_duration: ToastDuration) -> Self {
        Self {
            store,
            toast_duration,
        }
    }

    pub fn show_message(&self, text: &str, kind: &str) {
        match self.store.messages() {
            Some(messages) => messages.set_message(text, kind),
            None => warn!("Store has no message capability, status '{}' not set", text),
        }
        match self.store.toasts() {
            Some(toasts) => toasts.add_toast(text, kind, self.toast_duration),
            None => warn!("Store has no toast capability, status '{}' not queued", text),
        }
    }

    pub fn clear_message(&self) {
        match self.store.messages() {
            Some(messages) => messages.clear_message(),
            None => warn!("Store has no message capability, nothing to clear"),
        }
    }
}
