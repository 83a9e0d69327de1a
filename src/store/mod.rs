// ABOUTME: UI state store exposing notification operations to the rest of the application
// Delegates toasts to the queue service and owns the legacy status message slot

pub mod legacy;

pub use legacy::{LegacyMessage, LegacyMessageAdapter, MessageSlot};

use crate::config::NotificationConfig;
use crate::notify::{
    NotificationService, NotifyError, Scheduler, ShowOptions, Toast, ToastDuration, ToastId,
    ToastKind,
};
use tracing::{info, warn};

/// Toast operations a store may offer.
#[cfg_attr(test, mockall::automock)]
pub trait ToastCapability: Send + Sync {
    fn add_toast(&self, text: &str, kind: &str, duration: ToastDuration);
}

/// Legacy single-slot status message operations a store may offer.
#[cfg_attr(test, mockall::automock)]
pub trait MessageCapability: Send + Sync {
    /// Set the slot and schedule its own reset. `kind` is stored as given.
    fn set_message(&self, text: &str, kind: &str);
    fn clear_message(&self);
}

/// Capability lookup used by the legacy adapter. A store that lacks a
/// capability returns `None` and callers degrade instead of failing.
pub trait NotificationStore: Send + Sync {
    fn toasts(&self) -> Option<&dyn ToastCapability> {
        None
    }

    fn messages(&self) -> Option<&dyn MessageCapability> {
        None
    }
}

/// The one place application code goes to show or read notification state.
#[derive(Debug)]
pub struct UiStore {
    notifications: NotificationService,
    message: MessageSlot,
}

impl UiStore {
    pub fn new(config: NotificationConfig, scheduler: Scheduler) -> Self {
        let message = MessageSlot::new(scheduler.clone(), config.message_clear_delay());
        let notifications = NotificationService::new(config, scheduler);
        info!("UI store ready");
        Self {
            notifications,
            message,
        }
    }

    /// Direct queue access, meant for renderers subscribing to changes and tests.
    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.notifications.get_all()
    }

    pub fn message(&self) -> LegacyMessage {
        self.message.get()
    }

    /// Unknown kinds become `info`. A failure to enqueue is logged, never raised.
    pub fn add_toast(&self, text: &str, kind: &str, duration: ToastDuration) {
        let options = ShowOptions {
            duration: duration.into_option(),
            position: None,
        };
        if let Err(e) = self
            .notifications
            .show(text, ToastKind::from_name(kind), options)
        {
            warn!("Failed to show toast '{}': {}", text, e);
        }
    }

    pub fn remove_toast(&self, id: ToastId) -> Result<bool, NotifyError> {
        self.notifications.remove(id)
    }

    pub fn clear_all_toasts(&self) -> Result<(), NotifyError> {
        self.notifications.clear()
    }

    /// Set the legacy message and mirror it as a toast.
    pub fn show_message(&self, text: &str, kind: &str) {
        self.legacy_adapter().show_message(text, kind);
    }

    /// Reset the legacy message now. Toasts already queued stay.
    pub fn clear_message(&self) {
        self.legacy_adapter().clear_message();
    }

    fn legacy_adapter(&self) -> LegacyMessageAdapter<'_, Self> {
        let duration = ToastDuration::Millis(self.notifications.config().message_toast_duration_ms);
        LegacyMessageAdapter::new(self, duration)
    }

    pub fn shutdown(&self) {
        self.message.shutdown();
        self.notifications.shutdown();
    }
}

impl ToastCapability for UiStore {
    fn add_toast(&self, text: &str, kind: &str, duration: ToastDuration) {
        Self::add_toast(self, text, kind, duration);
    }
}

impl MessageCapability for UiStore {
    fn set_message(&self, text: &str, kind: &str) {
        self.message.set(text, kind);
    }

    fn clear_message(&self) {
        self.message.clear();
    }
}

impl NotificationStore for UiStore {
    fn toasts(&self) -> Option<&dyn ToastCapability> {
        Some(self)
    }

    fn messages(&self) -> Option<&dyn MessageCapability> {
        Some(self)
    }
}
