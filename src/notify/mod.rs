// ABOUTME: Notification delivery subsystem: toast queue, timers and layout helpers
// The queue service is the single source of truth for live toasts

pub mod error;
pub mod layout;
pub mod model;
pub mod scheduler;
pub mod service;

pub use error::NotifyError;
pub use model::{ShowOptions, Toast, ToastDuration, ToastId, ToastKind, ToastPosition};
pub use scheduler::{Scheduler, TimerHandle};
pub use service::{Listener, NotificationService, Subscription};
