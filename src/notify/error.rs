// ABOUTME: Error types for the notification pipeline
// Only contract violations surface as errors; bad input falls back to defaults

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("No tokio runtime available to schedule timers")]
    NoRuntime,

    #[error("Notification service has been shut down")]
    ShutDown,
}
