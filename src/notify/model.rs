// ABOUTME: Toast data model shared by the queue service, the store bridge and renderers
// Defines toast identity, kinds, screen anchors and per-call display options

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Opaque toast identifier. Fresh for every toast and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub const ALL: [ToastKind; 4] = [
        ToastKind::Info,
        ToastKind::Success,
        ToastKind::Warning,
        ToastKind::Error,
    ];

    /// Lenient lookup: anything unrecognised (including "") becomes `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => ToastKind::Success,
            "warning" => ToastKind::Warning,
            "error" => ToastKind::Error,
            _ => ToastKind::Info,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Screen corner a toast is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ToastPosition {
    pub const ALL: [ToastPosition; 4] = [
        ToastPosition::TopLeft,
        ToastPosition::TopRight,
        ToastPosition::BottomLeft,
        ToastPosition::BottomRight,
    ];

    pub fn is_top(&self) -> bool {
        matches!(self, ToastPosition::TopLeft | ToastPosition::TopRight)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, ToastPosition::TopLeft | ToastPosition::BottomLeft)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    /// `Duration::ZERO` means the toast stays until removed explicitly.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub position: ToastPosition,
    /// Monotonic creation order; drives FIFO eviction.
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_persistent(&self) -> bool {
        self.duration.is_zero()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Per-call overrides for `NotificationService::show`.
///
/// `duration: None` takes the configured default, `Some(Duration::ZERO)` persists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowOptions {
    pub duration: Option<Duration>,
    pub position: Option<ToastPosition>,
}

impl ShowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn persistent(mut self) -> Self {
        self.duration = Some(Duration::ZERO);
        self
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }
}

/// Duration as seen by store-level callers.
///
/// Zero milliseconds is not a persistence request; only `Persist` is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastDuration {
    #[default]
    Default,
    Persist,
    Millis(u64),
}

impl ToastDuration {
    pub(crate) fn into_option(self) -> Option<Duration> {
        match self {
            ToastDuration::Default | ToastDuration::Millis(0) => None,
            ToastDuration::Persist => Some(Duration::ZERO),
            ToastDuration::Millis(ms) => Some(Duration::from_millis(ms)),
        }
    }
}
