// ABOUTME: Helpers for renderers consuming queue snapshots
// Selects which toasts show at a screen anchor and how their entrances are staggered

use crate::notify::{Toast, ToastPosition};
use std::time::Duration;

/// Toasts anchored at `position`, capped at `max_visible`.
///
/// When more are anchored there than fit, the most recent ones win. The
/// result keeps snapshot order (oldest first).
pub fn visible_at(snapshot: &[Toast], position: ToastPosition, max_visible: usize) -> Vec<&Toast> {
    let anchored: Vec<&Toast> = snapshot
        .iter()
        .filter(|toast| toast.position == position)
        .collect();
    let skip = anchored.len().saturating_sub(max_visible);
    anchored.into_iter().skip(skip).collect()
}

/// Entrance delay for the toast at `index` within its stack.
pub fn stagger_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}
