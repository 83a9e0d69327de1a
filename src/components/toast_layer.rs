// ABOUTME: Overlay component painting live toasts stacked at their screen corners
// Reads queue snapshots and respects the per-anchor visible limit and entrance stagger

use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::notify::layout::{stagger_delay, visible_at};
use crate::notify::{Toast, ToastKind, ToastPosition};
use std::time::Duration;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

pub struct ToastLayerComponent;

impl ToastLayerComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let snapshot = state.store.toasts();
        let config = state.store.notifications().config();
        let now = Utc::now();

        for position in ToastPosition::ALL {
            let visible = visible_at(&snapshot, position, config.max_visible);
            let rects = stack_rects(area, position, visible.len());
            // Not enough room: drop the oldest
            let skip = visible.len().saturating_sub(rects.len());

            for (index, (toast, rect)) in visible.into_iter().skip(skip).zip(rects).enumerate() {
                if !has_entered(toast, index, config.stagger_delay(), now) {
                    continue;
                }
                self.render_toast(frame, rect, toast);
            }
        }
    }

    fn render_toast(&self, frame: &mut Frame, rect: Rect, toast: &Toast) {
        let color = kind_color(toast.kind);
        let title = if toast.is_persistent() {
            format!(" {} (pinned) ", toast.kind)
        } else {
            format!(" {} ", toast.kind)
        };

        let body = Paragraph::new(toast.text.as_str())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}

impl Default for ToastLayerComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Slots for `count` toasts anchored at `position`, oldest first.
///
/// Top anchors grow downwards, bottom anchors grow upwards so the newest toast
/// sits against the screen edge. Returns fewer slots when the area is too short.
pub fn stack_rects(area: Rect, position: ToastPosition, count: usize) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let fits = usize::from(area.height / TOAST_HEIGHT);
    let count = u16::try_from(count.min(fits)).unwrap_or(0);
    let x = if position.is_left() {
        area.x
    } else {
        area.x + area.width - width
    };

    (0..count)
        .map(|i| {
            let y = if position.is_top() {
                area.y + i * TOAST_HEIGHT
            } else {
                area.y + area.height - (count - i) * TOAST_HEIGHT
            };
            Rect::new(x, y, width, TOAST_HEIGHT)
        })
        .collect()
}

fn has_entered(toast: &Toast, index: usize, step: Duration, now: DateTime<Utc>) -> bool {
    let delay = chrono::Duration::from_std(stagger_delay(index, step))
        .unwrap_or_else(|_| chrono::Duration::zero());
    now.signed_duration_since(toast.created_at) >= delay
}

fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Info => Color::Cyan,
        ToastKind::Success => Color::Green,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Error => Color::Red,
    }
}
