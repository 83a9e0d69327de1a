// ABOUTME: Main layout component: status panel, bottom menu bar and overlays

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style},
};

use crate::app::AppState;
use super::{HelpComponent, ToastLayerComponent};

pub struct LayoutComponent {
    toast_layer: ToastLayerComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            toast_layer: ToastLayerComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),     // Main content
                Constraint::Length(3),  // Bottom menu bar
            ])
            .split(frame.size());

        self.render_status(frame, main_chunks[0], state);
        self.render_menu_bar(frame, main_chunks[1]);

        // Toasts float over the content area, never the menu bar
        self.toast_layer.render(frame, main_chunks[0], state);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let message = state.store.message();
        let status = if message.is_empty() {
            "-".to_string()
        } else {
            format!("[{}] {}", message.kind_label(), message.text)
        };
        let pointer = state
            .pointer_position
            .lock()
            .map_or_else(|| "-".to_string(), |(col, row)| format!("{}, {}", col, row));
        let size = state
            .terminal_size
            .lock()
            .map_or_else(|| "-".to_string(), |(w, h)| format!("{}x{}", w, h));
        let capacity = state.store.notifications().config().max_toasts;

        let lines = vec![
            Line::from(format!("Status:   {}", status)),
            Line::from(format!("Pointer:  {}", pointer)),
            Line::from(format!("Terminal: {}", size)),
            Line::from(format!("Toasts:   {} / {}", state.store.notifications().len(), capacity)),
        ];

        let panel = Paragraph::new(lines).block(
            Block::default()
                .title("Pointer Toasts")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(panel, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let menu_text = "[i]nfo [s]uccess [w]arning [e]rror [p]in [m]essage [x]dismiss [c]lear [?]help [q]uit";

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
