// ABOUTME: Demo application state wiring the UI store, queue subscription and throttles
// Holds everything the render loop reads and the key handler mutates

use crate::config::NotificationConfig;
use crate::notify::{NotifyError, Scheduler, Subscription, ToastDuration, ToastKind};
use crate::store::UiStore;
use crate::throttle::Throttle;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const RESIZE_THROTTLE: Duration = Duration::from_millis(500);
const POINTER_THROTTLE: Duration = Duration::from_millis(50);

pub struct AppState {
    pub store: Arc<UiStore>,
    pub should_quit: bool,
    pub help_visible: bool,
    /// Set by the queue subscription and throttled input handlers
    needs_redraw: Arc<AtomicBool>,
    pub terminal_size: Arc<Mutex<Option<(u16, u16)>>>,
    pub pointer_position: Arc<Mutex<Option<(u16, u16)>>>,
    shown_count: usize,
    subscription: Subscription,
}

impl AppState {
    pub fn new(store: Arc<UiStore>) -> Self {
        let needs_redraw = Arc::new(AtomicBool::new(true));
        let flag = needs_redraw.clone();
        let subscription = store.notifications().subscribe(move || {
            flag.store(true, Ordering::SeqCst);
        });

        Self {
            store,
            should_quit: false,
            help_visible: false,
            needs_redraw,
            terminal_size: Arc::new(Mutex::new(None)),
            pointer_position: Arc::new(Mutex::new(None)),
            shown_count: 0,
            subscription,
        }
    }

    pub fn show_toast(&mut self, kind: ToastKind) {
        self.shown_count += 1;
        let text = format!("{} notification #{}", capitalize(kind.label()), self.shown_count);
        self.store.add_toast(&text, kind.label(), ToastDuration::Default);
    }

    pub fn show_persistent_toast(&mut self) {
        self.shown_count += 1;
        let text = format!("Pinned notification #{} (x to dismiss)", self.shown_count);
        self.store.add_toast(&text, "info", ToastDuration::Persist);
    }

    pub fn show_status_message(&mut self) {
        self.shown_count += 1;
        let text = format!("Cursor theme applied ({})", self.shown_count);
        self.store.show_message(&text, "success");
        self.mark_dirty();
    }

    pub fn remove_oldest_toast(&self) -> Result<bool, NotifyError> {
        match self.store.toasts().first() {
            Some(toast) => self.store.remove_toast(toast.id),
            None => Ok(false),
        }
    }

    pub fn clear_toasts(&self) -> Result<(), NotifyError> {
        self.store.clear_all_toasts()
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
        self.mark_dirty();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mark_dirty(&self) {
        self.needs_redraw.store(true, Ordering::SeqCst);
    }

    /// True once per batch of changes since the last call.
    pub fn take_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::SeqCst)
    }

    pub(crate) fn redraw_flag(&self) -> Arc<AtomicBool> {
        self.needs_redraw.clone()
    }

    pub fn shutdown(&self) {
        self.subscription.unsubscribe();
        self.store.shutdown();
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct App {
    pub state: AppState,
    resize: Throttle<(u16, u16)>,
    pointer: Throttle<(u16, u16)>,
}

impl App {
    pub fn new(config: NotificationConfig, scheduler: Scheduler) -> Self {
        let store = Arc::new(UiStore::new(config, scheduler.clone()));
        let state = AppState::new(store.clone());

        let size = state.terminal_size.clone();
        let redraw = state.redraw_flag();
        let resize_store = store;
        let resize = Throttle::new(scheduler.clone(), RESIZE_THROTTLE, move |(width, height): (u16, u16)| {
            let previous = size.lock().replace((width, height));
            if previous.is_some() {
                resize_store.add_toast(
                    &format!("Resized to {}x{}", width, height),
                    "info",
                    ToastDuration::Millis(1500),
                );
            }
            redraw.store(true, Ordering::SeqCst);
        });

        let position = state.pointer_position.clone();
        let redraw = state.redraw_flag();
        let pointer = Throttle::new(scheduler, POINTER_THROTTLE, move |(column, row): (u16, u16)| {
            *position.lock() = Some((column, row));
            redraw.store(true, Ordering::SeqCst);
        });

        Self {
            state,
            resize,
            pointer,
        }
    }

    pub fn on_resize(&self, width: u16, height: u16) {
        self.resize.call((width, height));
    }

    pub fn on_pointer_moved(&self, column: u16, row: u16) {
        self.pointer.call((column, row));
    }

    pub fn needs_ui_refresh(&self) -> bool {
        self.state.take_redraw()
    }

    pub fn shutdown(&self) {
        info!("Shutting down demo application");
        self.resize.shutdown();
        self.pointer.shutdown();
        self.state.shutdown();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if !self.state.store.notifications().is_shut_down() {
            warn!("App dropped without shutdown, tearing down now");
            self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    fn create_test_app() -> App {
        App::new(NotificationConfig::default(), Scheduler::current().unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscription_marks_redraw() {
        let mut app = create_test_app();
        assert!(app.needs_ui_refresh());
        assert!(!app.needs_ui_refresh());

        app.state.show_toast(ToastKind::Warning);
        assert!(app.needs_ui_refresh());
        assert_eq!(app.state.store.toasts()[0].text, "Warning notification #1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_moves_are_throttled() {
        let app = create_test_app();

        app.on_pointer_moved(1, 1);
        app.on_pointer_moved(2, 2);
        app.on_pointer_moved(3, 3);
        assert_eq!(*app.state.pointer_position.lock(), Some((1, 1)));

        sleep(Duration::from_millis(60)).await;
        assert_eq!(*app.state.pointer_position.lock(), Some((3, 3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_resize_is_silent_later_ones_toast() {
        let app = create_test_app();

        app.on_resize(80, 24);
        assert!(app.state.store.toasts().is_empty());

        sleep(Duration::from_millis(600)).await;
        app.on_resize(100, 30);
        let toasts = app.state.store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].text, "Resized to 100x30");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_oldest_on_empty_queue() {
        let app = create_test_app();
        assert_eq!(app.state.remove_oldest_toast(), Ok(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_everything() {
        let mut app = create_test_app();
        app.state.show_persistent_toast();
        app.shutdown();

        assert!(app.state.store.toasts().is_empty());
        assert_eq!(app.state.store.notifications().listener_count(), 0);
        app.on_pointer_moved(5, 5);
        assert_eq!(*app.state.pointer_position.lock(), None);
    }
}
