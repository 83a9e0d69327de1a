// ABOUTME: Demo application structure and state management for the toast playground

pub mod events;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use state::{App, AppState};
