// ABOUTME: Library crate for Pointer Toasts exposing the notification pipeline and demo UI

pub mod app;
pub mod components;
pub mod config;
pub mod notify;
pub mod store;
pub mod throttle;
