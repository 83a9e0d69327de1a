// ABOUTME: Integration tests for the notification queue service
// Covers capacity eviction, timed expiry, removal, clearing and subscriber counts

use pointer_toasts::config::NotificationConfig;
use pointer_toasts::notify::{
    NotificationService, Scheduler, ShowOptions, Subscription, ToastKind, ToastPosition,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn create_service(max_toasts: usize) -> NotificationService {
    let config = NotificationConfig {
        max_toasts,
        ..NotificationConfig::default()
    };
    NotificationService::new(config, Scheduler::current().unwrap())
}

/// Hold the returned subscription for as long as counting should continue.
fn count_notifications(service: &NotificationService) -> (Arc<AtomicUsize>, Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let subscription = service.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (count, subscription)
}

#[tokio::test(start_paused = true)]
async fn test_show_with_defaults() {
    let service = create_service(5);

    let id = service.show("Hello", ToastKind::default(), ShowOptions::new()).unwrap();

    let toasts = service.get_all();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].id, id);
    assert_eq!(toasts[0].text, "Hello");
    assert_eq!(toasts[0].kind, ToastKind::Info);
    assert_eq!(toasts[0].duration, Duration::from_millis(3000));
    assert_eq!(toasts[0].position, ToastPosition::TopRight);
    assert!(!id.to_string().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_options_override_duration_and_position() {
    let service = create_service(5);

    service
        .show(
            "Custom",
            ToastKind::Error,
            ShowOptions::new()
                .duration(Duration::from_millis(750))
                .position(ToastPosition::BottomLeft),
        )
        .unwrap();

    let toast = &service.get_all()[0];
    assert_eq!(toast.duration, Duration::from_millis(750));
    assert_eq!(toast.position, ToastPosition::BottomLeft);
}

#[tokio::test(start_paused = true)]
async fn test_capacity_keeps_most_recent() {
    let service = create_service(5);

    for n in 1..=7 {
        service
            .show(format!("toast {}", n), ToastKind::Info, ShowOptions::new())
            .unwrap();
        assert!(service.len() <= 5);
    }

    let texts: Vec<String> = service.get_all().into_iter().map(|t| t.text).collect();
    assert_eq!(
        texts,
        vec!["toast 3", "toast 4", "toast 5", "toast 6", "toast 7"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
}

#[tokio::test(start_paused = true)]
async fn test_toast_expires_after_duration() {
    let service = create_service(5);
    let id = service
        .show("short", ToastKind::Info, ShowOptions::new().duration(Duration::from_millis(1000)))
        .unwrap();

    sleep(Duration::from_millis(990)).await;
    assert!(service.get(id).is_some());

    sleep(Duration::from_millis(20)).await;
    assert!(service.get(id).is_none());
    assert!(service.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_persistent_toast_survives() {
    let service = create_service(5);
    let id = service
        .show("sticky", ToastKind::Warning, ShowOptions::new().persistent())
        .unwrap();

    sleep(Duration::from_secs(600)).await;
    assert!(service.get(id).is_some());

    assert!(service.remove(id).unwrap());
    assert!(service.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remove_twice() {
    let service = create_service(5);
    let id = service.show("once", ToastKind::Info, ShowOptions::new()).unwrap();

    assert!(service.remove(id).unwrap());
    assert!(!service.remove(id).unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_clear_cancels_pending_timers() {
    let service = create_service(5);
    for n in 0..3 {
        service
            .show(format!("n{}", n), ToastKind::Info, ShowOptions::new().duration(Duration::from_millis(100)))
            .unwrap();
    }
    let (count, _subscription) = count_notifications(&service);

    service.clear().unwrap();
    assert!(service.get_all().is_empty());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // None of the cleared toasts' timers may fire a notification
    sleep(Duration::from_millis(500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_clear_on_empty_still_notifies() {
    let service = create_service(5);
    let (count, _subscription) = count_notifications(&service);

    service.clear().unwrap();
    service.clear().unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_listener_counts_committed_mutations_only() {
    let service = create_service(5);
    let (count, _subscription) = count_notifications(&service);

    let id = service
        .show("a", ToastKind::Info, ShowOptions::new().duration(Duration::from_millis(100)))
        .unwrap();
    let other = service.show("b", ToastKind::Info, ShowOptions::new()).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);

    // expiry is a mutation too
    sleep(Duration::from_millis(150)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);

    // already gone
    assert!(!service.remove(id).unwrap());
    assert_eq!(count.load(Ordering::SeqCst), 3);

    assert!(service.remove(other).unwrap());
    assert_eq!(count.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_is_idempotent() {
    let service = create_service(5);
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let subscription = service.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    service.show("seen", ToastKind::Info, ShowOptions::new()).unwrap();
    subscription.unsubscribe();
    subscription.unsubscribe();
    service.show("unseen", ToastKind::Info, ShowOptions::new()).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(service.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_subscription_stops_notifications() {
    let service = create_service(5);
    let (count, subscription) = count_notifications(&service);

    service.show("seen", ToastKind::Info, ShowOptions::new()).unwrap();
    drop(subscription);
    service.show("unseen", ToastKind::Info, ShowOptions::new()).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(service.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_is_detached_from_queue() {
    let service = create_service(5);
    service.show("original", ToastKind::Info, ShowOptions::new()).unwrap();

    let mut snapshot = service.get_all();
    snapshot[0].text = "tampered".to_string();
    snapshot.clear();

    assert_eq!(service.get_all()[0].text, "original");
}

#[tokio::test(start_paused = true)]
async fn test_ids_are_never_reused() {
    let service = create_service(2);
    let mut seen = std::collections::HashSet::new();

    for _ in 0..50 {
        let id = service.show("x", ToastKind::Info, ShowOptions::new()).unwrap();
        assert!(seen.insert(id));
    }
}
