//! Tests for the in-memory session registry

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use resource_governor::infra::{EmptyNotifier, SessionRegistry};

fn count_empties(registry: &SessionRegistry) -> Arc<AtomicUsize> {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    registry.on_empty(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    fired
}

#[test]
fn test_register_and_release() {
    let registry = SessionRegistry::new();
    assert!(registry.is_empty());

    let a = registry.register();
    let b = registry.register();
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);

    assert!(registry.release(&a));
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn test_every_cycle_fires_once() {
    let registry = SessionRegistry::new();
    let fired = count_empties(&registry);

    for cycle in 1..=3 {
        let id = registry.register();
        registry.release(&id);
        assert_eq!(fired.load(Ordering::SeqCst), cycle);
    }
}

#[test]
fn test_all_handlers_notified() {
    let registry = SessionRegistry::new();
    let first = count_empties(&registry);
    let second = count_empties(&registry);
    assert_eq!(registry.handler_count(), 2);

    let id = registry.register();
    registry.release(&id);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_release_fires_once() {
    let registry = Arc::new(SessionRegistry::new());
    let fired = count_empties(&registry);

    let ids: Vec<_> = (0..32).map(|_| registry.register()).collect();
    let handles: Vec<_> = ids
        .into_iter()
        .map(|id| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.release(&id))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert!(registry.is_empty());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_session_id_serializes_as_uuid_string() {
    let registry = SessionRegistry::new();
    let id = registry.register();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
}
