use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_get_set_delete() {
    let map: ConcurrentMap<String, u32> = ConcurrentMap::new();
    assert!(map.is_empty());
    assert_eq!(map.get("a"), None);

    map.set("a".to_owned(), 1);
    map.set("a".to_owned(), 2);
    assert_eq!(map.get("a"), Some(2));
    assert!(map.contains_key("a"));
    assert_eq!(map.len(), 1);

    assert_eq!(map.delete("a"), Some(2));
    assert_eq!(map.delete("a"), None);
    assert!(map.is_empty());
}

#[test]
fn test_set_if_absent_keeps_first_value() {
    let map: ConcurrentMap<&str, u32> = ConcurrentMap::new();
    assert_eq!(map.set_if_absent("k", || 7), (7, true));
    assert_eq!(
        map.set_if_absent("k", || panic!("supplier must not run")),
        (7, false)
    );
}

#[test]
fn test_set_if_absent_runs_supplier_once_under_contention() {
    const THREADS: usize = 8;
    let map: ConcurrentMap<&str, usize> = ConcurrentMap::new();
    let calls = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let results: Vec<(usize, bool)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let (map, calls, barrier) = (&map, &calls, &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    map.set_if_absent("shared", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        i
                    })
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| panic!("worker panicked")))
            .collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(results.iter().filter(|(_, inserted)| *inserted).count(), 1);
    let winner = results[0].0;
    assert!(results.iter().all(|(value, _)| *value == winner));
}
