use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================
// Debouncer
// =============================================================

#[test]
fn burst_collapses_into_single_trailing_call() {
    let mut d = Debouncer::new(100);
    d.call(0, "a");
    d.call(30, "b");
    d.call(60, "c");

    assert_eq!(d.pending_deadline(), Some(160));
    assert_eq!(d.take_due(159), None);
    assert_eq!(d.take_due(160), Some("c"));
    assert_eq!(d.take_due(500), None);
}

#[test]
fn no_leading_edge_invocation() {
    let mut d = Debouncer::new(100);
    d.call(0, 1);
    assert_eq!(d.take_due(0), None);
    assert!(d.is_pending());
}

#[test]
fn cancel_is_idempotent() {
    let mut d: Debouncer<u32> = Debouncer::new(100);
    d.cancel();
    d.call(0, 7);
    d.cancel();
    d.cancel();
    assert!(!d.is_pending());
    assert_eq!(d.take_due(1_000), None);
}

#[test]
fn separate_bursts_fire_separately() {
    let mut d = Debouncer::new(100);
    d.call(0, 1);
    assert_eq!(d.take_due(100), Some(1));
    d.call(250, 2);
    assert_eq!(d.take_due(300), None);
    assert_eq!(d.take_due(350), Some(2));
}

// =============================================================
// Debounced
// =============================================================

#[test]
fn debounced_runs_callback_once_with_latest_args() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut debounced = Debounced::new(100, move |v: u32| sink.borrow_mut().push(v));

    debounced.call(0, 10);
    debounced.call(30, 20);
    debounced.call(60, 30);

    let mut fired_at = Vec::new();
    for t in (0..=300).step_by(10) {
        if debounced.poll(t) {
            fired_at.push(t);
        }
    }

    assert_eq!(fired_at, vec![160]);
    assert_eq!(*seen.borrow(), vec![30]);
}

#[test]
fn debounced_cancel_suppresses_pending_call() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let mut debounced = Debounced::new(50, move |()| *sink.borrow_mut() += 1);

    debounced.call(0, ());
    debounced.cancel();
    assert_eq!(debounced.pending_deadline(), None);
    assert!(!debounced.poll(1_000));
    assert_eq!(*count.borrow(), 0);
}
