use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================
// Observable
// =============================================================

#[test]
fn set_stores_value_and_notifies() {
    let cell = Observable::new(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

    cell.set(2);
    cell.set(2);

    assert_eq!(cell.get(), 2);
    assert_eq!(*seen.borrow(), vec![2, 2]);
}

#[test]
fn set_if_changed_skips_equal_values() {
    let cell = Observable::new("a".to_owned());
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let _sub = cell.subscribe(move |_| *counter.borrow_mut() += 1);

    assert!(!cell.set_if_changed("a".to_owned()));
    assert!(cell.set_if_changed("b".to_owned()));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn handler_sees_new_value_when_reading_cell() {
    let cell = Observable::new(0);
    let reader = cell.clone();
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let _sub = cell.subscribe(move |_| *sink.borrow_mut() = Some(reader.get()));

    cell.set(7);
    assert_eq!(*seen.borrow(), Some(7));
}

#[test]
fn clones_share_state() {
    let a = Observable::new(false);
    let b = a.clone();
    b.set(true);
    assert!(a.get());
}

// =============================================================
// Subscription
// =============================================================

#[test]
fn cancel_stops_notifications_and_is_idempotent() {
    let cell = Observable::new(0);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut sub = cell.subscribe(move |_| *counter.borrow_mut() += 1);

    cell.set(1);
    sub.cancel();
    sub.cancel();
    cell.set(2);

    assert!(!sub.is_active());
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(cell.handler_count(), 0);
}

#[test]
fn dropping_plain_subscription_keeps_handler() {
    let cell = Observable::new(0);
    drop(cell.subscribe(|_| {}));
    assert_eq!(cell.handler_count(), 1);
}

#[test]
fn cancel_on_drop_unregisters() {
    let cell = Observable::new(0);
    {
        let _sub = cell.subscribe(|_| {}).cancel_on_drop();
        assert_eq!(cell.handler_count(), 1);
    }
    assert_eq!(cell.handler_count(), 0);
}

#[test]
fn cancel_after_cell_dropped_is_harmless() {
    let cell = Observable::new(0);
    let mut sub = cell.subscribe(|_| {});
    drop(cell);
    sub.cancel();
    assert!(!sub.is_active());
}

#[test]
fn handler_may_cancel_itself_during_notify() {
    let cell = Observable::new(0);
    let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let inner = Rc::clone(&holder);
    let sub = cell.subscribe(move |_| {
        if let Some(mut sub) = inner.borrow_mut().take() {
            sub.cancel();
        }
    });
    *holder.borrow_mut() = Some(sub);

    cell.set(1);
    assert_eq!(cell.handler_count(), 0);
}

#[test]
fn inert_subscription_is_inactive() {
    let mut sub = Subscription::inert();
    assert!(!sub.is_active());
    sub.cancel();
}
