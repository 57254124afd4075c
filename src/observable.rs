//! Single-threaded observable cells with explicit change handlers.
//!
//! DESIGN
//! ======
//! The store wires its side effects (DOM reflection, persistence) as plain
//! handlers on these cells at construction time, instead of relying on an
//! implicit reactive runtime. UI frameworks can mirror a cell into their own
//! signal type by subscribing.
//!
//! Handlers are invoked after the new value is stored and without any borrow
//! held, so a handler may read the cell, subscribe, or cancel re-entrantly.

#[cfg(test)]
#[path = "observable_test.rs"]
mod observable_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Handler<T> = Rc<dyn Fn(&T)>;

/// Cancellable registration handle.
///
/// Dropping an active subscription leaves it registered unless it was created
/// with [`Subscription::cancel_on_drop`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
    cancel_on_drop: bool,
}

impl Subscription {
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)), cancel_on_drop: false }
    }

    /// A handle with nothing to cancel, for sources that never notify.
    #[must_use]
    pub fn inert() -> Self {
        Self { cancel: None, cancel_on_drop: false }
    }

    /// Tie the registration to this handle's lifetime.
    #[must_use]
    pub fn cancel_on_drop(mut self) -> Self {
        self.cancel_on_drop = true;
        self
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Unregister. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.cancel_on_drop {
            self.cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .field("cancel_on_drop", &self.cancel_on_drop)
            .finish()
    }
}

struct Slot<T> {
    value: RefCell<T>,
    handlers: RefCell<Vec<(u64, Handler<T>)>>,
    next_id: Cell<u64>,
}

/// Shared handle to a value plus its change handlers. Clones share state.
pub struct Observable<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.slot.value.borrow())
            .field("handlers", &self.slot.handlers.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(Slot { value: RefCell::new(value), handlers: RefCell::new(Vec::new()), next_id: Cell::new(0) }),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.slot.value.borrow().clone()
    }

    /// Store `value` and notify every handler, even if the value is unchanged.
    pub fn set(&self, value: T) {
        *self.slot.value.borrow_mut() = value.clone();
        self.notify(&value);
    }

    /// Register `handler` for every subsequent `set`.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let id = self.slot.next_id.get();
        self.slot.next_id.set(id + 1);
        self.slot.handlers.borrow_mut().push((id, Rc::new(handler)));

        let slot = Rc::downgrade(&self.slot);
        Subscription::new(move || {
            if let Some(slot) = slot.upgrade() {
                slot.handlers.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.slot.handlers.borrow().len()
    }

    fn notify(&self, value: &T) {
        let handlers: Vec<Handler<T>> = self.slot.handlers.borrow().iter().map(|(_, h)| Rc::clone(h)).collect();
        for handler in handlers {
            handler(value);
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Store and notify only when `value` differs. Returns whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.slot.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}
