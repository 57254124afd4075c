//! In-memory environment ports.
//!
//! Used as the headless environment and as test fakes. Every type is a shared
//! handle: clone one into an `Environment` and keep the other to inspect or
//! drive it.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::env::{ColorSchemeSource, DeviceCapabilities, DocumentRoot, PreferenceStorage};
use crate::error::StorageError;
use crate::observable::{Observable, Subscription};
use crate::quality::DeviceProfile;

// =============================================================================
// STORAGE
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    writes: Rc<Cell<usize>>,
    failing: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().extend(entries.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
        storage
    }

    /// Storage that rejects every call, like a disabled or full `localStorage`.
    #[must_use]
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    /// Inspect a key without going through the fallible port.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Successful `set` and `remove` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entry(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Write("quota exceeded".into()));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable);
        }
        self.entries.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    attributes: Rc<RefCell<BTreeMap<String, String>>>,
    classes: Rc<RefCell<BTreeSet<String>>>,
    mutations: Rc<Cell<usize>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-set an attribute, as a pre-hydration script would.
    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.attributes.borrow_mut().insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.classes.borrow_mut().insert(class.to_owned());
        self
    }

    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    /// Attribute writes and class changes so far.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn bump(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

impl DocumentRoot for MemoryDocument {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes.borrow_mut().insert(name.to_owned(), value.to_owned());
        self.bump();
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn add_class(&self, class: &str) {
        if self.classes.borrow_mut().insert(class.to_owned()) {
            self.bump();
        }
    }

    fn remove_class(&self, class: &str) {
        if self.classes.borrow_mut().remove(class) {
            self.bump();
        }
    }
}

// =============================================================================
// COLOR SCHEME
// =============================================================================

/// Color-scheme signal flipped by hand.
#[derive(Clone, Debug)]
pub struct ManualColorScheme {
    signal: Observable<Option<bool>>,
}

impl ManualColorScheme {
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        Self { signal: Observable::new(Some(prefers_dark)) }
    }

    /// A context with no color-scheme signal at all.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { signal: Observable::new(None) }
    }

    /// Change the reading and notify every active listener.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.signal.set(Some(prefers_dark));
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.signal.handler_count()
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.signal.get()
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool)>) -> Subscription {
        self.signal.subscribe(move |reading| {
            if let Some(prefers_dark) = *reading {
                listener(prefers_dark);
            }
        })
    }
}

// =============================================================================
// DEVICE
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct FixedDevice {
    profile: Rc<RefCell<Option<DeviceProfile>>>,
}

impl FixedDevice {
    #[must_use]
    pub fn new(profile: Option<DeviceProfile>) -> Self {
        Self { profile: Rc::new(RefCell::new(profile)) }
    }

    /// Replace the profile, e.g. to simulate a viewport resize.
    pub fn set_profile(&self, profile: Option<DeviceProfile>) {
        *self.profile.borrow_mut() = profile;
    }
}

impl DeviceCapabilities for FixedDevice {
    fn profile(&self) -> Option<DeviceProfile> {
        self.profile.borrow().clone()
    }
}
