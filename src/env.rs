//! Ports to the ambient environment the store reads and writes.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser these are `localStorage`, the `<html>` element, the
//! `prefers-color-scheme` media query, and navigator/window readings (see
//! `browser`). Off the browser (SSR pre-pass, unit tests) the store runs on
//! the in-memory implementations from `memory`.

#[cfg(test)]
#[path = "env_test.rs"]
mod env_test;

use std::rc::Rc;

use crate::error::StorageError;
use crate::memory::{FixedDevice, ManualColorScheme, MemoryDocument, MemoryStorage};
use crate::observable::Subscription;
use crate::quality::DeviceProfile;

/// Durable string key-value storage. A missing key is distinct from `""`.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Attributes and classes on the document root element.
pub trait DocumentRoot {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    fn toggle_class(&self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// Live "prefers dark color scheme" signal.
pub trait ColorSchemeSource {
    /// Current reading, or `None` when no signal exists.
    fn prefers_dark(&self) -> Option<bool>;

    /// Deliver every future change to `listener` until the handle is cancelled.
    fn subscribe(&self, listener: Box<dyn Fn(bool)>) -> Subscription;
}

/// Point-in-time capability readings for auto quality.
pub trait DeviceCapabilities {
    /// `None` outside a browser-like context.
    fn profile(&self) -> Option<DeviceProfile>;
}

/// The set of ports a store is built on.
#[derive(Clone)]
pub struct Environment {
    pub storage: Rc<dyn PreferenceStorage>,
    pub document: Rc<dyn DocumentRoot>,
    pub color_scheme: Rc<dyn ColorSchemeSource>,
    pub device: Rc<dyn DeviceCapabilities>,
}

impl Environment {
    /// Non-browser context: ephemeral storage, detached document, no signals.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            storage: Rc::new(MemoryStorage::new()),
            document: Rc::new(MemoryDocument::new()),
            color_scheme: Rc::new(ManualColorScheme::unavailable()),
            device: Rc::new(FixedDevice::new(None)),
        }
    }

    /// Browser ports when running in a window, headless otherwise.
    #[must_use]
    pub fn detect() -> Self {
        #[cfg(feature = "hydrate")]
        {
            if let Some(env) = crate::browser::environment() {
                return env;
            }
            leptos::logging::warn!("ui-prefs: no browser window; using headless environment");
        }
        Self::headless()
    }

    /// Start from a headless environment and override individual ports.
    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder { env: Self::headless() }
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}

pub struct EnvironmentBuilder {
    env: Environment,
}

impl EnvironmentBuilder {
    #[must_use]
    pub fn storage(mut self, storage: impl PreferenceStorage + 'static) -> Self {
        self.env.storage = Rc::new(storage);
        self
    }

    #[must_use]
    pub fn document(mut self, document: impl DocumentRoot + 'static) -> Self {
        self.env.document = Rc::new(document);
        self
    }

    #[must_use]
    pub fn color_scheme(mut self, source: impl ColorSchemeSource + 'static) -> Self {
        self.env.color_scheme = Rc::new(source);
        self
    }

    #[must_use]
    pub fn device(mut self, device: impl DeviceCapabilities + 'static) -> Self {
        self.env.device = Rc::new(device);
        self
    }

    #[must_use]
    pub fn build(self) -> Environment {
        self.env
    }
}
