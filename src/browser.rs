//! web-sys bindings for the environment ports.
//!
//! Only compiled with the `hydrate` feature. Every call into the browser that
//! can throw is mapped to a `StorageError` or ignored, never unwrapped.
//!
//! TRADE-OFFS
//! ==========
//! DOM writes discard errors: a failed `setAttribute` on `<html>` cannot be
//! recovered from and must not break the preference flow.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MediaQueryList, MediaQueryListEvent, Storage, Window};

use crate::env::{ColorSchemeSource, DeviceCapabilities, DocumentRoot, Environment, PreferenceStorage};
use crate::error::StorageError;
use crate::memory::MemoryDocument;
use crate::observable::Subscription;
use crate::quality::DeviceProfile;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Browser ports for the current window, or `None` outside a window.
#[must_use]
pub fn environment() -> Option<Environment> {
    let window = web_sys::window()?;
    let document: Rc<dyn DocumentRoot> = match HtmlRoot::new(&window) {
        Some(root) => Rc::new(root),
        None => Rc::new(MemoryDocument::new()),
    };
    Some(Environment {
        storage: Rc::new(LocalStorage::new(&window)),
        document,
        color_scheme: Rc::new(MediaQueryScheme::new(&window)),
        device: Rc::new(NavigatorDevice { window }),
    })
}

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

// =============================================================================
// STORAGE
// =============================================================================

/// `window.localStorage`. Access itself may throw (privacy settings), in which
/// case every call reports `StorageError::Unavailable`.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        Self { storage: window.local_storage().ok().flatten() }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl PreferenceStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| StorageError::Read(js_error(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| StorageError::Write(js_error(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| StorageError::Write(js_error(&e)))
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// The `<html>` element.
pub struct HtmlRoot {
    element: Element,
}

impl HtmlRoot {
    #[must_use]
    pub fn new(window: &Window) -> Option<Self> {
        let element = window.document()?.document_element()?;
        Some(Self { element })
    }
}

impl DocumentRoot for HtmlRoot {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.element.set_attribute(name, value);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }
}

// =============================================================================
// COLOR SCHEME
// =============================================================================

type ChangeClosure = Closure<dyn FnMut(MediaQueryListEvent)>;

/// `matchMedia("(prefers-color-scheme: dark)")` with `change` listeners.
///
/// Registered closures are owned here until their subscription is cancelled,
/// so a dropped `Subscription` never leaves the browser calling a freed
/// closure.
pub struct MediaQueryScheme {
    query: Option<MediaQueryList>,
    listeners: Rc<RefCell<Vec<(u64, ChangeClosure)>>>,
    next_id: Cell<u64>,
}

impl MediaQueryScheme {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        Self {
            query: window.match_media(DARK_SCHEME_QUERY).ok().flatten(),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }
}

impl ColorSchemeSource for MediaQueryScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.query.as_ref().map(MediaQueryList::matches)
    }

    fn subscribe(&self, listener: Box<dyn Fn(bool)>) -> Subscription {
        let Some(query) = self.query.clone() else {
            return Subscription::inert();
        };

        let closure: ChangeClosure = Closure::new(move |event: MediaQueryListEvent| listener(event.matches()));
        if let Err(e) = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            leptos::logging::warn!("ui-prefs: color scheme listener not registered: {}", js_error(&e));
            return Subscription::inert();
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, closure));

        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            let Some(listeners) = listeners.upgrade() else {
                return;
            };
            let mut listeners = listeners.borrow_mut();
            if let Some(pos) = listeners.iter().position(|(listener_id, _)| *listener_id == id) {
                let (_, closure) = listeners.remove(pos);
                let _ = query.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            }
        })
    }
}

// =============================================================================
// DEVICE
// =============================================================================

/// Reads `navigator.userAgent`, `navigator.hardwareConcurrency`, and
/// `window.innerWidth` on every call.
pub struct NavigatorDevice {
    window: Window,
}

impl DeviceCapabilities for NavigatorDevice {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn profile(&self) -> Option<DeviceProfile> {
        let navigator = self.window.navigator();
        let user_agent = navigator.user_agent().ok()?;
        let viewport_width = self.window.inner_width().ok()?.as_f64()?;
        let cores = navigator.hardware_concurrency();
        let logical_cores = if cores.is_finite() && cores > 0.0 { cores as u32 } else { 0 };
        Some(DeviceProfile { user_agent, logical_cores, viewport_width })
    }
}
