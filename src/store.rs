//! The preference store: one instance per page, owned by the app root.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds theme, background, and quality selections. Each raw selection lives
//! in an `Observable`; handlers registered at construction reflect every
//! change onto the document root and persist it to storage. The theme also
//! follows the OS color-scheme signal while the selection is `system`.
//!
//! DESIGN
//! ======
//! Initial values come from, in order: what a pre-hydration script already put
//! on the document root, durable storage, then the field default. A value
//! taken from the document is written back to storage once so the two agree;
//! a default is never written.
//!
//! Persistence: a sentinel selection (`system`, `auto`) removes the storage
//! key so a later session follows the live signal again; any other value is
//! written verbatim. The background field has no sentinel.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures are logged and discarded. The in-memory selection and the
//! DOM reflection are already updated by then and stay authoritative.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use crate::config::StoreConfig;
use crate::env::{DocumentRoot, Environment, PreferenceStorage};
use crate::error::PreferenceError;
use crate::observable::{Observable, Subscription};
use crate::prefs::{Background, ColorScheme, Field, Quality, QualityTier, Theme};
use crate::quality::auto_tier;

/// Where a field's initial value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Document,
    Storage,
    Default,
}

struct StoreInner {
    config: StoreConfig,
    env: Environment,

    theme: Observable<Theme>,
    background: Observable<Background>,
    quality: Observable<Quality>,
    system: Observable<ColorScheme>,

    resolved_theme: Observable<ColorScheme>,
    resolved_background: Observable<Background>,
    resolved_quality: Observable<QualityTier>,

    os_subscription: RefCell<Subscription>,
}

/// Cheap-clone handle; clones share one store.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Rc<StoreInner>,
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("theme", &self.theme())
            .field("system", &self.system_scheme())
            .field("background", &self.background())
            .field("quality", &self.quality())
            .finish_non_exhaustive()
    }
}

impl PreferenceStore {
    /// Read initial state, reconcile storage and DOM, subscribe to the OS.
    ///
    /// An inconsistent `config` is logged and replaced by the default one.
    #[must_use]
    pub fn new(env: Environment, config: StoreConfig) -> Self {
        match config.validate() {
            Ok(()) => Self::build(env, config),
            Err(e) => {
                leptos::logging::warn!("ui-prefs: {e}; using default config");
                Self::build(env, StoreConfig::default())
            }
        }
    }

    /// Like [`PreferenceStore::new`], but rejects an inconsistent `config`.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::Config` when `config` fails validation.
    pub fn try_new(env: Environment, config: StoreConfig) -> Result<Self, PreferenceError> {
        config.validate()?;
        Ok(Self::build(env, config))
    }

    fn build(env: Environment, config: StoreConfig) -> Self {
        let (theme, theme_origin) = initial_theme(&env, &config);
        let (background, background_origin) = initial_background(&env, &config);
        let (quality, quality_origin) = initial_quality(&env, &config);
        let system = initial_system(&env, &config);
        let tier = quality.resolve(auto_tier(env.device.profile().as_ref(), &config));

        let inner = Rc::new(StoreInner {
            theme: Observable::new(theme),
            background: Observable::new(background),
            quality: Observable::new(quality),
            system: Observable::new(system),
            resolved_theme: Observable::new(theme.resolve(system)),
            resolved_background: Observable::new(background),
            resolved_quality: Observable::new(tier),
            os_subscription: RefCell::new(Subscription::inert()),
            config,
            env,
        });

        inner.reconcile(theme_origin, background_origin, quality_origin);
        wire(&inner);

        let weak = Rc::downgrade(&inner);
        let subscription = inner.env.color_scheme.subscribe(Box::new(move |prefers_dark| {
            if let Some(inner) = weak.upgrade() {
                inner.system.set(ColorScheme::from_prefers_dark(prefers_dark));
            }
        }));
        *inner.os_subscription.borrow_mut() = subscription;

        Self { inner }
    }

    /// Store on the detected environment with the default config.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(Environment::detect(), StoreConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    /// Raw selection, possibly `System`.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.inner.theme.get()
    }

    #[must_use]
    pub fn resolved_theme(&self) -> ColorScheme {
        self.theme().resolve(self.system_scheme())
    }

    /// Last OS reading, tracked even while an explicit theme is selected.
    #[must_use]
    pub fn system_scheme(&self) -> ColorScheme {
        self.inner.system.get()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.inner.theme.set(theme);
    }

    /// Switch to the explicit opposite of what is shown. Returns the new scheme.
    pub fn toggle_theme(&self) -> ColorScheme {
        self.set_theme(self.theme().toggled(self.system_scheme()));
        self.resolved_theme()
    }

    // -------------------------------------------------------------------------
    // Background
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn background(&self) -> Background {
        self.inner.background.get()
    }

    pub fn set_background(&self, background: Background) {
        self.inner.background.set(background);
    }

    pub fn toggle_background(&self) -> Background {
        let next = self.background().toggled();
        self.set_background(next);
        next
    }

    // -------------------------------------------------------------------------
    // Quality
    // -------------------------------------------------------------------------

    /// Raw selection, possibly `Auto`.
    #[must_use]
    pub fn quality(&self) -> Quality {
        self.inner.quality.get()
    }

    /// Concrete tier; in auto mode the device is read at call time.
    #[must_use]
    pub fn resolved_quality(&self) -> QualityTier {
        self.inner.current_tier()
    }

    pub fn set_quality(&self, quality: Quality) {
        self.inner.quality.set(quality);
    }

    /// Re-read device capabilities and notify quality observers if the tier moved.
    pub fn refresh_quality(&self) -> QualityTier {
        let tier = self.inner.current_tier();
        self.inner.resolved_quality.set_if_changed(tier);
        tier
    }

    // -------------------------------------------------------------------------
    // String-keyed access
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn raw(&self, field: Field) -> &'static str {
        match field {
            Field::Theme => self.theme().as_str(),
            Field::Background => self.background().as_str(),
            Field::Quality => self.quality().as_str(),
        }
    }

    #[must_use]
    pub fn resolved(&self, field: Field) -> &'static str {
        match field {
            Field::Theme => self.resolved_theme().as_str(),
            Field::Background => self.background().as_str(),
            Field::Quality => self.resolved_quality().as_str(),
        }
    }

    /// Set `field` from text. Values outside the domain leave state untouched.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::InvalidValue` when `value` is not in the
    /// field's domain.
    pub fn set(&self, field: Field, value: &str) -> Result<(), PreferenceError> {
        match field {
            Field::Theme => self.set_theme(value.parse()?),
            Field::Background => self.set_background(value.parse()?),
            Field::Quality => self.set_quality(value.parse()?),
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Fires when the rendered scheme changes, from a mutation or the OS.
    pub fn on_theme_change(&self, handler: impl Fn(ColorScheme) + 'static) -> Subscription {
        self.inner.resolved_theme.subscribe(move |scheme| handler(*scheme))
    }

    /// Fires on every raw theme mutation, including sentinel selections.
    pub fn on_theme_selected(&self, handler: impl Fn(Theme) + 'static) -> Subscription {
        self.inner.theme.subscribe(move |theme| handler(*theme))
    }

    pub fn on_background_change(&self, handler: impl Fn(Background) + 'static) -> Subscription {
        self.inner.resolved_background.subscribe(move |bg| handler(*bg))
    }

    pub fn on_quality_change(&self, handler: impl Fn(QualityTier) + 'static) -> Subscription {
        self.inner.resolved_quality.subscribe(move |tier| handler(*tier))
    }

    /// Stop following the OS signal. Idempotent.
    pub fn teardown(&self) {
        self.inner.os_subscription.borrow_mut().cancel();
    }

    #[must_use]
    pub fn is_following_os(&self) -> bool {
        self.inner.os_subscription.borrow().is_active()
    }

    /// Handlers registered on the observed cells, internal wiring included.
    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        let inner = &self.inner;
        inner.theme.handler_count()
            + inner.resolved_theme.handler_count()
            + inner.resolved_background.handler_count()
            + inner.resolved_quality.handler_count()
    }
}

// =============================================================================
// WIRING
// =============================================================================

/// Register the reflect-and-persist handlers on the raw cells.
///
/// The returned subscriptions are dropped on purpose: plain subscriptions stay
/// registered, and the cells die with the store.
fn wire(inner: &Rc<StoreInner>) {
    let weak = Rc::downgrade(inner);
    drop(inner.theme.subscribe(on_weak(&weak, |inner, _: &Theme| {
        inner.reflect_theme();
        inner.persist_theme();
        inner.resolved_theme.set_if_changed(inner.current_scheme());
    })));
    drop(inner.system.subscribe(on_weak(&weak, |inner, _: &ColorScheme| {
        if inner.theme.get().is_sentinel() {
            inner.reflect_theme();
            inner.resolved_theme.set_if_changed(inner.current_scheme());
        }
    })));
    drop(inner.background.subscribe(on_weak(&weak, |inner, bg: &Background| {
        inner.reflect_background();
        inner.persist_background();
        inner.resolved_background.set_if_changed(*bg);
    })));
    drop(inner.quality.subscribe(on_weak(&weak, |inner, _: &Quality| {
        inner.reflect_quality();
        inner.persist_quality();
        inner.resolved_quality.set_if_changed(inner.current_tier());
    })));
}

/// Adapt a handler so it holds the store weakly; the cells live inside it.
fn on_weak<T: 'static>(weak: &Weak<StoreInner>, f: impl Fn(&StoreInner, &T) + 'static) -> impl Fn(&T) + 'static {
    let weak = weak.clone();
    move |value: &T| {
        if let Some(inner) = weak.upgrade() {
            f(&inner, value);
        }
    }
}

impl StoreInner {
    fn current_scheme(&self) -> ColorScheme {
        self.theme.get().resolve(self.system.get())
    }

    fn current_tier(&self) -> QualityTier {
        self.quality.get().resolve(auto_tier(self.env.device.profile().as_ref(), &self.config))
    }

    fn reconcile(&self, theme: Origin, background: Origin, quality: Origin) {
        self.reflect_theme();
        self.reflect_background();
        self.reflect_quality();

        if theme == Origin::Document {
            self.persist_if_stale(&self.config.theme_key, stored_theme(self.theme.get()));
        }
        if background == Origin::Document {
            self.persist_if_stale(&self.config.background_key, Some(self.background.get().as_str()));
        }
        if quality == Origin::Document {
            self.persist_if_stale(&self.config.quality_key, stored_quality(self.quality.get()));
        }
    }

    // -------------------------------------------------------------------------
    // DOM reflection
    // -------------------------------------------------------------------------

    fn reflect_theme(&self) {
        let doc = self.env.document.as_ref();
        set_attribute_if_changed(doc, &self.config.theme_attribute, self.theme.get().as_str());
        set_class_if_changed(doc, &self.config.dark_class, self.current_scheme().is_dark());
    }

    fn reflect_background(&self) {
        let doc = self.env.document.as_ref();
        let background = self.background.get();
        set_attribute_if_changed(doc, &self.config.background_attribute, background.as_str());
        set_class_if_changed(doc, &self.config.animated_class, background == Background::Animated);
        set_class_if_changed(doc, &self.config.static_class, background == Background::Static);
    }

    fn reflect_quality(&self) {
        set_attribute_if_changed(self.env.document.as_ref(), &self.config.quality_attribute, self.quality.get().as_str());
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    fn persist_theme(&self) {
        self.persist(&self.config.theme_key, stored_theme(self.theme.get()));
    }

    fn persist_background(&self) {
        self.persist(&self.config.background_key, Some(self.background.get().as_str()));
    }

    fn persist_quality(&self) {
        self.persist(&self.config.quality_key, stored_quality(self.quality.get()));
    }

    /// `None` removes the key.
    fn persist(&self, key: &str, value: Option<&str>) {
        let storage = self.env.storage.as_ref();
        let result = match value {
            Some(value) => storage.set(key, value),
            None => storage.remove(key),
        };
        if let Err(e) = result {
            leptos::logging::warn!("ui-prefs: could not persist '{key}': {e}");
        }
    }

    fn persist_if_stale(&self, key: &str, value: Option<&str>) {
        match self.env.storage.get(key) {
            Ok(current) if current.as_deref() == value => {}
            _ => self.persist(key, value),
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        // Browser listeners must be removed before the environment frees them.
        self.os_subscription.get_mut().cancel();
    }
}

fn stored_theme(theme: Theme) -> Option<&'static str> {
    (!theme.is_sentinel()).then(|| theme.as_str())
}

fn stored_quality(quality: Quality) -> Option<&'static str> {
    (!quality.is_sentinel()).then(|| quality.as_str())
}

fn set_attribute_if_changed(doc: &dyn DocumentRoot, name: &str, value: &str) {
    if doc.attribute(name).as_deref() != Some(value) {
        doc.set_attribute(name, value);
    }
}

fn set_class_if_changed(doc: &dyn DocumentRoot, class: &str, present: bool) {
    if doc.has_class(class) != present {
        doc.toggle_class(class, present);
    }
}

// =============================================================================
// INITIAL VALUES
// =============================================================================

fn initial_theme(env: &Environment, config: &StoreConfig) -> (Theme, Origin) {
    if let Some(theme) = reflected::<Theme>(env.document.as_ref(), &config.theme_attribute) {
        return (theme, Origin::Document);
    }
    stored::<Theme>(env.storage.as_ref(), &config.theme_key)
        .map_or((Theme::default(), Origin::Default), |theme| (theme, Origin::Storage))
}

/// The dark class alone is a resolved reading, not a selection. It only stands
/// in for the OS signal when there is none.
fn initial_system(env: &Environment, config: &StoreConfig) -> ColorScheme {
    let prefers_dark = env.color_scheme.prefers_dark().unwrap_or_else(|| env.document.has_class(&config.dark_class));
    ColorScheme::from_prefers_dark(prefers_dark)
}

fn initial_background(env: &Environment, config: &StoreConfig) -> (Background, Origin) {
    let doc = env.document.as_ref();
    if let Some(background) = reflected::<Background>(doc, &config.background_attribute) {
        return (background, Origin::Document);
    }
    if doc.has_class(&config.static_class) {
        return (Background::Static, Origin::Document);
    }
    if doc.has_class(&config.animated_class) {
        return (Background::Animated, Origin::Document);
    }
    stored::<Background>(env.storage.as_ref(), &config.background_key)
        .map_or((Background::default(), Origin::Default), |bg| (bg, Origin::Storage))
}

fn initial_quality(env: &Environment, config: &StoreConfig) -> (Quality, Origin) {
    if let Some(quality) = reflected::<Quality>(env.document.as_ref(), &config.quality_attribute) {
        return (quality, Origin::Document);
    }
    stored::<Quality>(env.storage.as_ref(), &config.quality_key)
        .map_or((Quality::default(), Origin::Default), |quality| (quality, Origin::Storage))
}

fn reflected<T: FromStr>(doc: &dyn DocumentRoot, attribute: &str) -> Option<T> {
    doc.attribute(attribute)?.parse().ok()
}

/// Parsed storage value; read failures and unknown values count as absent.
fn stored<T: FromStr<Err = PreferenceError>>(storage: &dyn PreferenceStorage, key: &str) -> Option<T> {
    match storage.get(key) {
        Ok(Some(raw)) => match raw.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                leptos::logging::warn!("ui-prefs: ignoring stored '{key}': {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            leptos::logging::warn!("ui-prefs: could not read '{key}': {e}");
            None
        }
    }
}
