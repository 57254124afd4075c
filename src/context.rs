//! Leptos integration: mirror the store into signals and provide it as context.
//!
//! DESIGN
//! ======
//! The store is single-threaded (`Rc`), so it goes into context through a
//! thread-local `StoredValue`. Components that only render read the mirrored
//! `RwSignal`s; components that mutate fetch the store and call it directly.
//! The signals are never written back into the store.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::observable::Subscription;
use crate::prefs::{Background, ColorScheme, QualityTier, Theme};
use crate::store::PreferenceStore;

type StoreContext = StoredValue<PreferenceStore, LocalStorage>;

/// Read-only reactive view of the store.
#[derive(Clone, Copy)]
pub struct PreferenceSignals {
    /// Raw selection, may be `System`.
    pub theme: RwSignal<Theme>,
    pub resolved_theme: RwSignal<ColorScheme>,
    pub background: RwSignal<Background>,
    pub quality: RwSignal<QualityTier>,
}

impl PreferenceSignals {
    /// Create signals seeded from `store` that follow it until the current
    /// reactive owner is cleaned up.
    #[must_use]
    pub fn bind(store: &PreferenceStore) -> Self {
        let signals = Self {
            theme: RwSignal::new(store.theme()),
            resolved_theme: RwSignal::new(store.resolved_theme()),
            background: RwSignal::new(store.background()),
            quality: RwSignal::new(store.resolved_quality()),
        };

        let subscriptions = StoredValue::new_local(vec![
            store.on_theme_selected(move |theme| {
                let _ = signals.theme.try_set(theme);
            }),
            store.on_theme_change(move |scheme| {
                let _ = signals.resolved_theme.try_set(scheme);
            }),
            store.on_background_change(move |background| {
                let _ = signals.background.try_set(background);
            }),
            store.on_quality_change(move |tier| {
                let _ = signals.quality.try_set(tier);
            }),
        ]);

        // Cleanups run before the owner's arena values are disposed.
        on_cleanup(move || {
            subscriptions.update_value(|subscriptions| subscriptions.iter_mut().for_each(Subscription::cancel));
        });

        signals
    }
}

/// Provide `store` and its signals to the current reactive owner.
pub fn provide_preferences(store: PreferenceStore) -> PreferenceSignals {
    let signals = PreferenceSignals::bind(&store);
    provide_context::<StoreContext>(StoredValue::new_local(store));
    provide_context(signals);
    signals
}

#[must_use]
pub fn use_preferences() -> Option<PreferenceSignals> {
    use_context::<PreferenceSignals>()
}

#[must_use]
pub fn use_preference_store() -> Option<PreferenceStore> {
    use_context::<StoreContext>()?.try_get_value()
}
