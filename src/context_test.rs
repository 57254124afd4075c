use leptos::prelude::GetUntracked;
use leptos::reactive::owner::Owner;

use super::*;
use crate::config::StoreConfig;
use crate::env::Environment;
use crate::memory::ManualColorScheme;

fn store_with_os(prefers_dark: bool) -> (PreferenceStore, ManualColorScheme) {
    let scheme = ManualColorScheme::new(prefers_dark);
    let env = Environment::builder().color_scheme(scheme.clone()).build();
    (PreferenceStore::new(env, StoreConfig::default()), scheme)
}

// =============================================================
// PreferenceSignals::bind
// =============================================================

#[test]
fn bind_seeds_signals_from_store() {
    let (store, _scheme) = store_with_os(true);
    let signals = PreferenceSignals::bind(&store);

    assert_eq!(signals.theme.get_untracked(), Theme::System);
    assert_eq!(signals.resolved_theme.get_untracked(), ColorScheme::Dark);
    assert_eq!(signals.background.get_untracked(), Background::Animated);
    assert_eq!(signals.quality.get_untracked(), QualityTier::High);
}

#[test]
fn signals_follow_store_mutations() {
    let (store, _scheme) = store_with_os(false);
    let signals = PreferenceSignals::bind(&store);

    store.set_theme(Theme::Dark);
    store.set_background(Background::Static);

    assert_eq!(signals.theme.get_untracked(), Theme::Dark);
    assert_eq!(signals.resolved_theme.get_untracked(), ColorScheme::Dark);
    assert_eq!(signals.background.get_untracked(), Background::Static);
}

#[test]
fn signals_follow_os_in_system_mode() {
    let (store, scheme) = store_with_os(false);
    let signals = PreferenceSignals::bind(&store);

    scheme.set_prefers_dark(true);
    assert_eq!(signals.resolved_theme.get_untracked(), ColorScheme::Dark);
    assert_eq!(signals.theme.get_untracked(), Theme::System);
}

#[test]
fn owner_cleanup_releases_store_observers() {
    let (store, _scheme) = store_with_os(false);
    let before = store.observer_count();

    for _ in 0..3 {
        let owner = Owner::new();
        owner.with(|| {
            let _signals = PreferenceSignals::bind(&store);
            assert_eq!(store.observer_count(), before + 4);
        });
        owner.cleanup();
    }

    assert_eq!(store.observer_count(), before);
}

#[test]
fn signals_follow_store_while_owner_is_alive() {
    let (store, _scheme) = store_with_os(false);
    let owner = Owner::new();
    owner.with(|| {
        let signals = PreferenceSignals::bind(&store);
        store.set_theme(Theme::Dark);
        assert_eq!(signals.resolved_theme.get_untracked(), ColorScheme::Dark);
    });
}

// =============================================================
// Context
// =============================================================

#[test]
fn provided_store_and_signals_are_reachable() {
    let owner = Owner::new();
    owner.with(|| {
        let (store, _scheme) = store_with_os(false);
        let signals = provide_preferences(store);

        let fetched = use_preference_store().expect("store in context");
        fetched.set_theme(Theme::Dark);

        let from_context = use_preferences().expect("signals in context");
        assert_eq!(from_context.resolved_theme.get_untracked(), ColorScheme::Dark);
        assert_eq!(signals.theme.get_untracked(), Theme::Dark);
    });
}

#[test]
fn provider_cleanup_detaches_from_store() {
    let (store, _scheme) = store_with_os(false);
    let before = store.observer_count();

    let owner = Owner::new();
    owner.with(|| {
        let _signals = provide_preferences(store.clone());
    });
    owner.cleanup();

    assert_eq!(store.observer_count(), before);
}

#[test]
fn context_lookups_are_empty_without_provider() {
    let owner = Owner::new();
    owner.with(|| {
        assert!(use_preferences().is_none());
        assert!(use_preference_store().is_none());
    });
}
