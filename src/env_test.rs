#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn headless_environment_has_no_signals() {
    let env = Environment::headless();
    assert_eq!(env.color_scheme.prefers_dark(), None);
    assert!(env.device.profile().is_none());
    assert_eq!(env.storage.get("theme"), Ok(None));
    assert_eq!(env.document.attribute("theme"), None);
}

#[test]
fn detect_falls_back_to_headless_off_browser() {
    let env = Environment::detect();
    assert_eq!(env.color_scheme.prefers_dark(), None);
}

#[test]
fn builder_overrides_individual_ports() {
    let storage = MemoryStorage::with_entries([("theme", "dark")]);
    let env = Environment::builder()
        .storage(storage.clone())
        .color_scheme(ManualColorScheme::new(true))
        .build();

    assert_eq!(env.storage.get("theme"), Ok(Some("dark".into())));
    assert_eq!(env.color_scheme.prefers_dark(), Some(true));
    assert!(env.device.profile().is_none());

    env.storage.set("bg", "static").unwrap();
    assert_eq!(storage.entry("bg").as_deref(), Some("static"));
}
