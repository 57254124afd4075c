use super::*;

#[test]
fn defaults_match_stylesheet_contract() {
    let cfg = StoreConfig::default();
    assert_eq!(cfg.theme_key, "theme");
    assert_eq!(cfg.background_key, "bg");
    assert_eq!(cfg.quality_key, "quality");
    assert_eq!(cfg.theme_attribute, "theme");
    assert_eq!(cfg.background_attribute, "bg");
    assert_eq!(cfg.dark_class, "dark");
    assert_eq!(cfg.animated_class, "bg-animated");
    assert_eq!(cfg.static_class, "bg-static");
    assert_eq!(cfg.low_power_cores, 4);
    assert!((cfg.small_screen_width - 768.0).abs() < f64::EPSILON);
    assert!(cfg.mobile_agents.iter().any(|a| a == "iphone"));
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let cfg = StoreConfig::from_json(r#"{ "background_key": "bgMode", "low_power_cores": 2 }"#).unwrap();
    assert_eq!(cfg.background_key, "bgMode");
    assert_eq!(cfg.low_power_cores, 2);
    assert_eq!(cfg.theme_key, "theme");
    assert_eq!(cfg.dark_class, "dark");
}

#[test]
fn from_json_lowercases_mobile_agents() {
    let cfg = StoreConfig::from_json(r#"{ "mobile_agents": ["Kindle", "SILK"] }"#).unwrap();
    assert_eq!(cfg.mobile_agents, vec!["kindle".to_owned(), "silk".to_owned()]);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = StoreConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, PreferenceError::Config(_)));
}

#[test]
fn from_json_rejects_empty_names() {
    let err = StoreConfig::from_json(r#"{ "dark_class": "  " }"#).unwrap_err();
    assert_eq!(err, PreferenceError::Config("dark_class must not be empty".into()));
}

#[test]
fn validate_rejects_shared_storage_keys() {
    let cfg = StoreConfig { quality_key: "theme".into(), ..StoreConfig::default() };
    let err = cfg.validate().unwrap_err();
    assert_eq!(err, PreferenceError::Config("storage key 'theme' is used by more than one field".into()));
}

#[test]
fn validate_rejects_identical_background_classes() {
    let cfg = StoreConfig { static_class: "bg-animated".into(), ..StoreConfig::default() };
    assert!(cfg.validate().is_err());
}
