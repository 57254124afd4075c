use super::*;

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_default_is_system() {
    assert_eq!(Theme::default(), Theme::System);
    assert!(Theme::default().is_sentinel());
}

#[test]
fn theme_resolve_uses_signal_only_for_system() {
    assert_eq!(Theme::System.resolve(ColorScheme::Dark), ColorScheme::Dark);
    assert_eq!(Theme::System.resolve(ColorScheme::Light), ColorScheme::Light);
    assert_eq!(Theme::Light.resolve(ColorScheme::Dark), ColorScheme::Light);
    assert_eq!(Theme::Dark.resolve(ColorScheme::Light), ColorScheme::Dark);
}

#[test]
fn theme_toggle_flips_what_is_shown() {
    assert_eq!(Theme::System.toggled(ColorScheme::Dark), Theme::Light);
    assert_eq!(Theme::System.toggled(ColorScheme::Light), Theme::Dark);
    assert_eq!(Theme::Light.toggled(ColorScheme::Light), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(ColorScheme::Dark), Theme::Light);
}

#[test]
fn theme_parses_known_values_only() {
    assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
    assert_eq!("system".parse::<Theme>(), Ok(Theme::System));
    assert_eq!(
        "Dark".parse::<Theme>(),
        Err(PreferenceError::InvalidValue { field: "theme", value: "Dark".into() })
    );
    assert!("".parse::<Theme>().is_err());
}

#[test]
fn theme_serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    assert_eq!(serde_json::from_str::<Theme>("\"light\"").unwrap(), Theme::Light);
}

// =============================================================
// Background
// =============================================================

#[test]
fn background_default_is_animated() {
    assert_eq!(Background::default(), Background::Animated);
}

#[test]
fn background_toggle_round_trips() {
    assert_eq!(Background::Animated.toggled(), Background::Static);
    assert_eq!(Background::Static.toggled(), Background::Animated);
}

// =============================================================
// Quality
// =============================================================

#[test]
fn quality_auto_defers_to_tier() {
    assert_eq!(Quality::Auto.resolve(QualityTier::Medium), QualityTier::Medium);
    assert_eq!(Quality::Low.resolve(QualityTier::High), QualityTier::Low);
    assert_eq!(Quality::High.resolve(QualityTier::Low), QualityTier::High);
}

#[test]
fn quality_tiers_are_ordered() {
    assert!(QualityTier::Low < QualityTier::Medium);
    assert!(QualityTier::Medium < QualityTier::High);
}

#[test]
fn quality_display_matches_storage_text() {
    assert_eq!(Quality::Medium.to_string(), "medium");
    assert_eq!(QualityTier::High.to_string(), "high");
}

// =============================================================
// Field
// =============================================================

#[test]
fn field_parses_names_and_bg_alias() {
    assert_eq!("theme".parse::<Field>(), Ok(Field::Theme));
    assert_eq!("bg".parse::<Field>(), Ok(Field::Background));
    assert_eq!("background".parse::<Field>(), Ok(Field::Background));
    assert_eq!("volume".parse::<Field>(), Err(PreferenceError::UnknownField("volume".into())));
}

#[test]
fn field_sentinels() {
    assert_eq!(Field::Theme.sentinel(), Some("system"));
    assert_eq!(Field::Background.sentinel(), None);
    assert_eq!(Field::Quality.sentinel(), Some("auto"));
}
