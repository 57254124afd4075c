//! Preference domains: raw selections and their resolved forms.
//!
//! DESIGN
//! ======
//! Each field has a raw enum (what the user picked, possibly a sentinel) and a
//! resolved enum (what the UI renders). Keeping them as separate types means a
//! sentinel can never leak into rendering code.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PreferenceError;

/// Named preference fields, for the string-keyed store API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Theme,
    Background,
    Quality,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Theme, Field::Background, Field::Quality];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Background => "background",
            Self::Quality => "quality",
        }
    }

    /// The raw value meaning "follow the external signal", if the field has one.
    #[must_use]
    pub fn sentinel(self) -> Option<&'static str> {
        match self {
            Self::Theme => Some(Theme::System.as_str()),
            Self::Background => None,
            Self::Quality => Some(Quality::Auto.as_str()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "theme" => Ok(Self::Theme),
            "background" | "bg" => Ok(Self::Background),
            "quality" => Ok(Self::Quality),
            other => Err(PreferenceError::UnknownField(other.to_owned())),
        }
    }
}

// =============================================================================
// THEME
// =============================================================================

/// Raw theme selection. `System` defers to the OS color-scheme signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Concrete color scheme the UI renders with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    #[must_use]
    pub fn is_sentinel(self) -> bool {
        self == Self::System
    }

    #[must_use]
    pub fn resolve(self, system: ColorScheme) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::System => system,
        }
    }

    /// Explicit choice opposite to what is currently shown.
    #[must_use]
    pub fn toggled(self, system: ColorScheme) -> Theme {
        match self.resolve(system) {
            ColorScheme::Light => Theme::Dark,
            ColorScheme::Dark => Theme::Light,
        }
    }
}

impl ColorScheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl From<ColorScheme> for Theme {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Theme::Light,
            ColorScheme::Dark => Theme::Dark,
        }
    }
}

// =============================================================================
// BACKGROUND
// =============================================================================

/// Background animation mode. Two-valued with a fixed default, no sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Animated,
    Static,
}

impl Background {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Animated => "animated",
            Self::Static => "static",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Animated => Self::Static,
            Self::Static => Self::Animated,
        }
    }
}

// =============================================================================
// QUALITY
// =============================================================================

/// Raw rendering-quality selection. `Auto` derives a tier from the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Auto,
    Low,
    Medium,
    High,
}

/// Concrete quality tier, ordered lowest to highest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    #[default]
    High,
}

impl Quality {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn is_sentinel(self) -> bool {
        self == Self::Auto
    }

    /// Resolve against the tier computed for auto mode.
    #[must_use]
    pub fn resolve(self, auto_tier: QualityTier) -> QualityTier {
        match self {
            Self::Auto => auto_tier,
            Self::Low => QualityTier::Low,
            Self::Medium => QualityTier::Medium,
            Self::High => QualityTier::High,
        }
    }
}

impl QualityTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl From<QualityTier> for Quality {
    fn from(tier: QualityTier) -> Self {
        match tier {
            QualityTier::Low => Quality::Low,
            QualityTier::Medium => Quality::Medium,
            QualityTier::High => Quality::High,
        }
    }
}

// =============================================================================
// TEXT CONVERSIONS
// =============================================================================

macro_rules! text_enum {
    ($ty:ty, $field:literal, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = PreferenceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($variant),)+
                    other => Err(PreferenceError::InvalidValue { field: $field, value: other.to_owned() }),
                }
            }
        }
    };
}

text_enum!(Theme, "theme", ["light" => Theme::Light, "dark" => Theme::Dark, "system" => Theme::System]);
text_enum!(ColorScheme, "theme", ["light" => ColorScheme::Light, "dark" => ColorScheme::Dark]);
text_enum!(Background, "background", ["animated" => Background::Animated, "static" => Background::Static]);
text_enum!(Quality, "quality", [
    "auto" => Quality::Auto,
    "low" => Quality::Low,
    "medium" => Quality::Medium,
    "high" => Quality::High,
]);
text_enum!(QualityTier, "quality", [
    "low" => QualityTier::Low,
    "medium" => QualityTier::Medium,
    "high" => QualityTier::High,
]);
