//! Store configuration: storage keys, DOM contract names, capability thresholds.
//!
//! The attribute and class names are a contract with the stylesheet, so the
//! defaults must stay bit-exact with what existing CSS expects.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::PreferenceError;

pub const DEFAULT_LOW_POWER_CORES: u32 = 4;
pub const DEFAULT_SMALL_SCREEN_WIDTH: f64 = 768.0;
pub const DEFAULT_MOBILE_AGENTS: [&str; 8] =
    ["android", "webos", "iphone", "ipad", "ipod", "blackberry", "iemobile", "opera mini"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub theme_key: String,
    pub background_key: String,
    pub quality_key: String,

    pub theme_attribute: String,
    pub background_attribute: String,
    pub quality_attribute: String,
    pub dark_class: String,
    pub animated_class: String,
    pub static_class: String,

    /// Logical processor count at or below which a device is low-power.
    pub low_power_cores: u32,
    /// Viewport width (CSS px) below which a screen is small.
    pub small_screen_width: f64,
    /// Lowercase user-agent fragments that mark a mobile device.
    pub mobile_agents: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            theme_key: "theme".into(),
            background_key: "bg".into(),
            quality_key: "quality".into(),
            theme_attribute: "theme".into(),
            background_attribute: "bg".into(),
            quality_attribute: "quality".into(),
            dark_class: "dark".into(),
            animated_class: "bg-animated".into(),
            static_class: "bg-static".into(),
            low_power_cores: DEFAULT_LOW_POWER_CORES,
            small_screen_width: DEFAULT_SMALL_SCREEN_WIDTH,
            mobile_agents: DEFAULT_MOBILE_AGENTS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl StoreConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::Config` for malformed JSON or a config that
    /// fails [`StoreConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, PreferenceError> {
        let mut config: Self = serde_json::from_str(raw).map_err(|e| PreferenceError::Config(e.to_string()))?;
        for agent in &mut config.mobile_agents {
            *agent = agent.to_ascii_lowercase();
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names and storage keys shared between fields.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::Config` naming the first problem found.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        let names = [
            ("theme_key", &self.theme_key),
            ("background_key", &self.background_key),
            ("quality_key", &self.quality_key),
            ("theme_attribute", &self.theme_attribute),
            ("background_attribute", &self.background_attribute),
            ("quality_attribute", &self.quality_attribute),
            ("dark_class", &self.dark_class),
            ("animated_class", &self.animated_class),
            ("static_class", &self.static_class),
        ];
        if let Some((name, _)) = names.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PreferenceError::Config(format!("{name} must not be empty")));
        }

        let keys = [&self.theme_key, &self.background_key, &self.quality_key];
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(PreferenceError::Config(format!("storage key '{key}' is used by more than one field")));
            }
        }

        if self.animated_class == self.static_class {
            return Err(PreferenceError::Config("animated_class and static_class must differ".into()));
        }
        Ok(())
    }
}
