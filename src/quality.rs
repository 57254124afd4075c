//! Device capability heuristics for auto quality mode.
//!
//! Tier policy, first match wins:
//! 1. mobile user agent -> `Low`
//! 2. low-power and small screen -> `Low`
//! 3. low-power or small screen -> `Medium`
//! 4. otherwise -> `High`
//!
//! With no profile at all (server pre-pass, tests) the result is `High`.

#[cfg(test)]
#[path = "quality_test.rs"]
mod quality_test;

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::prefs::QualityTier;

/// Point-in-time capability readings from a browser-like context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub user_agent: String,
    /// Logical processor count; `0` when the browser does not report it.
    pub logical_cores: u32,
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityHints {
    pub mobile: bool,
    pub low_power: bool,
    pub small_screen: bool,
}

impl CapabilityHints {
    #[must_use]
    pub fn from_profile(profile: &DeviceProfile, config: &StoreConfig) -> Self {
        let agent = profile.user_agent.to_ascii_lowercase();
        Self {
            mobile: config.mobile_agents.iter().any(|marker| !marker.is_empty() && agent.contains(marker.as_str())),
            low_power: profile.logical_cores != 0 && profile.logical_cores <= config.low_power_cores,
            small_screen: profile.viewport_width < config.small_screen_width,
        }
    }
}

#[must_use]
pub fn classify(hints: CapabilityHints) -> QualityTier {
    match hints {
        CapabilityHints { mobile: true, .. } | CapabilityHints { low_power: true, small_screen: true, .. } => {
            QualityTier::Low
        }
        CapabilityHints { low_power: true, .. } | CapabilityHints { small_screen: true, .. } => QualityTier::Medium,
        _ => QualityTier::High,
    }
}

/// Tier for auto mode given whatever profile the environment can supply.
#[must_use]
pub fn auto_tier(profile: Option<&DeviceProfile>, config: &StoreConfig) -> QualityTier {
    profile.map_or(QualityTier::High, |p| classify(CapabilityHints::from_profile(p, config)))
}
