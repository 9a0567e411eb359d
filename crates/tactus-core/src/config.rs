//! Per-element recognition thresholds.
//!
//! A [`GestureConfig`] is supplied once when an element is bound and is
//! read-only afterwards. Partial YAML documents override only the fields
//! they name:
//!
//! ```
//! use tactus_core::GestureConfig;
//!
//! let config = GestureConfig::from_yaml("tapRadius: 6\nflingSpeedThreshold: 1.2\n").unwrap();
//! assert_eq!(config.tap_radius, 6.0);
//! assert_eq!(config.tap_time_ms, 200);
//! ```

use crate::element::TargetRole;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A threshold was zero, negative or not finite
    #[error("{field} must be a positive number, got {value}")]
    NonPositive {
        /// Offending field (camelCase name)
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

/// Set of target roles under which input is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<TargetRole>", into = "Vec<TargetRole>")]
pub struct IgnoreSelector {
    mask: u16,
}

impl IgnoreSelector {
    /// Selector that ignores nothing.
    pub const NONE: Self = Self { mask: 0 };

    /// Selector matching form controls (inputs, text areas, selects, buttons).
    #[must_use]
    pub fn form_controls() -> Self {
        TargetRole::ALL
            .into_iter()
            .filter(|role| role.is_form_control())
            .collect()
    }

    /// Add a role.
    #[must_use]
    pub const fn with(mut self, role: TargetRole) -> Self {
        self.mask |= role.bit();
        self
    }

    /// Whether input landing on `role` must be ignored.
    #[must_use]
    pub const fn matches(&self, role: TargetRole) -> bool {
        self.mask & role.bit() != 0
    }

    /// Roles in the selector, in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = TargetRole> + '_ {
        TargetRole::ALL.into_iter().filter(|r| self.matches(*r))
    }
}

impl Default for IgnoreSelector {
    fn default() -> Self {
        Self::form_controls()
    }
}

impl FromIterator<TargetRole> for IgnoreSelector {
    fn from_iter<I: IntoIterator<Item = TargetRole>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<Vec<TargetRole>> for IgnoreSelector {
    fn from(roles: Vec<TargetRole>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<IgnoreSelector> for Vec<TargetRole> {
    fn from(selector: IgnoreSelector) -> Self {
        selector.roles().collect()
    }
}

/// Recognition thresholds for one bound element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Target roles under which input is not tracked.
    pub ignore_selector: IgnoreSelector,
    /// Multiplier applied to vertical movement or wheel delta for modifier pinch.
    pub mouse_pinch_multiplier: f32,
    /// Multiplier applied to the change in two-finger distance.
    pub touch_pinch_multiplier: f32,
    /// Largest per-step movement (px) that keeps a tap eligible.
    pub tap_radius: f32,
    /// Longest press (ms) that still counts as a tap.
    pub tap_time_ms: u64,
    /// Press duration (ms) after which a hold fires.
    pub held_tap_time_ms: u64,
    /// Combined displacement (px) that triggers swipe classification.
    pub swipe_active_radius: f32,
    /// Largest displacement (px) tolerated on the passive axis.
    pub swipe_passive_radius: f32,
    /// Dominant-axis speed (px/ms) above which a swipe is a fling.
    pub fling_speed_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            ignore_selector: IgnoreSelector::default(),
            mouse_pinch_multiplier: 1.0,
            touch_pinch_multiplier: 4.0,
            tap_radius: 3.0,
            tap_time_ms: 200,
            held_tap_time_ms: 300,
            swipe_active_radius: 50.0,
            swipe_passive_radius: 20.0,
            fling_speed_threshold: 0.7,
        }
    }
}

impl GestureConfig {
    /// Parse and validate a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a threshold is not positive.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every numeric threshold is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("mousePinchMultiplier", self.mouse_pinch_multiplier),
            ("touchPinchMultiplier", self.touch_pinch_multiplier),
            ("tapRadius", self.tap_radius),
            ("swipeActiveRadius", self.swipe_active_radius),
            ("swipePassiveRadius", self.swipe_passive_radius),
            ("flingSpeedThreshold", self.fling_speed_threshold),
        ];
        for (field, value) in floats {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive {
                    field,
                    value: f64::from(value),
                });
            }
        }

        for (field, value) in [
            ("tapTimeMs", self.tap_time_ms),
            ("heldTapTimeMs", self.held_tap_time_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field, value: 0.0 });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GestureConfig::default();
        assert_eq!(config.mouse_pinch_multiplier, 1.0);
        assert_eq!(config.touch_pinch_multiplier, 4.0);
        assert_eq!(config.tap_radius, 3.0);
        assert_eq!(config.tap_time_ms, 200);
        assert_eq!(config.held_tap_time_ms, 300);
        assert_eq!(config.swipe_active_radius, 50.0);
        assert_eq!(config.swipe_passive_radius, 20.0);
        assert!((config.fling_speed_threshold - 0.7).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_ignore_selector_is_form_controls() {
        let selector = IgnoreSelector::default();
        assert!(selector.matches(TargetRole::TextInput));
        assert!(selector.matches(TargetRole::Button));
        assert!(selector.matches(TargetRole::Select));
        assert!(!selector.matches(TargetRole::Generic));
        assert!(!selector.matches(TargetRole::Image));
    }

    #[test]
    fn test_from_yaml_partial_override() {
        let config = GestureConfig::from_yaml("tapRadius: 5\nheldTapTimeMs: 800\n").unwrap();
        assert_eq!(config.tap_radius, 5.0);
        assert_eq!(config.held_tap_time_ms, 800);
        assert_eq!(config.swipe_active_radius, 50.0);
    }

    #[test]
    fn test_from_yaml_ignore_selector_list() {
        let config = GestureConfig::from_yaml("ignoreSelector: [image, link]\n").unwrap();
        assert!(config.ignore_selector.matches(TargetRole::Image));
        assert!(config.ignore_selector.matches(TargetRole::Link));
        assert!(!config.ignore_selector.matches(TargetRole::TextInput));
    }

    #[test]
    fn test_from_yaml_rejects_non_positive() {
        let err = GestureConfig::from_yaml("tapRadius: 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "tapRadius",
                ..
            }
        ));

        let err = GestureConfig::from_yaml("tapTimeMs: 0\n").unwrap_err();
        assert!(err.to_string().contains("tapTimeMs"));
    }

    #[test]
    fn test_from_yaml_invalid_syntax() {
        let err = GestureConfig::from_yaml("tapRadius: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = GestureConfig {
            fling_speed_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_selector() {
        let config = GestureConfig {
            ignore_selector: IgnoreSelector::NONE.with(TargetRole::Slider),
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        let parsed = GestureConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
