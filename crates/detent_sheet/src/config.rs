//! Sheet configuration (sheet.toml)
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! medium_ratio = 0.5
//! large_ratio = 0.9
//! min_height = 100.0
//! velocity_threshold = 500.0
//! scroll_reenable_delay_ms = 100
//!
//! [spring]
//! damping_ratio = 0.85
//! response = 0.4
//! ```

use std::path::Path;

use detent_animation::{Easing, SpringConfig};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Tunables for a sheet controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Medium detent height as a fraction of the container height
    pub medium_ratio: f32,
    /// Large detent height as a fraction of the container height
    pub large_ratio: f32,
    /// Lowest height a drag may pull the sheet down to
    pub min_height: f32,
    /// Height of the grab-handle band at the top of the sheet
    pub grab_band_height: f32,
    /// Release velocity (units/s) above which a flick overrides nearest-detent snapping
    pub velocity_threshold: f32,
    /// Delay before content scrolling is re-enabled after a snap
    pub scroll_reenable_delay_ms: u64,
    /// Spring used for detent snaps
    pub spring: SpringSettings,
    /// Entry one-shot duration
    pub entry_duration_ms: u32,
    /// Exit one-shot duration
    pub exit_duration_ms: u32,
    pub entry_easing: Easing,
    pub exit_easing: Easing,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            medium_ratio: 0.5,
            large_ratio: 0.9,
            min_height: 100.0,
            grab_band_height: 40.0,
            velocity_threshold: 500.0,
            scroll_reenable_delay_ms: 100,
            spring: SpringSettings::default(),
            entry_duration_ms: 300,
            exit_duration_ms: 250,
            entry_easing: Easing::EaseOutCubic,
            exit_easing: Easing::EaseInCubic,
        }
    }
}

/// Snap spring expressed the way designers tune it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSettings {
    /// Below 1.0 settles with a slight overshoot
    pub damping_ratio: f32,
    /// Undamped period in seconds
    pub response: f32,
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self {
            damping_ratio: 0.85,
            response: 0.4,
        }
    }
}

impl SpringSettings {
    pub fn to_spring_config(&self) -> SpringConfig {
        SpringConfig::from_damping_ratio(self.damping_ratio, self.response)
    }
}

impl SheetConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SheetConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Check every invariant the controller relies on
    pub fn validate(&self) -> Result<()> {
        validate_ratios(self.medium_ratio, self.large_ratio)?;
        non_negative("min_height", self.min_height)?;
        non_negative("grab_band_height", self.grab_band_height)?;
        non_negative("velocity_threshold", self.velocity_threshold)?;
        positive("spring.damping_ratio", self.spring.damping_ratio)?;
        positive("spring.response", self.spring.response)?;
        Ok(())
    }

    /// Scroll re-enable delay in seconds
    pub fn scroll_reenable_delay(&self) -> f32 {
        self.scroll_reenable_delay_ms as f32 / 1000.0
    }
}

pub(crate) fn validate_ratios(medium: f32, large: f32) -> Result<()> {
    let in_range = |r: f32| r.is_finite() && r > 0.0 && r <= 1.0;
    if !in_range(medium) || !in_range(large) || medium >= large {
        return Err(ConfigError::InvalidRatios { medium, large });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            expected: "finite and non-negative",
            value,
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            expected: "finite and positive",
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SheetConfig::from_toml_str("").unwrap();
        assert_eq!(config, SheetConfig::default());
        assert_eq!(config.scroll_reenable_delay(), 0.1);
    }

    #[test]
    fn test_partial_override() {
        let config = SheetConfig::from_toml_str(
            r#"
            large_ratio = 0.95
            min_height = 80.0
            exit_easing = "linear"

            [spring]
            response = 0.3
            "#,
        )
        .unwrap();

        assert_eq!(config.large_ratio, 0.95);
        assert_eq!(config.medium_ratio, 0.5);
        assert_eq!(config.min_height, 80.0);
        assert_eq!(config.exit_easing, Easing::Linear);
        assert_eq!(config.spring.response, 0.3);
        assert_eq!(config.spring.damping_ratio, 0.85);
    }

    #[test]
    fn test_cubic_bezier_easing() {
        let config =
            SheetConfig::from_toml_str("entry_easing = { cubic_bezier = [0.2, 0.0, 0.0, 1.0] }")
                .unwrap();
        assert_eq!(config.entry_easing, Easing::CubicBezier(0.2, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_inverted_ratios_rejected() {
        let err = SheetConfig::from_toml_str("medium_ratio = 0.9\nlarge_ratio = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatios { .. }));

        let err = SheetConfig::from_toml_str("medium_ratio = 0.6\nlarge_ratio = 0.6").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatios { .. }));

        let err = SheetConfig::from_toml_str("large_ratio = 1.2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatios { .. }));
    }

    #[test]
    fn test_invalid_tunables_rejected() {
        let err = SheetConfig::from_toml_str("min_height = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "min_height",
                ..
            }
        ));

        let err = SheetConfig::from_toml_str("[spring]\nresponse = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "spring.response",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = SheetConfig::from_toml_str("medium_ratio = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SheetConfig::from_path(Path::new("/nonexistent/sheet.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
