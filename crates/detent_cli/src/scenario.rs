//! Scenario definition for headless sheet runs.

use anyhow::{Context, Result};
use detent_core::{Detent, GesturePhase};
use detent_sheet::{SheetConfig, SheetPhase};
use serde::Deserialize;
use std::path::Path;

/// Sheet setup plus the sequence of steps to drive it through.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetScenario {
    #[serde(default = "default_container_height")]
    pub container_height: f32,
    /// Sheet tunables; omitted keys take their defaults
    #[serde(default)]
    pub config: SheetConfig,
    pub steps: Vec<ScenarioStep>,
}

fn default_container_height() -> f32 {
    800.0
}

impl SheetScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }
}

/// Steps a scenario can take.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Open,
    Close,
    /// A complete drag: began, evenly spaced changed samples, ended
    Drag {
        location_y: f32,
        translation_y: f32,
        /// Release velocity (screen space, positive = downward)
        #[serde(default)]
        velocity_y: f32,
        /// Velocity at touch-down; defaults to the drag direction
        #[serde(default)]
        initial_velocity_y: Option<f32>,
        #[serde(default = "default_samples")]
        samples: u32,
    },
    /// A single raw gesture sample
    Gesture {
        phase: GesturePhase,
        #[serde(default)]
        location_y: f32,
        #[serde(default)]
        translation_y: f32,
        #[serde(default)]
        velocity_y: f32,
    },
    /// The content reports a scroll offset
    Scroll { offset: f32 },
    Tick { frames: u32 },
    Wait { ms: u64 },
    AnimateTo { detent: Detent },
    Resize { container_height: f32 },
    AssertDetent { detent: Detent },
    AssertHeight {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertExpanded { value: bool },
    AssertContentOffset {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertPhase { phase: SheetPhase },
}

fn default_samples() -> u32 {
    10
}

fn default_tolerance() -> f32 {
    0.5
}

impl ScenarioStep {
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertDetent { .. }
                | ScenarioStep::AssertHeight { .. }
                | ScenarioStep::AssertExpanded { .. }
                | ScenarioStep::AssertContentOffset { .. }
                | ScenarioStep::AssertPhase { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_scenario() {
        let scenario = SheetScenario::from_json(r#"{ "steps": [{ "type": "open" }] }"#).unwrap();
        assert_eq!(scenario.container_height, 800.0);
        assert_eq!(scenario.config, SheetConfig::default());
        assert!(matches!(scenario.steps[0], ScenarioStep::Open));
    }

    #[test]
    fn test_parse_all_step_kinds() {
        let scenario = SheetScenario::from_json(
            r#"{
                "container_height": 1000,
                "config": { "large_ratio": 0.95 },
                "steps": [
                    { "type": "open" },
                    { "type": "wait", "ms": 300 },
                    { "type": "drag", "location_y": 10, "translation_y": -450 },
                    { "type": "gesture", "phase": "cancelled" },
                    { "type": "scroll", "offset": 40 },
                    { "type": "tick", "frames": 60 },
                    { "type": "animate_to", "detent": "medium" },
                    { "type": "resize", "container_height": 700 },
                    { "type": "assert_detent", "detent": "large" },
                    { "type": "assert_height", "value": 950, "tolerance": 1 },
                    { "type": "assert_expanded", "value": true },
                    { "type": "assert_content_offset", "value": 0 },
                    { "type": "assert_phase", "phase": "at_large" },
                    { "type": "close" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.container_height, 1000.0);
        assert_eq!(scenario.config.large_ratio, 0.95);
        assert_eq!(scenario.steps.len(), 14);
        assert_eq!(scenario.steps.iter().filter(|s| s.is_assertion()).count(), 5);

        match &scenario.steps[2] {
            ScenarioStep::Drag {
                samples,
                velocity_y,
                initial_velocity_y,
                ..
            } => {
                assert_eq!(*samples, 10);
                assert_eq!(*velocity_y, 0.0);
                assert_eq!(*initial_velocity_y, None);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_rejected() {
        assert!(SheetScenario::from_json(r#"{ "steps": [{ "type": "fling" }] }"#).is_err());
    }
}
