//! Settings and control commands from the page's control surface
//!
//! Both arrive as JSON. Commands are validated here, then applied by the
//! frame scheduler before the next draw.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gesture::GestureMode;
use crate::particles::{EngineParams, Rgb};
use crate::patterns::{PatternKind, DEFAULT_RADIUS};

pub const DEFAULT_PARTICLE_COUNT: usize = 5000;

// ============================================================================
// SESSION SETTINGS
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerSettings {
    pub pattern: PatternKind,
    pub particle_count: usize,
    pub radius: f32,
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub animation_speed: f32,
    pub gesture_sensitivity: f32,
    pub gesture_mode: GestureMode,
    pub seed: u64,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            pattern: PatternKind::Sphere,
            particle_count: DEFAULT_PARTICLE_COUNT,
            radius: DEFAULT_RADIUS,
            primary_color: Rgb::new(0.0, 212.0 / 255.0, 1.0),
            secondary_color: Rgb::new(1.0, 0.0, 170.0 / 255.0),
            animation_speed: 1.0,
            gesture_sensitivity: 1.0,
            gesture_mode: GestureMode::Continuous,
            seed: 0,
        }
    }
}

impl VisualizerSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::MalformedCommand(e.to_string()))?;
        settings.validate()
    }

    /// Reject impossible values; clamp sensitivity into 0-1
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticleCount);
        }
        if !(self.animation_speed.is_finite() && self.animation_speed > 0.0) {
            return Err(ConfigError::InvalidAnimationSpeed(self.animation_speed));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        self.gesture_sensitivity = clamp_sensitivity(self.gesture_sensitivity)?;
        Ok(self)
    }

    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            pattern: self.pattern,
            count: self.particle_count,
            radius: self.radius,
            primary: self.primary_color,
            secondary: self.secondary_color,
            animation_speed: self.animation_speed,
            seed: self.seed,
        }
    }
}

fn clamp_sensitivity(value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(ConfigError::InvalidSensitivity(value))
    }
}

// ============================================================================
// CONTROL COMMANDS
// ============================================================================

/// Typed command issued by the control surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlCommand {
    SetPattern { pattern: PatternKind },
    SetParticleCount { count: usize },
    SetColors { primary: Rgb, secondary: Rgb },
    SetAnimationSpeed { speed: f32 },
    SetGestureSensitivity { sensitivity: f32 },
    SetGestureMode { mode: GestureMode },
}

impl ControlCommand {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let command: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::MalformedCommand(e.to_string()))?;
        command.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        match self {
            ControlCommand::SetParticleCount { count: 0 } => Err(ConfigError::ZeroParticleCount),
            ControlCommand::SetAnimationSpeed { speed } if !(speed.is_finite() && speed > 0.0) => {
                Err(ConfigError::InvalidAnimationSpeed(speed))
            }
            ControlCommand::SetGestureSensitivity { sensitivity } => {
                Ok(ControlCommand::SetGestureSensitivity {
                    sensitivity: clamp_sensitivity(sensitivity)?,
                })
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings = VisualizerSettings::from_json("{}").unwrap();
        assert_eq!(settings, VisualizerSettings::default());
    }

    #[test]
    fn settings_read_camel_case_json() {
        let settings = VisualizerSettings::from_json(
            r##"{"pattern":"galaxy","particleCount":1200,"primaryColor":"#ffffff",
                "gestureSensitivity":1.7,"gestureMode":"threshold","seed":9}"##,
        )
        .unwrap();
        assert_eq!(settings.pattern, PatternKind::Galaxy);
        assert_eq!(settings.particle_count, 1200);
        assert_eq!(settings.primary_color, Rgb::new(1.0, 1.0, 1.0));
        assert_eq!(settings.gesture_sensitivity, 1.0);
        assert_eq!(settings.gesture_mode, GestureMode::Threshold);
        assert_eq!(settings.engine_params().seed, 9);
    }

    #[test]
    fn settings_reject_bad_values() {
        assert_eq!(
            VisualizerSettings::from_json(r#"{"particleCount":0}"#),
            Err(ConfigError::ZeroParticleCount)
        );
        assert!(matches!(
            VisualizerSettings::from_json(r#"{"animationSpeed":0}"#),
            Err(ConfigError::InvalidAnimationSpeed(_))
        ));
        assert!(matches!(
            VisualizerSettings::from_json(r#"{"radius":-2}"#),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            VisualizerSettings::from_json(r#"{"primaryColor":"blue"}"#),
            Err(ConfigError::MalformedCommand(_))
        ));
    }

    #[test]
    fn commands_parse_from_tagged_json() {
        assert_eq!(
            ControlCommand::from_json(r#"{"type":"set_pattern","pattern":"dna"}"#),
            Ok(ControlCommand::SetPattern { pattern: PatternKind::Dna })
        );
        assert_eq!(
            ControlCommand::from_json(
                r##"{"type":"set_colors","primary":"#ff0000","secondary":"#0000ff"}"##
            ),
            Ok(ControlCommand::SetColors {
                primary: Rgb::new(1.0, 0.0, 0.0),
                secondary: Rgb::new(0.0, 0.0, 1.0),
            })
        );
        assert_eq!(
            ControlCommand::from_json(r#"{"type":"set_gesture_mode","mode":"continuous"}"#),
            Ok(ControlCommand::SetGestureMode { mode: GestureMode::Continuous })
        );
    }

    #[test]
    fn commands_are_validated() {
        assert_eq!(
            ControlCommand::from_json(r#"{"type":"set_particle_count","count":0}"#),
            Err(ConfigError::ZeroParticleCount)
        );
        assert!(matches!(
            ControlCommand::from_json(r#"{"type":"set_animation_speed","speed":-1}"#),
            Err(ConfigError::InvalidAnimationSpeed(_))
        ));
        assert_eq!(
            ControlCommand::from_json(r#"{"type":"set_gesture_sensitivity","sensitivity":-0.5}"#),
            Ok(ControlCommand::SetGestureSensitivity { sensitivity: 0.0 })
        );
        assert!(matches!(
            ControlCommand::from_json(r#"{"type":"fullscreen"}"#),
            Err(ConfigError::MalformedCommand(_))
        ));
    }
}
