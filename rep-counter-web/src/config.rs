//! Exercise configuration passed from the task page
//!
//! Deserialized from JSON with camelCase keys. Everything except the
//! exercise kind and targets has a default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Camera-tracked exercise types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Squat,
    JumpingJack,
}

impl ExerciseKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squat",
            ExerciseKind::JumpingJack => "Jumping Jack",
        }
    }
}

/// Detector tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorThresholds {
    /// Minimum landmark visibility to accept a joint
    pub visibility: f32,
    /// Both knees below this angle = bottom of the squat (degrees)
    pub squat_bent: f32,
    /// Both knees above this angle = standing (degrees)
    pub squat_extended: f32,
    /// Ankle spread must exceed shoulder width times this
    pub jack_spread: f32,
    /// Frames inside this window after a counted jack are ignored
    pub jack_refractory_ms: f64,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            visibility: 0.5,
            squat_bent: 120.0,
            squat_extended: 150.0,
            jack_spread: 1.5,
            jack_refractory_ms: 500.0,
        }
    }
}

/// Delays between counter phases
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timings {
    /// How long the "set complete" overlay stays up
    pub set_complete_display_ms: u32,
    /// Pause between "exercise complete" and the completion callback
    pub completion_delay_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            set_complete_display_ms: 2000,
            completion_delay_ms: 2000,
        }
    }
}

/// Targets the counter works towards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePlan {
    pub target_reps: u32,
    pub target_sets: u32,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
    #[serde(default)]
    pub timings: Timings,
}

fn default_rest_seconds() -> u32 {
    30
}

/// Full configuration for one session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseConfig {
    pub kind: ExerciseKind,
    #[serde(flatten)]
    pub plan: ExercisePlan,
    #[serde(default)]
    pub thresholds: DetectorThresholds,
}

impl ExerciseConfig {
    pub fn new(kind: ExerciseKind, target_reps: u32, target_sets: u32, rest_seconds: u32) -> Self {
        Self {
            kind,
            plan: ExercisePlan {
                target_reps,
                target_sets,
                rest_seconds,
                timings: Timings::default(),
            },
            thresholds: DetectorThresholds::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ExerciseConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plan.target_reps == 0 {
            return Err(ConfigError::ZeroTarget { field: "targetReps" });
        }
        if self.plan.target_sets == 0 {
            return Err(ConfigError::ZeroTarget { field: "targetSets" });
        }

        let t = &self.thresholds;
        if !(t.visibility > 0.0 && t.visibility <= 1.0) {
            return Err(ConfigError::VisibilityOutOfRange(t.visibility));
        }
        if t.squat_bent >= t.squat_extended {
            return Err(ConfigError::InvertedThresholds {
                bent: t.squat_bent,
                extended: t.squat_extended,
            });
        }
        if t.jack_spread <= 0.0 {
            return Err(ConfigError::NonPositiveSpread(t.jack_spread));
        }
        Ok(())
    }
}
