//! Detection module - per-exercise rep recognition
//!
//! Each detector is a pure function of the current landmarks plus one
//! carried flag from previous frames. None of them own the camera.

mod squat;
mod jumping_jack;

pub use squat::SquatDetector;
pub use jumping_jack::JumpingJackDetector;

use serde::Serialize;

use crate::config::{DetectorThresholds, ExerciseKind};
use crate::pose::BodyLandmarks;

/// Shown whenever the required joints are missing or low-confidence
pub const REPOSITION_MESSAGE: &str = "Show your full body to the camera";

/// Where the body is within one repetition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PosePhase {
    Unknown,
    Contracted,
    Transitioning,
    Extended,
}

/// Result of running a detector on one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub recognized: bool,
    pub phase: PosePhase,
    pub message: String,
    /// This frame completed a repetition
    pub rep_completed: bool,
}

impl Detection {
    pub fn unrecognized() -> Self {
        Self {
            recognized: false,
            phase: PosePhase::Unknown,
            message: REPOSITION_MESSAGE.to_string(),
            rep_completed: false,
        }
    }

    pub(crate) fn recognized(phase: PosePhase, message: &str, rep_completed: bool) -> Self {
        Self {
            recognized: true,
            phase,
            message: message.to_string(),
            rep_completed,
        }
    }
}

/// Detector for whichever exercise the session tracks
#[derive(Clone, Debug)]
pub enum ExerciseDetector {
    Squat(SquatDetector),
    JumpingJack(JumpingJackDetector),
}

impl ExerciseDetector {
    pub fn new(kind: ExerciseKind, thresholds: &DetectorThresholds) -> Self {
        match kind {
            ExerciseKind::Squat => ExerciseDetector::Squat(SquatDetector::new(thresholds)),
            ExerciseKind::JumpingJack => {
                ExerciseDetector::JumpingJack(JumpingJackDetector::new(thresholds))
            }
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseDetector::Squat(_) => ExerciseKind::Squat,
            ExerciseDetector::JumpingJack(_) => ExerciseKind::JumpingJack,
        }
    }

    /// Run detection on one frame; `None` means no body was found
    pub fn detect(&mut self, body: Option<&BodyLandmarks>, now_ms: f64) -> Detection {
        let Some(body) = body else {
            return Detection::unrecognized();
        };
        match self {
            ExerciseDetector::Squat(detector) => detector.detect(body),
            ExerciseDetector::JumpingJack(detector) => detector.detect(body, now_ms),
        }
    }

    /// Forget the carried pose flag (new set)
    pub fn reset(&mut self) {
        match self {
            ExerciseDetector::Squat(detector) => detector.reset(),
            ExerciseDetector::JumpingJack(detector) => detector.reset(),
        }
    }
}

/// Synthetic frames for tests
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::pose::{BodyLandmarks, Landmark};

    fn visible(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.95)
    }

    /// Standing trainee whose knees are both bent to `knee_angle` degrees
    pub fn squat_frame(knee_angle: f32) -> BodyLandmarks {
        let leg = |x: f32| {
            let hip = visible(x, 0.4);
            let knee = visible(x, 0.6);
            // Thigh points straight up from the knee; rotate the shin away from it
            let bearing = (-90.0 + knee_angle).to_radians();
            let ankle = visible(x + 0.2 * bearing.cos(), 0.6 + 0.2 * bearing.sin());
            (hip, knee, ankle)
        };
        let (left_hip, left_knee, left_ankle) = leg(0.45);
        let (right_hip, right_knee, right_ankle) = leg(0.55);

        BodyLandmarks {
            left_shoulder: visible(0.42, 0.2),
            right_shoulder: visible(0.58, 0.2),
            left_wrist: visible(0.4, 0.4),
            right_wrist: visible(0.6, 0.4),
            left_hip,
            right_hip,
            left_knee,
            right_knee,
            left_ankle,
            right_ankle,
        }
    }

    /// Jumping-jack frame; shoulders are 0.2 apart at y = 0.3
    pub fn jack_frame(arms_up: bool, feet_apart: bool) -> BodyLandmarks {
        let wrist_y = if arms_up { 0.1 } else { 0.5 };
        let ankle_offset = if feet_apart { 0.2 } else { 0.05 };

        BodyLandmarks {
            left_shoulder: visible(0.4, 0.3),
            right_shoulder: visible(0.6, 0.3),
            left_wrist: visible(0.35, wrist_y),
            right_wrist: visible(0.65, wrist_y),
            left_hip: visible(0.45, 0.55),
            right_hip: visible(0.55, 0.55),
            left_knee: visible(0.5 - ankle_offset, 0.72),
            right_knee: visible(0.5 + ankle_offset, 0.72),
            left_ankle: visible(0.5 - ankle_offset, 0.9),
            right_ankle: visible(0.5 + ankle_offset, 0.9),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::squat_frame;
    use super::*;

    #[test]
    fn test_missing_body_is_unrecognized() {
        let mut detector = ExerciseDetector::new(ExerciseKind::Squat, &DetectorThresholds::default());
        let detection = detector.detect(None, 0.0);
        assert!(!detection.recognized);
        assert_eq!(detection.message, REPOSITION_MESSAGE);
        assert!(!detection.rep_completed);
    }

    #[test]
    fn test_dispatches_on_kind() {
        let thresholds = DetectorThresholds::default();
        assert_eq!(ExerciseDetector::new(ExerciseKind::Squat, &thresholds).kind(), ExerciseKind::Squat);
        assert_eq!(
            ExerciseDetector::new(ExerciseKind::JumpingJack, &thresholds).kind(),
            ExerciseKind::JumpingJack
        );
    }

    #[test]
    fn test_reset_drops_half_rep() {
        let mut detector = ExerciseDetector::new(ExerciseKind::Squat, &DetectorThresholds::default());
        detector.detect(Some(&squat_frame(90.0)), 0.0);
        detector.reset();
        let detection = detector.detect(Some(&squat_frame(170.0)), 33.0);
        assert!(!detection.rep_completed);
    }
}
