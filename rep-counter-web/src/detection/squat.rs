//! Squat detection from knee angles
//!
//! Two thresholds instead of one: the knees must drop below `bent` before a
//! rise above `extended` counts. Jitter around either cutoff cannot produce a
//! second rep.

use tracing::debug;

use super::{Detection, PosePhase};
use crate::config::DetectorThresholds;
use crate::pose::{joint_angle, BodyLandmarks, VisibilityGate};

/// Squat rep detector
#[derive(Clone, Debug)]
pub struct SquatDetector {
    gate: VisibilityGate,
    /// Both knees below this = bottom position (degrees)
    bent_threshold: f32,
    /// Both knees above this = standing (degrees)
    extended_threshold: f32,
    /// Carried flag: trainee reached the bottom and has not stood up yet
    bent: bool,
}

impl SquatDetector {
    pub fn new(thresholds: &DetectorThresholds) -> Self {
        Self {
            gate: VisibilityGate::new(thresholds.visibility),
            bent_threshold: thresholds.squat_bent,
            extended_threshold: thresholds.squat_extended,
            bent: false,
        }
    }

    /// Left and right knee angles in degrees
    pub fn knee_angles(body: &BodyLandmarks) -> (f32, f32) {
        (
            joint_angle(&body.left_hip, &body.left_knee, &body.left_ankle),
            joint_angle(&body.right_hip, &body.right_knee, &body.right_ankle),
        )
    }

    pub fn detect(&mut self, body: &BodyLandmarks) -> Detection {
        if !self.gate.all_visible(&body.legs()) {
            return Detection::unrecognized();
        }

        let (left, right) = Self::knee_angles(body);
        let both_bent = left < self.bent_threshold && right < self.bent_threshold;
        let both_extended = left > self.extended_threshold && right > self.extended_threshold;

        if both_bent {
            self.bent = true;
            return Detection::recognized(PosePhase::Contracted, "Now stand up", false);
        }

        if both_extended {
            let rep_completed = self.bent;
            if rep_completed {
                debug!(left, right, "squat rep completed");
            }
            self.bent = false;
            return Detection::recognized(PosePhase::Extended, "Squat down", rep_completed);
        }

        let message = if self.bent { "Keep rising" } else { "Go lower" };
        Detection::recognized(PosePhase::Transitioning, message, false)
    }

    pub fn reset(&mut self) {
        self.bent = false;
    }
}

impl Default for SquatDetector {
    fn default() -> Self {
        Self::new(&DetectorThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::fixtures::squat_frame;

    fn count_reps(detector: &mut SquatDetector, angles: &[f32]) -> usize {
        angles
            .iter()
            .filter(|&&angle| detector.detect(&squat_frame(angle)).rep_completed)
            .count()
    }

    #[test]
    fn test_fixture_produces_requested_angle() {
        let (left, right) = SquatDetector::knee_angles(&squat_frame(90.0));
        assert!((left - 90.0).abs() < 0.1);
        assert!((right - 90.0).abs() < 0.1);
    }

    #[test]
    fn test_bent_then_extended_is_one_rep() {
        let mut detector = SquatDetector::default();
        assert_eq!(count_reps(&mut detector, &[90.0, 170.0]), 1);
    }

    #[test]
    fn test_pause_mid_transition_is_still_one_rep() {
        let mut detector = SquatDetector::default();
        assert_eq!(count_reps(&mut detector, &[90.0, 130.0, 170.0]), 1);
    }

    #[test]
    fn test_jitter_around_threshold_does_not_double_count() {
        let mut detector = SquatDetector::default();
        let angles = [170.0, 100.0, 118.0, 125.0, 119.0, 140.0, 149.0, 155.0, 148.0, 152.0, 170.0];
        assert_eq!(count_reps(&mut detector, &angles), 1);
    }

    #[test]
    fn test_standing_alone_never_counts() {
        let mut detector = SquatDetector::default();
        assert_eq!(count_reps(&mut detector, &[170.0, 175.0, 160.0, 170.0]), 0);
    }

    #[test]
    fn test_shallow_squat_does_not_count() {
        let mut detector = SquatDetector::default();
        assert_eq!(count_reps(&mut detector, &[170.0, 130.0, 170.0]), 0);
    }

    #[test]
    fn test_low_visibility_is_unrecognized_regardless_of_geometry() {
        let mut detector = SquatDetector::default();
        let mut frame = squat_frame(90.0);
        frame.right_ankle.visibility = 0.4;
        let detection = detector.detect(&frame);
        assert!(!detection.recognized);
        assert_eq!(detection.phase, PosePhase::Unknown);
    }

    #[test]
    fn test_dropout_keeps_carried_flag() {
        let mut detector = SquatDetector::default();
        detector.detect(&squat_frame(90.0));

        let mut hidden = squat_frame(100.0);
        hidden.left_hip.visibility = 0.1;
        assert!(!detector.detect(&hidden).recognized);

        assert!(detector.detect(&squat_frame(170.0)).rep_completed);
    }

    #[test]
    fn test_phases() {
        let mut detector = SquatDetector::default();
        assert_eq!(detector.detect(&squat_frame(170.0)).phase, PosePhase::Extended);
        assert_eq!(detector.detect(&squat_frame(135.0)).phase, PosePhase::Transitioning);
        assert_eq!(detector.detect(&squat_frame(95.0)).phase, PosePhase::Contracted);
    }
}
