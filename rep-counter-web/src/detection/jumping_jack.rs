//! Jumping-jack detection from wrist height and foot spread
//!
//! Extended: both wrists above the shoulders and ankles wider than
//! `spread × shoulder width`. Closed: neither holds. A rep is one full
//! open-close cycle, counted when the trainee lands back in the closed pose.

use tracing::debug;

use super::{Detection, PosePhase};
use crate::config::DetectorThresholds;
use crate::pose::{distance, BodyLandmarks, VisibilityGate};

/// Jumping-jack rep detector
#[derive(Clone, Debug)]
pub struct JumpingJackDetector {
    gate: VisibilityGate,
    /// Ankle distance must exceed shoulder width times this
    spread_ratio: f32,
    /// Frames inside this window after a counted rep are ignored (ms)
    refractory_ms: f64,
    /// Carried flag: reached the extended pose since the last rep
    opened: bool,
    /// Timestamp of the last counted rep
    last_rep_ms: Option<f64>,
}

impl JumpingJackDetector {
    pub fn new(thresholds: &DetectorThresholds) -> Self {
        Self {
            gate: VisibilityGate::new(thresholds.visibility),
            spread_ratio: thresholds.jack_spread,
            refractory_ms: thresholds.jack_refractory_ms,
            opened: false,
            last_rep_ms: None,
        }
    }

    fn in_refractory(&self, now_ms: f64) -> bool {
        self.last_rep_ms
            .is_some_and(|last| now_ms - last < self.refractory_ms)
    }

    pub fn detect(&mut self, body: &BodyLandmarks, now_ms: f64) -> Detection {
        if !self.gate.all_visible(&body.jack_joints()) {
            return Detection::unrecognized();
        }

        // Image y grows downward: "above" means smaller y
        let arms_up = body.left_wrist.y < body.left_shoulder.y
            && body.right_wrist.y < body.right_shoulder.y;
        let shoulder_width = distance(&body.left_shoulder, &body.right_shoulder);
        let feet_wide =
            distance(&body.left_ankle, &body.right_ankle) > self.spread_ratio * shoulder_width;

        let phase = match (arms_up, feet_wide) {
            (true, true) => PosePhase::Extended,
            (false, false) => PosePhase::Contracted,
            _ => PosePhase::Transitioning,
        };

        if self.in_refractory(now_ms) {
            return Detection::recognized(phase, "Good", false);
        }

        match phase {
            PosePhase::Extended => {
                self.opened = true;
                Detection::recognized(phase, "Now bring arms down and feet together", false)
            }
            PosePhase::Contracted if self.opened => {
                self.opened = false;
                self.last_rep_ms = Some(now_ms);
                debug!(now_ms, "jumping jack rep completed");
                Detection::recognized(phase, "Jump! Arms up, feet apart", true)
            }
            PosePhase::Contracted => {
                Detection::recognized(phase, "Jump! Arms up, feet apart", false)
            }
            _ => {
                let message = if arms_up { "Spread your feet wider" } else { "Raise both arms" };
                Detection::recognized(phase, message, false)
            }
        }
    }

    pub fn reset(&mut self) {
        self.opened = false;
        self.last_rep_ms = None;
    }
}

impl Default for JumpingJackDetector {
    fn default() -> Self {
        Self::new(&DetectorThresholds::default())
    }
}
