//! Visibility gate
//!
//! A detector only trusts a frame when every joint it needs is above the
//! confidence threshold. Below it the frame is reported as unrecognized.

use super::landmarks::Landmark;

/// Confidence gate over a group of joints
#[derive(Clone, Debug)]
pub struct VisibilityGate {
    /// Minimum visibility to accept a landmark
    threshold: f32,
}

impl VisibilityGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_visible(&self, landmark: &Landmark) -> bool {
        landmark.visibility >= self.threshold
    }

    /// True when every landmark passes the threshold
    pub fn all_visible(&self, landmarks: &[Landmark]) -> bool {
        landmarks.iter().all(|l| self.is_visible(l))
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let gate = VisibilityGate::default();
        assert!(gate.is_visible(&Landmark::new(0.0, 0.0, 0.5)));
        assert!(!gate.is_visible(&Landmark::new(0.0, 0.0, 0.49)));
    }

    #[test]
    fn test_one_weak_landmark_fails_the_group() {
        let gate = VisibilityGate::default();
        let group = [
            Landmark::new(0.1, 0.1, 0.9),
            Landmark::new(0.2, 0.2, 0.3),
            Landmark::new(0.3, 0.3, 0.9),
        ];
        assert!(!gate.all_visible(&group));
        assert!(gate.all_visible(&group[..1]));
    }
}
