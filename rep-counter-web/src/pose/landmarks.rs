//! Landmark adapter
//!
//! The pose library hands JS a list of 33 landmarks; JS flattens it into a
//! Float32Array of `x, y, z, visibility` per landmark. This module turns that
//! array into named joints so the detectors never touch raw indices.

use serde::{Deserialize, Serialize};

use crate::error::LandmarkError;

// ============================================================================
// LANDMARK INDICES (33-point body model)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;
pub const VALUES_PER_LANDMARK: usize = 4;

pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 2D landmark (normalized image coordinates, y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,  // 0-1 normalized
    pub y: f32,  // 0-1 normalized
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }
}

/// The joints the exercise detectors care about, one field per joint
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyLandmarks {
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_wrist: Landmark,
    pub right_wrist: Landmark,
    pub left_hip: Landmark,
    pub right_hip: Landmark,
    pub left_knee: Landmark,
    pub right_knee: Landmark,
    pub left_ankle: Landmark,
    pub right_ankle: Landmark,
}

impl BodyLandmarks {
    /// Adapt the flat `[x, y, z, visibility] × 33` array
    ///
    /// Returns `Ok(None)` for an empty slice, which is how JS reports a frame
    /// with no detected body.
    pub fn from_flat(data: &[f32]) -> Result<Option<Self>, LandmarkError> {
        if data.is_empty() {
            return Ok(None);
        }

        let expected = LANDMARK_COUNT * VALUES_PER_LANDMARK;
        if data.len() != expected {
            return Err(LandmarkError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }

        let at = |index: usize| {
            let base = index * VALUES_PER_LANDMARK;
            // z at base + 2 is unused by the 2D detectors
            Landmark {
                x: data[base],
                y: data[base + 1],
                visibility: data[base + 3],
            }
        };

        Ok(Some(Self {
            left_shoulder: at(LEFT_SHOULDER),
            right_shoulder: at(RIGHT_SHOULDER),
            left_wrist: at(LEFT_WRIST),
            right_wrist: at(RIGHT_WRIST),
            left_hip: at(LEFT_HIP),
            right_hip: at(RIGHT_HIP),
            left_knee: at(LEFT_KNEE),
            right_knee: at(RIGHT_KNEE),
            left_ankle: at(LEFT_ANKLE),
            right_ankle: at(RIGHT_ANKLE),
        }))
    }

    /// Hip/knee/ankle on both legs
    pub fn legs(&self) -> [Landmark; 6] {
        [
            self.left_hip, self.left_knee, self.left_ankle,
            self.right_hip, self.right_knee, self.right_ankle,
        ]
    }

    /// Shoulder/wrist/ankle on both sides
    pub fn jack_joints(&self) -> [Landmark; 6] {
        [
            self.left_shoulder, self.left_wrist, self.left_ankle,
            self.right_shoulder, self.right_wrist, self.right_ankle,
        ]
    }
}
