//! Pose module - landmark adapter, joint geometry, visibility gating
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod angles;
mod visibility;

pub use landmarks::{
    BodyLandmarks, Landmark,
    // Constants
    LANDMARK_COUNT, VALUES_PER_LANDMARK,
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
};
pub use angles::{joint_angle, distance};
pub use visibility::VisibilityGate;
