//! Joint angle calculation using atan2 bearings
//!
//! Angle at vertex `b` between the bearings b→a and b→c. For a knee that is
//! hip→knee (thigh) and knee→ankle (shin).

use nalgebra::Vector2;

use super::landmarks::Landmark;

fn vector(from: &Landmark, to: &Landmark) -> Vector2<f32> {
    Vector2::new(to.x - from.x, to.y - from.y)
}

/// Calculate the angle at `b` in degrees, always in [0, 180]
///
/// Returns:
/// - ~90° = joint bent at a right angle
/// - 180° = a, b, c colinear with b between them (limb straight)
///
/// Coincident points yield 0 (atan2(0, 0) == 0).
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let to_a = vector(b, a);
    let to_c = vector(b, c);

    let bearing_a = to_a.y.atan2(to_a.x);
    let bearing_c = to_c.y.atan2(to_c.x);

    let mut angle = (bearing_c - bearing_a).to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle.clamp(0.0, 180.0)
}

/// Euclidean distance in normalized image space
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    vector(a, b).norm()
}
