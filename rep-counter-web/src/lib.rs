//! Rep Counter Web - pose-based rep and set counting
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The pose model runs in JavaScript; this crate turns its landmarks into
//! reps, sets and rest periods for the trainee's camera-tracked tasks.

mod bridge;
mod logging;

pub mod config;
pub mod counter;
pub mod detection;
pub mod error;
pub mod pose;
pub mod session;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{create_session, open_camera, MediaStreamCamera, SessionHandle};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    logging::init(level);
}

/// Joint angle in degrees at `b`, for overlay debugging
#[wasm_bindgen(js_name = jointAngle)]
pub fn joint_angle(ax: f32, ay: f32, bx: f32, by: f32, cx: f32, cy: f32) -> f32 {
    let point = |x, y| pose::Landmark::new(x, y, 1.0);
    pose::joint_angle(&point(ax, ay), &point(bx, by), &point(cx, cy))
}
