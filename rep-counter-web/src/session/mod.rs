//! Session module - one active camera-tracked exercise
//!
//! Re-exports only. All logic in submodules.

mod events;
mod resources;
mod exercise;
mod clock;

pub use events::{SessionEvent, SessionSnapshot, SessionSummary};
pub use resources::CameraResource;
pub use exercise::ExerciseSession;
pub use clock::{Clock, ClockedSession};
