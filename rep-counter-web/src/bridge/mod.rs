//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod camera;
mod session_handle;

pub use camera::{open_camera, MediaStreamCamera};
pub use session_handle::{create_session, SessionHandle};
