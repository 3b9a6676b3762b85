//! Counter module - rep/set state machine
//!
//! `transition` is pure: it takes the current state and one event and
//! returns the next state plus the effects the caller must run. Audio,
//! speech, vibration and timers all live outside.

mod state;
mod effects;
mod transition;

pub use state::{CounterPhase, CounterState};
pub use effects::{Cue, Effect};
pub use transition::{transition, CounterEvent, COUNTDOWN_CUE_SECONDS, REST_TICK_MS};
