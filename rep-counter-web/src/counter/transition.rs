//! Pure transition function for the rep/set counter
//!
//! Active --rep x target--> SetComplete --display delay--> Resting --0s--> Active (next set)
//!                                      \--last set-----> ExerciseComplete --delay--> Finished cue

use tracing::debug;

use super::effects::{Cue, Effect};
use super::state::{CounterPhase, CounterState};
use crate::config::ExercisePlan;

/// Rest countdown granularity
pub const REST_TICK_MS: u32 = 1000;

/// Countdown cues fire for this many final seconds of rest
pub const COUNTDOWN_CUE_SECONDS: u32 = 5;

/// Inputs to the counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterEvent {
    /// Detector confirmed one repetition
    RepConfirmed,
    /// The set-complete overlay has been up long enough
    SetDisplayElapsed,
    /// One second of rest went by
    RestSecondElapsed,
    /// Pause after "exercise complete" is over
    CompletionDelayElapsed,
}

/// Apply one event. Events that make no sense in the current phase are ignored.
pub fn transition(
    state: &CounterState,
    event: CounterEvent,
    plan: &ExercisePlan,
) -> (CounterState, Vec<Effect>) {
    let mut next = *state;
    let mut effects = Vec::new();

    match (state.phase, event) {
        (CounterPhase::Active, CounterEvent::RepConfirmed) => {
            next.reps += 1;
            effects.push(Effect::Cue(Cue::Rep { count: next.reps }));

            if next.reps >= plan.target_reps {
                next.phase = CounterPhase::SetComplete;
                effects.push(Effect::Cue(Cue::SetComplete { set: next.set }));
                effects.push(Effect::Schedule {
                    after_ms: plan.timings.set_complete_display_ms,
                    event: CounterEvent::SetDisplayElapsed,
                });
            }
        }

        (CounterPhase::SetComplete, CounterEvent::SetDisplayElapsed) => {
            if next.set >= plan.target_sets {
                next.phase = CounterPhase::ExerciseComplete { completion_sent: false };
                effects.push(Effect::Cue(Cue::ExerciseComplete));
                effects.push(Effect::Schedule {
                    after_ms: plan.timings.completion_delay_ms,
                    event: CounterEvent::CompletionDelayElapsed,
                });
            } else if plan.rest_seconds == 0 {
                start_next_set(&mut next, &mut effects);
            } else {
                next.phase = CounterPhase::Resting { remaining_secs: plan.rest_seconds };
                effects.push(Effect::Cue(Cue::RestStarted { seconds: plan.rest_seconds }));
                effects.push(Effect::Schedule {
                    after_ms: REST_TICK_MS,
                    event: CounterEvent::RestSecondElapsed,
                });
            }
        }

        (CounterPhase::Resting { remaining_secs }, CounterEvent::RestSecondElapsed) => {
            let remaining = remaining_secs.saturating_sub(1);
            if remaining == 0 {
                start_next_set(&mut next, &mut effects);
            } else {
                next.phase = CounterPhase::Resting { remaining_secs: remaining };
                if remaining <= COUNTDOWN_CUE_SECONDS {
                    effects.push(Effect::Cue(Cue::RestCountdown { remaining }));
                }
                effects.push(Effect::Schedule {
                    after_ms: REST_TICK_MS,
                    event: CounterEvent::RestSecondElapsed,
                });
            }
        }

        (
            CounterPhase::ExerciseComplete { completion_sent: false },
            CounterEvent::CompletionDelayElapsed,
        ) => {
            next.phase = CounterPhase::ExerciseComplete { completion_sent: true };
            effects.push(Effect::Cue(Cue::Finished));
        }

        _ => {
            debug!(?event, phase = ?state.phase, "event ignored");
            return (next, effects);
        }
    }

    debug!(?event, from = ?state.phase, to = ?next.phase, reps = next.reps, set = next.set, "counter transition");
    (next, effects)
}

fn start_next_set(state: &mut CounterState, effects: &mut Vec<Effect>) {
    state.reps = 0;
    state.set += 1;
    state.phase = CounterPhase::Active;
    effects.push(Effect::Cue(Cue::RestOver { next_set: state.set }));
}
