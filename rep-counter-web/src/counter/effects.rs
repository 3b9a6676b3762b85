//! Effects requested by the counter
//!
//! `Cue`s are trainee-facing feedback the JS side plays (speech, beep,
//! vibration). `Schedule` is consumed by the session's timer.

use serde::Serialize;

use super::transition::CounterEvent;

/// Trainee-facing feedback
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "cue", rename_all = "kebab-case")]
pub enum Cue {
    Rep { count: u32 },
    SetComplete { set: u32 },
    RestStarted { seconds: u32 },
    RestCountdown { remaining: u32 },
    #[serde(rename_all = "camelCase")]
    RestOver { next_set: u32 },
    ExerciseComplete,
    /// Completion callback should run now
    Finished,
}

impl Cue {
    /// Text for speech synthesis; `None` means beep only
    pub fn speech(&self) -> Option<String> {
        match self {
            Cue::Rep { count } => Some(count.to_string()),
            Cue::SetComplete { set } => Some(format!("Set {} complete", set)),
            Cue::RestStarted { seconds } => Some(format!("Rest for {} seconds", seconds)),
            Cue::RestCountdown { .. } => None,
            Cue::RestOver { next_set } => Some(format!("Rest over. Start set {}", next_set)),
            Cue::ExerciseComplete => Some("Exercise complete. Well done!".to_string()),
            Cue::Finished => None,
        }
    }

    /// Vibration length in ms; 0 = no vibration
    pub fn haptic_ms(&self) -> u32 {
        match self {
            Cue::Rep { .. } => 50,
            Cue::RestCountdown { .. } => 30,
            Cue::SetComplete { .. } | Cue::RestOver { .. } => 200,
            Cue::ExerciseComplete => 400,
            Cue::RestStarted { .. } | Cue::Finished => 0,
        }
    }
}

/// Everything a transition can ask for
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Cue(Cue),
    /// Deliver `event` after `after_ms`, replacing any pending timer
    Schedule { after_ms: u32, event: CounterEvent },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_cue_speaks_count() {
        assert_eq!(Cue::Rep { count: 7 }.speech().as_deref(), Some("7"));
        assert_eq!(Cue::RestCountdown { remaining: 3 }.speech(), None);
    }

    #[test]
    fn test_cue_serializes_tagged() {
        let json = serde_json::to_value(Cue::RestOver { next_set: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"cue": "rest-over", "nextSet": 2}));
    }
}
