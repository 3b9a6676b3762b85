//! Events and read-only views handed back to the caller

use serde::Serialize;

use crate::config::ExerciseKind;
use crate::counter::{CounterPhase, Cue};
use crate::detection::Detection;

/// What a frame or a timer tick produced
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum SessionEvent {
    /// Per-frame detector result (pose guidance for the overlay)
    Feedback(Detection),
    /// Feedback the caller plays: speech, vibration, beep
    #[serde(rename_all = "camelCase")]
    Cue {
        cue: Cue,
        speech: Option<String>,
        haptic_ms: u32,
    },
}

impl SessionEvent {
    pub fn cue(cue: Cue) -> Self {
        SessionEvent::Cue {
            speech: cue.speech(),
            haptic_ms: cue.haptic_ms(),
            cue,
        }
    }

    pub fn as_cue(&self) -> Option<&Cue> {
        match self {
            SessionEvent::Cue { cue, .. } => Some(cue),
            SessionEvent::Feedback(_) => None,
        }
    }
}

/// Current progress, for rendering the counter overlay
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub kind: ExerciseKind,
    pub reps: u32,
    pub set: u32,
    pub target_reps: u32,
    pub target_sets: u32,
    #[serde(flatten)]
    pub phase: CounterPhase,
    pub rest_remaining: Option<u32>,
    pub detection_active: bool,
    pub disposed: bool,
}

/// Totals for the finished (or abandoned) session
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_reps: u32,
    pub sets_completed: u32,
    pub started_at_ms: f64,
    pub finished_at_ms: Option<f64>,
}
