//! Counter state - tagged phase plus rep and set numbers

use serde::Serialize;

/// Which part of the exercise the trainee is in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum CounterPhase {
    /// Detecting reps
    Active,
    /// Set finished, overlay shown, detection suspended
    SetComplete,
    /// Counting down to the next set
    #[serde(rename_all = "camelCase")]
    Resting { remaining_secs: u32 },
    /// Terminal. `completion_sent` flips once the completion callback fired
    #[serde(rename_all = "camelCase")]
    ExerciseComplete { completion_sent: bool },
}

/// Counter state for one exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterState {
    pub phase: CounterPhase,
    /// Reps in the current set, never above the per-set target
    pub reps: u32,
    /// 1-based set number, never above the target set count
    pub set: u32,
}

impl CounterState {
    pub fn initial() -> Self {
        Self {
            phase: CounterPhase::Active,
            reps: 0,
            set: 1,
        }
    }

    /// Detection runs only while active
    pub fn detection_active(&self) -> bool {
        self.phase == CounterPhase::Active
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, CounterPhase::ExerciseComplete { .. })
    }

    pub fn rest_remaining(&self) -> Option<u32> {
        match self.phase {
            CounterPhase::Resting { remaining_secs } => Some(remaining_secs),
            _ => None,
        }
    }
}

impl Default for CounterState {
    fn default() -> Self {
        Self::initial()
    }
}
