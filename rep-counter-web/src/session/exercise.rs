//! ExerciseSession - detector + counter + timer + camera for one exercise
//!
//! Frames and clock ticks are the only inputs. All timestamps are caller
//! supplied milliseconds, so the session never reads a clock itself;
//! `ClockedSession` stamps them all from one source.

use tracing::{debug, info};

use super::events::{SessionEvent, SessionSnapshot, SessionSummary};
use super::resources::CameraResource;
use crate::config::ExerciseConfig;
use crate::counter::{transition, CounterEvent, CounterState, Cue, Effect};
use crate::detection::ExerciseDetector;
use crate::error::ConfigError;
use crate::pose::BodyLandmarks;

/// The one pending timer. Scheduling replaces it.
#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    due_ms: f64,
    event: CounterEvent,
}

/// One active camera-tracked exercise
pub struct ExerciseSession<C: CameraResource> {
    config: ExerciseConfig,
    detector: ExerciseDetector,
    counter: CounterState,
    timer: Option<PendingTimer>,
    /// `None` once released
    camera: Option<C>,
    disposed: bool,
    summary: SessionSummary,
}

impl<C: CameraResource> ExerciseSession<C> {
    pub fn new(config: ExerciseConfig, camera: C, now_ms: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            kind = config.kind.name(),
            target_reps = config.plan.target_reps,
            target_sets = config.plan.target_sets,
            "exercise session created"
        );

        Ok(Self {
            detector: ExerciseDetector::new(config.kind, &config.thresholds),
            config,
            counter: CounterState::initial(),
            timer: None,
            camera: Some(camera),
            disposed: false,
            summary: SessionSummary {
                started_at_ms: now_ms,
                ..SessionSummary::default()
            },
        })
    }

    /// Process one frame. `None` = the landmark provider found no body.
    pub fn feed_frame(&mut self, body: Option<&BodyLandmarks>, now_ms: f64) -> Vec<SessionEvent> {
        let mut events = self.advance(now_ms);
        if self.disposed || !self.counter.detection_active() {
            return events;
        }

        let detection = self.detector.detect(body, now_ms);
        let rep_completed = detection.rep_completed;
        events.push(SessionEvent::Feedback(detection));

        if rep_completed {
            self.apply(CounterEvent::RepConfirmed, now_ms, &mut events);
        }
        events
    }

    /// Fire every timer due at or before `now_ms`, oldest first
    pub fn advance(&mut self, now_ms: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.disposed {
            return events;
        }

        while let Some(timer) = self.timer {
            if timer.due_ms > now_ms {
                break;
            }
            self.timer = None;
            // Reschedule from the due time so a late tick does not drift the countdown
            self.apply(timer.event, timer.due_ms, &mut events);
        }
        events
    }

    fn apply(&mut self, event: CounterEvent, at_ms: f64, events: &mut Vec<SessionEvent>) {
        let previous = self.counter;
        let (next, effects) = transition(&previous, event, &self.config.plan);
        self.counter = next;

        for effect in effects {
            match effect {
                Effect::Cue(cue) => {
                    self.record(&cue, at_ms);
                    events.push(SessionEvent::cue(cue));
                }
                Effect::Schedule { after_ms, event } => {
                    self.timer = Some(PendingTimer {
                        due_ms: at_ms + f64::from(after_ms),
                        event,
                    });
                }
            }
        }

        // Half-finished poses never carry across a set boundary or a rest
        if previous.detection_active() != next.detection_active() || previous.set != next.set {
            self.detector.reset();
        }
    }

    fn record(&mut self, cue: &Cue, at_ms: f64) {
        match cue {
            Cue::Rep { .. } => self.summary.total_reps += 1,
            Cue::SetComplete { .. } => self.summary.sets_completed += 1,
            Cue::ExerciseComplete => {
                self.summary.finished_at_ms = Some(at_ms);
                info!(
                    total_reps = self.summary.total_reps,
                    sets = self.summary.sets_completed,
                    "exercise complete"
                );
            }
            _ => {}
        }
    }

    /// Cancel the timer and release the camera. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.timer = None;
        if let Some(mut camera) = self.camera.take() {
            camera.release();
        }
        info!(total_reps = self.summary.total_reps, "exercise session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn counter(&self) -> &CounterState {
        &self.counter
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// When the next timer fires, if any
    pub fn next_deadline(&self) -> Option<f64> {
        self.timer.map(|t| t.due_ms)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            kind: self.config.kind,
            reps: self.counter.reps,
            set: self.counter.set,
            target_reps: self.config.plan.target_reps,
            target_sets: self.config.plan.target_sets,
            phase: self.counter.phase,
            rest_remaining: self.counter.rest_remaining(),
            detection_active: !self.disposed && self.counter.detection_active(),
            disposed: self.disposed,
        }
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}

impl<C: CameraResource> Drop for ExerciseSession<C> {
    fn drop(&mut self) {
        debug!("dropping exercise session");
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExerciseKind;
    use crate::counter::CounterPhase;
    use crate::detection::fixtures::{jack_frame, squat_frame};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how many times it was released
    struct FakeCamera(Rc<Cell<u32>>);

    impl CameraResource for FakeCamera {
        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn session(reps: u32, sets: u32, rest: u32) -> (ExerciseSession<FakeCamera>, Rc<Cell<u32>>) {
        let released = Rc::new(Cell::new(0));
        let config = ExerciseConfig::new(ExerciseKind::Squat, reps, sets, rest);
        let session = ExerciseSession::new(config, FakeCamera(released.clone()), 0.0).unwrap();
        (session, released)
    }

    /// Feed `n` bent/extended squat cycles starting at `t`, 100ms per frame
    fn squat_cycles(session: &mut ExerciseSession<FakeCamera>, n: u32, t: &mut f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            for angle in [90.0, 170.0] {
                events.extend(session.feed_frame(Some(&squat_frame(angle)), *t));
                *t += 100.0;
            }
        }
        events
    }

    fn cues(events: &[SessionEvent]) -> Vec<Cue> {
        events.iter().filter_map(|e| e.as_cue().cloned()).collect()
    }

    #[test]
    fn test_reps_below_target() {
        let (mut session, _) = session(10, 2, 30);
        let mut t = 0.0;
        let events = squat_cycles(&mut session, 4, &mut t);

        assert_eq!(session.counter().reps, 4);
        assert_eq!(session.counter().phase, CounterPhase::Active);
        assert_eq!(cues(&events).last(), Some(&Cue::Rep { count: 4 }));
    }

    #[test]
    fn test_full_exercise_flow() {
        let (mut session, released) = session(3, 2, 10);
        let mut t = 0.0;

        squat_cycles(&mut session, 3, &mut t);
        assert_eq!(session.counter().phase, CounterPhase::SetComplete);
        let set_done_at = t - 100.0;
        assert_eq!(session.next_deadline(), Some(set_done_at + 2000.0));

        // Detection is suspended: more squats change nothing
        let events = squat_cycles(&mut session, 2, &mut t);
        assert!(events.iter().all(|e| e.as_cue().is_none()));
        assert_eq!(session.counter().reps, 3);

        // Display delay elapses: resting with the configured countdown
        session.advance(set_done_at + 2000.0);
        assert_eq!(session.counter().phase, CounterPhase::Resting { remaining_secs: 10 });
        assert!(!session.snapshot().detection_active);

        // Whole rest elapses in one late tick: every second still fires
        let events = session.advance(set_done_at + 2000.0 + 10_000.0);
        let countdown = cues(&events)
            .iter()
            .filter(|c| matches!(c, Cue::RestCountdown { .. }))
            .count();
        assert_eq!(countdown, 5);
        assert_eq!(session.counter().phase, CounterPhase::Active);
        assert_eq!(session.counter().set, 2);
        assert_eq!(session.counter().reps, 0);

        // Final set
        let mut t = set_done_at + 12_100.0;
        squat_cycles(&mut session, 3, &mut t);
        let events = session.advance(t + 2000.0);
        assert_eq!(cues(&events), vec![Cue::ExerciseComplete]);
        assert!(session.counter().is_complete());

        let events = session.advance(t + 4000.0);
        assert_eq!(cues(&events), vec![Cue::Finished]);
        assert_eq!(session.next_deadline(), None);

        let summary = session.summary();
        assert_eq!(summary.total_reps, 6);
        assert_eq!(summary.sets_completed, 2);
        assert!(summary.finished_at_ms.is_some());

        session.dispose();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (mut session, released) = session(5, 1, 10);
        session.dispose();
        session.dispose();
        assert_eq!(released.get(), 1);
        assert!(session.is_disposed());

        drop(session);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_drop_releases_camera() {
        let (session, released) = session(5, 1, 10);
        drop(session);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_disposed_session_ignores_input_and_timers() {
        let (mut session, _) = session(1, 2, 10);
        let mut t = 0.0;
        squat_cycles(&mut session, 1, &mut t);
        assert!(session.next_deadline().is_some());

        session.dispose();
        assert_eq!(session.next_deadline(), None);
        assert!(session.advance(1_000_000.0).is_empty());
        assert!(session.feed_frame(Some(&squat_frame(90.0)), 1_000_100.0).is_empty());
        assert_eq!(session.counter().phase, CounterPhase::SetComplete);
    }

    #[test]
    fn test_missing_body_reports_reposition_without_reset() {
        let (mut session, _) = session(5, 1, 10);
        let mut t = 0.0;
        squat_cycles(&mut session, 2, &mut t);

        let events = session.feed_frame(None, t);
        match &events[..] {
            [SessionEvent::Feedback(detection)] => assert!(!detection.recognized),
            other => panic!("unexpected events: {:?}", other),
        }
        assert_eq!(session.counter().reps, 2);

        squat_cycles(&mut session, 1, &mut t);
        assert_eq!(session.counter().reps, 3);
    }

    #[test]
    fn test_jumping_jack_session() {
        let config = ExerciseConfig::new(ExerciseKind::JumpingJack, 2, 1, 5);
        let mut session = ExerciseSession::new(config, (), 0.0).unwrap();
        let frames = [
            (jack_frame(false, false), 0.0),
            (jack_frame(true, true), 300.0),
            (jack_frame(false, false), 600.0),
            (jack_frame(true, true), 1200.0),
            (jack_frame(false, false), 1500.0),
        ];
        for (frame, t) in &frames {
            session.feed_frame(Some(frame), *t);
        }
        assert_eq!(session.counter().reps, 2);
        assert_eq!(session.counter().phase, CounterPhase::SetComplete);
    }

    #[test]
    fn test_invalid_config_creates_no_session() {
        let released = Rc::new(Cell::new(0));
        let config = ExerciseConfig::new(ExerciseKind::Squat, 0, 1, 10);
        assert!(ExerciseSession::new(config, FakeCamera(released), 0.0).is_err());
    }

    #[test]
    fn test_snapshot_serializes_flat_phase() {
        let (session, _) = session(5, 2, 10);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["phase"], "active");
        assert_eq!(json["targetReps"], 5);
        assert_eq!(json["detectionActive"], true);
    }
}
