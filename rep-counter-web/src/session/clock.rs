//! Single time source for a session
//!
//! Frames, timer ticks and session creation must all be stamped by the same
//! clock, otherwise scheduled deadlines and the times they are checked
//! against live in different domains. `ClockedSession` reads every
//! timestamp from one `Clock` and never accepts one from the caller.

use super::events::{SessionEvent, SessionSnapshot, SessionSummary};
use super::exercise::ExerciseSession;
use super::resources::CameraResource;
use crate::config::ExerciseConfig;
use crate::error::ConfigError;
use crate::pose::BodyLandmarks;

/// Monotonic-enough millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// An `ExerciseSession` whose frames and ticks share one clock
pub struct ClockedSession<C: CameraResource, K: Clock> {
    session: ExerciseSession<C>,
    clock: K,
}

impl<C: CameraResource, K: Clock> ClockedSession<C, K> {
    pub fn new(config: ExerciseConfig, camera: C, clock: K) -> Result<Self, ConfigError> {
        let session = ExerciseSession::new(config, camera, clock.now_ms())?;
        Ok(Self { session, clock })
    }

    pub fn feed_frame(&mut self, body: Option<&BodyLandmarks>) -> Vec<SessionEvent> {
        let now = self.clock.now_ms();
        self.session.feed_frame(body, now)
    }

    /// Timer tick
    pub fn advance(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now_ms();
        self.session.advance(now)
    }

    pub fn dispose(&mut self) {
        self.session.dispose();
    }

    pub fn session(&self) -> &ExerciseSession<C> {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn summary(&self) -> &SessionSummary {
        self.session.summary()
    }
}
