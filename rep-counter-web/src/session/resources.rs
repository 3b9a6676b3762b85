//! Resources a session owns for its whole lifetime

/// Hardware camera handle owned by a session
///
/// Released exactly once, when the session is disposed or dropped.
pub trait CameraResource {
    fn release(&mut self);
}

/// Sessions driven without a camera (replays, tests)
impl CameraResource for () {
    fn release(&mut self) {}
}
