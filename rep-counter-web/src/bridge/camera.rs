//! Camera acquisition and release
//!
//! The session owns the `MediaStream`; stopping its tracks turns the
//! hardware camera off.

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::error::CameraError;
use crate::session::CameraResource;

/// A `MediaStream` owned by one exercise session
pub struct MediaStreamCamera {
    stream: MediaStream,
    released: bool,
}

impl MediaStreamCamera {
    pub fn new(stream: MediaStream) -> Self {
        Self {
            stream,
            released: false,
        }
    }
}

impl CameraResource for MediaStreamCamera {
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        info!("camera released");
    }
}

// Covers sessions that fail to construct after the stream was handed over
impl Drop for MediaStreamCamera {
    fn drop(&mut self) {
        self.release();
    }
}

/// Request the camera. Rejects with an object `{code, message, remediation}`.
#[wasm_bindgen(js_name = openCamera)]
pub async fn open_camera(facing_mode: Option<String>) -> Result<MediaStream, JsValue> {
    let facing_mode = facing_mode.unwrap_or_else(|| "user".to_string());
    acquire(&facing_mode).await.map_err(|err| {
        warn!(%err, code = err.code(), "camera acquisition failed");
        err.into()
    })
}

async fn acquire(facing_mode: &str) -> Result<MediaStream, CameraError> {
    let window =
        web_sys::window().ok_or_else(|| CameraError::Unavailable("no window".to_string()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::DeviceNotFound)?;

    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &facing_mode.into())
        .map_err(dom_error)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(dom_error)?;
    let stream = JsFuture::from(promise).await.map_err(dom_error)?;

    info!(facing_mode, "camera acquired");
    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| CameraError::Unavailable("getUserMedia returned a non-stream".to_string()))
}

fn dom_error(value: JsValue) -> CameraError {
    match value.dyn_into::<DomException>() {
        Ok(exception) => CameraError::from_dom_name(&exception.name(), &exception.message()),
        Err(other) => CameraError::Unavailable(
            other.as_string().unwrap_or_else(|| "unknown error".to_string()),
        ),
    }
}
