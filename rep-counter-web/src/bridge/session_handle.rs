//! Session handle exported to JS
//!
//! JS calls `feedFrame` once per processed video frame and gets that
//! frame's events back. Timer-driven events (set overlay, rest countdown,
//! completion) arrive through the `onEvent` callback from a ticker owned by
//! the handle, so the ticker can never outlive the session.
//!
//! Every timestamp (creation, frames, ticks) comes from `Date.now()`; JS
//! never passes one in.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MediaStream;

use super::camera::MediaStreamCamera;
use crate::config::ExerciseConfig;
use crate::pose::BodyLandmarks;
use crate::session::{Clock, ClockedSession, SessionEvent};

/// How often the ticker checks for due timers
const TICK_INTERVAL_MS: i32 = 250;

/// Wall clock shared by frames and the ticker
struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

type SharedSession = Rc<RefCell<ClockedSession<MediaStreamCamera, BrowserClock>>>;

/// Serialize through JSON; keeps the wasm surface to plain objects
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn dispatch(on_event: &js_sys::Function, events: &[SessionEvent]) {
    for event in events {
        let result = to_js(event).and_then(|value| on_event.call1(&JsValue::NULL, &value));
        if let Err(err) = result {
            warn!(?err, "onEvent callback failed");
        }
    }
}

/// setInterval registration that advances the session clock
struct Ticker {
    interval_id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Ticker {
    fn start(session: SharedSession, on_event: js_sys::Function) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window found"))?;

        let callback = Closure::<dyn FnMut()>::new(move || {
            // Collect first, dispatch after the borrow ends: onEvent may call back into the handle
            let events = match session.try_borrow_mut() {
                Ok(mut session) => session.advance(),
                Err(_) => return,
            };
            dispatch(&on_event, &events);
        });

        let interval_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        )?;

        Ok(Self {
            interval_id: Some(interval_id),
            _callback: callback,
        })
    }

    /// Clear the interval. The closure itself stays alive until the handle
    /// is freed, since `stop` may run from inside it.
    fn stop(&mut self) {
        if let (Some(id), Some(window)) = (self.interval_id.take(), web_sys::window()) {
            window.clear_interval_with_handle(id);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One exercise session, owned by JS until `dispose()`/`free()`
#[wasm_bindgen]
pub struct SessionHandle {
    session: SharedSession,
    ticker: Ticker,
}

/// Create a session for `configJson` that owns `stream`
///
/// The stream is stopped when the session is disposed, even if creation fails.
#[wasm_bindgen(js_name = createSession)]
pub fn create_session(
    config_json: &str,
    stream: MediaStream,
    on_event: js_sys::Function,
) -> Result<SessionHandle, JsValue> {
    let camera = MediaStreamCamera::new(stream);
    let config = ExerciseConfig::from_json(config_json)?;
    let session = ClockedSession::new(config, camera, BrowserClock)?;
    let session = Rc::new(RefCell::new(session));

    let ticker = match Ticker::start(session.clone(), on_event) {
        Ok(ticker) => ticker,
        Err(err) => {
            session.borrow_mut().dispose();
            return Err(err);
        }
    };

    Ok(SessionHandle {
        session,
        ticker,
    })
}

#[wasm_bindgen]
impl SessionHandle {
    /// Process one frame of flat landmarks (`x, y, z, visibility` × 33, or
    /// empty when no body was detected). Returns this frame's events.
    #[wasm_bindgen(js_name = feedFrame)]
    pub fn feed_frame(&self, data: &[f32]) -> Result<JsValue, JsValue> {
        let body = match BodyLandmarks::from_flat(data) {
            Ok(body) => body,
            Err(err) => {
                warn!(%err, "malformed frame treated as no body");
                None
            }
        };

        let events = self
            .session
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("session is busy"))?
            .feed_frame(body.as_ref());
        to_js(&events)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.borrow().snapshot())
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.borrow().summary())
    }

    /// Stop the ticker and release the camera. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.ticker.stop();
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.dispose();
        }
    }

    #[wasm_bindgen(js_name = isDisposed)]
    pub fn is_disposed(&self) -> bool {
        self.session.borrow().session().is_disposed()
    }
}
