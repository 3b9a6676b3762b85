//! Error kinds surfaced by the rep counter
//!
//! Frame-level problems (missing or low-confidence landmarks) are never
//! errors; they show up as `recognized = false` detections. Errors here are
//! reserved for things the caller has to act on.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Landmark payload from JS could not be adapted
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("invalid landmark data length: {actual} (expected {expected})")]
    InvalidLength { expected: usize, actual: usize },
}

/// Exercise configuration was rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(String),
    #[error("{field} must be at least 1")]
    ZeroTarget { field: &'static str },
    #[error("squat thresholds must satisfy bent ({bent}) < extended ({extended})")]
    InvertedThresholds { bent: f32, extended: f32 },
    #[error("visibility threshold {0} is outside (0, 1]")]
    VisibilityOutOfRange(f32),
    #[error("jumping-jack spread ratio must be positive, got {0}")]
    NonPositiveSpread(f32),
}

/// Camera acquisition failed; no session is created
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device found")]
    DeviceNotFound,
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

impl CameraError {
    /// Map a `DOMException` name from `getUserMedia` onto an error kind
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                CameraError::PermissionDenied
            }
            "NotFoundError" | "OverconstrainedError" | "DevicesNotFoundError" => {
                CameraError::DeviceNotFound
            }
            _ => CameraError::Unavailable(format!("{}: {}", name, message)),
        }
    }

    /// Suggested remediation shown to the trainee
    pub fn remediation(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => {
                "Allow camera access for this site in your browser settings, then reopen the task."
            }
            CameraError::DeviceNotFound => {
                "No camera was found. Check that this device has a working front camera."
            }
            CameraError::Unavailable(_) => {
                "Close other apps that may be using the camera and try again."
            }
        }
    }

    /// Stable code for the JS side to branch on
    pub fn code(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "permission-denied",
            CameraError::DeviceNotFound => "device-not-found",
            CameraError::Unavailable(_) => "unavailable",
        }
    }
}

impl ConfigError {
    /// Structured form handed to JS
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "code": "invalid-config",
            "message": self.to_string(),
        })
    }
}

impl CameraError {
    /// Structured form handed to JS
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
            "remediation": self.remediation(),
        })
    }
}

/// Rejection value as a plain JS object, falling back to the message string
fn to_js_object(payload: serde_json::Value) -> JsValue {
    let json = payload.to_string();
    js_sys::JSON::parse(&json).unwrap_or_else(|_| JsValue::from_str(&json))
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        to_js_object(err.payload())
    }
}

impl From<CameraError> for JsValue {
    fn from(err: CameraError) -> Self {
        to_js_object(err.payload())
    }
}
