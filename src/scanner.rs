//! Camera and QR Scanner Bindings
//!
//! Decoding is done by a page-provided widget exposed as
//! `window.pantryScanner.scan()`, which resolves to the decoded text.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::qr::ScanError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "pantryScanner"], js_name = scan)]
    async fn scanner_scan() -> Result<JsValue, JsValue>;
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Ask for camera permission, then release the camera again
pub async fn request_camera() -> Result<(), ScanError> {
    let window = web_sys::window().ok_or_else(|| ScanError::Camera("no window".into()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| ScanError::Camera(describe(&e)))?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| ScanError::Camera(describe(&e)))?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| ScanError::Camera(describe(&e)))?
        .unchecked_into();

    for track in stream.get_tracks().iter() {
        track.unchecked_into::<MediaStreamTrack>().stop();
    }
    Ok(())
}

/// Run the scanning widget and return the decoded QR text
pub async fn scan_code() -> Result<String, ScanError> {
    let value = scanner_scan().await.map_err(|e| ScanError::Scanner(describe(&e)))?;
    let code: String = serde_wasm_bindgen::from_value(value).map_err(|e| ScanError::Scanner(e.to_string()))?;
    if code.trim().is_empty() {
        return Err(ScanError::Scanner("nothing was scanned".into()));
    }
    Ok(code)
}
