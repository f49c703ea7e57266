//! `requestAnimationFrame` scheduling

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::driver::{DriverError, FrameCallback, FrameScheduler};

/// Schedules frames on the browser's display refresh
pub struct RafScheduler {
    window: web_sys::Window,
}

impl RafScheduler {
    pub fn new() -> Result<Self, DriverError> {
        let window = web_sys::window().ok_or(DriverError::NoWindow)?;
        Ok(Self { window })
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request(&self, callback: FrameCallback) -> Result<i32, DriverError> {
        // Freed by wasm-bindgen when it fires. A cancelled frame never fires,
        // so its closure stays allocated.
        let closure = Closure::once_into_js(move |time: f64| callback(time));
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(|e| DriverError::Refused(format!("{:?}", e)))
    }

    fn cancel(&self, handle: &i32) {
        if let Err(e) = self.window.cancel_animation_frame(*handle) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle, e);
        }
    }
}
