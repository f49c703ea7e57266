//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Monotonic time
//! - Pointer coordinates
//! - Display-refresh scheduling (`RafScheduler`, browser only)

#[cfg(target_arch = "wasm32")]
pub mod raf;

#[cfg(target_arch = "wasm32")]
pub use raf::RafScheduler;

/// Milliseconds from a monotonic clock (`performance.now()` in the browser)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since the first call in this process
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Map a pointer's client x onto the logical field.
///
/// The canvas may be displayed at any size; `rect_left`/`rect_width` are its
/// on-screen bounds. Returns `None` while the canvas has no width (hidden).
pub fn pointer_to_field_x(
    client_x: f32,
    rect_left: f32,
    rect_width: f32,
    field_width: f32,
) -> Option<f32> {
    if rect_width.is_nan() || rect_width <= 0.0 {
        return None;
    }
    Some((client_x - rect_left) * field_width / rect_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_unscaled() {
        assert_eq!(pointer_to_field_x(150.0, 50.0, 800.0, 800.0), Some(100.0));
    }

    #[test]
    fn test_pointer_scaled_canvas() {
        // Canvas shown at half size
        assert_eq!(pointer_to_field_x(200.0, 0.0, 400.0, 800.0), Some(400.0));
    }

    #[test]
    fn test_pointer_hidden_canvas() {
        assert_eq!(pointer_to_field_x(10.0, 0.0, 0.0, 800.0), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_now_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
