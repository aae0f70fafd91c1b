//! Notification and audio-cue adapters for browser contexts.

use platform_host::NotificationService;

/// Chime pitch in Hz.
#[cfg(target_arch = "wasm32")]
const CHIME_FREQUENCY_HZ: f32 = 880.0;
/// Chime length in seconds.
#[cfg(target_arch = "wasm32")]
const CHIME_DURATION_S: f64 = 0.35;

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter backed by the Web Notifications and Web Audio APIs.
pub struct WebNotificationService;

impl WebNotificationService {
    /// Asks the user for notification permission when it has not been decided yet.
    pub fn request_permission(self) {
        #[cfg(target_arch = "wasm32")]
        {
            if web_sys::Notification::permission() == web_sys::NotificationPermission::Default {
                let _ = web_sys::Notification::request_permission();
            }
        }
    }
}

impl NotificationService for WebNotificationService {
    fn notify(&self, title: &str, body: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsValue;

            if web_sys::Notification::permission() != web_sys::NotificationPermission::Granted {
                return Err("notification permission not granted".to_string());
            }
            let options = web_sys::NotificationOptions::new();
            if !body.trim().is_empty() {
                options.set_body(body);
            }
            web_sys::Notification::new_with_options(title, &options)
                .map(|_| ())
                .map_err(|err: JsValue| format!("notification dispatch failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (title, body);
            Ok(())
        }
    }

    fn play_chime(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let fail = |err: wasm_bindgen::JsValue| format!("audio chime failed: {err:?}");
            let ctx = web_sys::AudioContext::new().map_err(fail)?;
            let oscillator = ctx.create_oscillator().map_err(fail)?;
            let gain = ctx.create_gain().map_err(fail)?;
            oscillator.set_type(web_sys::OscillatorType::Sine);
            oscillator.frequency().set_value(CHIME_FREQUENCY_HZ);
            gain.gain().set_value(0.2);
            oscillator.connect_with_audio_node(&gain).map_err(fail)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(fail)?;
            let now = ctx.current_time();
            oscillator.start_with_when(now).map_err(fail)?;
            oscillator
                .stop_with_when(now + CHIME_DURATION_S)
                .map_err(fail)?;

            // Release the context once the tone ends.
            let finished_ctx = ctx.clone();
            let on_ended = Closure::once_into_js(move || {
                let _ = finished_ctx.close();
            });
            oscillator.set_onended(Some(on_ended.unchecked_ref()));
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }
}
