use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::config::SERVICE_WORKER_URL;

/// Register the offline-cache worker where the browser supports it.
pub(super) fn register() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = Reflect::has(navigator.as_ref(), &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        return;
    }

    let registration = navigator.service_worker().register(SERVICE_WORKER_URL);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(registration).await {
            web_sys::console::error_2(&"Service worker registration failed:".into(), &e);
        }
    });
}
