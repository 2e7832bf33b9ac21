use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;

use crate::config::{DeviceClass, ORIENTATION_SETTLE_MS, window_height, window_width};
use crate::dom::{EventBinding, keep};

const LOCKED_VIEWPORT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";
const SCALABLE_VIEWPORT: &str = "width=device-width, initial-scale=1.0";

/// `<meta name="viewport">` content for a device class. Phones get a locked scale.
pub fn viewport_content(class: DeviceClass) -> &'static str {
    match class {
        DeviceClass::Mobile => LOCKED_VIEWPORT,
        DeviceClass::Tablet | DeviceClass::Desktop => SCALABLE_VIEWPORT,
    }
}

fn update(document: &web_sys::Document) {
    let width = window_width();
    if let Ok(Some(meta)) = document.query_selector("meta[name=\"viewport\"]") {
        let _ = meta.set_attribute("content", viewport_content(DeviceClass::from_width(width)));
    }
    if let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let style = root.style();
        let _ = style.set_property("--viewport-width", &format!("{width}px"));
        let _ = style.set_property("--viewport-height", &format!("{}px", window_height()));
    }
}

pub(super) fn init(document: &web_sys::Document) {
    update(document);
    let Some(window) = web_sys::window() else {
        return;
    };

    let doc = document.clone();
    keep(EventBinding::new(&window, "resize", move |_| update(&doc)));

    // Reported sizes lag the rotation slightly.
    let doc = document.clone();
    keep(EventBinding::new(&window, "orientationchange", move |_| {
        let doc = doc.clone();
        Timeout::new(ORIENTATION_SETTLE_MS, move || update(&doc)).forget();
    }));
}
