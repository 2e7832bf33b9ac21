use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::{REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD};
use crate::dom::{log_warn, query_all, set_style};

/// Fade sections and cards in the first time they scroll into view.
pub(super) fn init(document: &web_sys::Document) {
    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                set_style(&target, "opacity", "1");
                set_style(&target, "transform", "translateY(0)");
                set_style(&target, "transition", "opacity 0.6s ease, transform 0.6s ease");
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let Ok(observer) =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
    else {
        log_warn("IntersectionObserver unavailable; reveal animations disabled");
        return;
    };

    for element in query_all(document, REVEAL_SELECTOR) {
        set_style(&element, "opacity", "0");
        set_style(&element, "transform", "translateY(30px)");
        observer.observe(&element);
    }

    // The observer holds the callback for the rest of the page's life.
    on_intersect.forget();
}
