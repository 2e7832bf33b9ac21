use std::cell::Cell;

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ErrorEvent, HtmlImageElement};

use crate::config::{CTA_CLICK_COOLDOWN_MS, DOUBLE_TAP_WINDOW_MS, is_mobile};
use crate::dom::{EventBinding, keep, log_warn, query_all};

const IMAGE_FAILED_ALT: &str = "Изображение не загружено";

/// Flags an event that follows the previous one within `window_ms`.
#[derive(Debug, Clone, Copy)]
pub struct RepeatGuard {
    window_ms: f64,
    last_ms: f64,
    /// Whether a gap of exactly `window_ms` still counts as a repeat.
    inclusive: bool,
}

impl RepeatGuard {
    /// Gaps up to and including `window_ms` are repeats (double-tap guard).
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_ms: f64::NEG_INFINITY,
            inclusive: true,
        }
    }

    /// Gaps strictly shorter than `cooldown_ms` are repeats (click debounce).
    pub fn cooldown(cooldown_ms: f64) -> Self {
        Self {
            inclusive: false,
            ..Self::new(cooldown_ms)
        }
    }

    /// Record an event at `now_ms`; returns whether it is a repeat.
    /// Repeats still move the window forward.
    pub fn is_repeat(&mut self, now_ms: f64) -> bool {
        let gap = now_ms - self.last_ms;
        let repeat = if self.inclusive {
            gap <= self.window_ms
        } else {
            gap < self.window_ms
        };
        self.last_ms = now_ms;
        repeat
    }
}

fn add_root_class(document: &web_sys::Document, class: &str) {
    if let Some(root) = document.document_element() {
        let _ = root.class_list().add_1(class);
    }
}

/// Lazy-load hints on phones. Runs on load and on every resize.
fn tune_images(document: &web_sys::Document) {
    if !is_mobile() {
        return;
    }
    for img in query_all(document, "img") {
        let _ = img.set_attribute("loading", "lazy");
        let _ = img.set_attribute("decoding", "async");
    }
}

/// Error fallbacks are attached once, not per resize.
fn watch_image_errors(document: &web_sys::Document) {
    for img in query_all(document, "img") {
        let Ok(img) = img.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let target = img.clone();
        keep(EventBinding::new(&img, "error", move |_| {
            target.set_alt(IMAGE_FAILED_ALT);
            log_warn(&format!("Image failed to load: {}", target.src()));
        }));
    }
}

fn guard_double_tap(document: &web_sys::Document) {
    let guard = Cell::new(RepeatGuard::new(DOUBLE_TAP_WINDOW_MS));
    keep(EventBinding::with_passive(document, "touchend", false, move |e| {
        let mut state = guard.get();
        if state.is_repeat(js_sys::Date::now()) {
            e.prevent_default();
        }
        guard.set(state);
    }));
}

fn debounce_cta_clicks(document: &web_sys::Document) {
    for button in query_all(document, ".cta-button") {
        let guard = Cell::new(RepeatGuard::cooldown(CTA_CLICK_COOLDOWN_MS));
        keep(EventBinding::new(&button, "click", move |e| {
            let mut state = guard.get();
            if state.is_repeat(js_sys::Date::now()) {
                e.prevent_default();
                e.stop_propagation();
            }
            guard.set(state);
        }));
    }
}

fn log_page_errors() {
    let Some(window) = web_sys::window() else {
        return;
    };
    keep(EventBinding::new(&window, "error", move |e| {
        let message = e
            .dyn_ref::<ErrorEvent>()
            .map(|err| err.message())
            .unwrap_or_default();
        web_sys::console::log_2(&"Page error:".into(), &message.into());
    }));
}

pub(super) fn init(document: &web_sys::Document) {
    log_page_errors();

    let touch_capable = web_sys::window()
        .and_then(|w| Reflect::has(w.as_ref(), &JsValue::from_str("ontouchstart")).ok())
        .unwrap_or(false);
    if touch_capable {
        add_root_class(document, "touch-device");
        if is_mobile() {
            add_root_class(document, "mobile-device");
            guard_double_tap(document);
        }
    }

    tune_images(document);
    watch_image_errors(document);
    if let Some(window) = web_sys::window() {
        let doc = document.clone();
        keep(EventBinding::new(&window, "resize", move |_| tune_images(&doc)));
    }

    debounce_cta_clicks(document);
}

#[cfg(test)]
mod tests {
    use super::RepeatGuard;

    #[test]
    fn first_event_is_never_a_repeat() {
        let mut guard = RepeatGuard::new(300.0);
        assert!(!guard.is_repeat(0.0));
    }

    #[test]
    fn events_inside_window_are_repeats() {
        let mut guard = RepeatGuard::new(300.0);
        assert!(!guard.is_repeat(1_000.0));
        assert!(guard.is_repeat(1_200.0));
        assert!(guard.is_repeat(1_500.0));
        assert!(!guard.is_repeat(1_900.0));
    }

    #[test]
    fn double_tap_window_includes_its_edge() {
        let mut guard = RepeatGuard::new(300.0);
        assert!(!guard.is_repeat(0.0));
        assert!(guard.is_repeat(300.0));
    }

    #[test]
    fn click_cooldown_excludes_its_edge() {
        let mut guard = RepeatGuard::cooldown(1_000.0);
        assert!(!guard.is_repeat(0.0));
        assert!(guard.is_repeat(999.0));
        assert!(!guard.is_repeat(1_999.0));
    }

    #[test]
    fn blocked_clicks_extend_the_cooldown() {
        let mut guard = RepeatGuard::cooldown(1_000.0);
        assert!(!guard.is_repeat(0.0));
        assert!(guard.is_repeat(900.0));
        assert!(guard.is_repeat(1_800.0));
        assert!(!guard.is_repeat(2_900.0));
    }
}
