use std::rc::Rc;

use wasm_bindgen::JsCast;

use crate::config::PARALLAX_RATE;
use crate::dom::{EventBinding, keep};
use crate::render_loop::RenderScheduler;

/// Vertical offset of the hero for a page scroll position.
pub fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * PARALLAX_RATE
}

pub(super) fn init(document: &web_sys::Document) {
    let Some(hero) = document
        .query_selector(".hero")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let scroll_window = window.clone();
    let scheduler = Rc::new(RenderScheduler::new(move || {
        let scrolled = scroll_window.scroll_y().unwrap_or(0.0);
        let _ = hero.style().set_property(
            "transform",
            &format!("translateY({}px)", parallax_offset(scrolled)),
        );
    }));

    keep(EventBinding::with_passive(&window, "scroll", true, move |_| {
        scheduler.mark_dirty();
    }));
}
