use wasm_bindgen::JsCast;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::config::NAV_SCROLL_OFFSET_PX;
use crate::dom::{EventBinding, keep, query_all};

use super::nav_menu;

/// Element id an in-page link points at (`"#about"` -> `"about"`).
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Scroll position that leaves the target just below the fixed header.
pub fn scroll_top_for(offset_top: f64) -> f64 {
    offset_top - NAV_SCROLL_OFFSET_PX
}

fn scroll_to_anchor(document: &web_sys::Document, id: &str) {
    let Some(target) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(scroll_top_for(target.offset_top() as f64));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    if nav_menu::is_open(document) {
        nav_menu::close(document);
    }
}

pub(super) fn init(document: &web_sys::Document) {
    for link in query_all(document, ".nav-link, .cta-button") {
        let doc = document.clone();
        let link_for_click = link.clone();
        keep(EventBinding::new(&link, "click", move |e| {
            let Some(href) = link_for_click.get_attribute("href") else {
                return;
            };
            let Some(id) = anchor_target(&href) else {
                return;
            };
            e.prevent_default();
            scroll_to_anchor(&doc, id);
        }));
    }
}
