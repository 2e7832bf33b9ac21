use crate::dom::{EventBinding, event_element, keep, query_all};

const HAMBURGER_ID: &str = "hamburger";
const NAV_MENU_ID: &str = "nav-menu";
const OPEN_CLASS: &str = "active";

fn set_open(document: &web_sys::Document, open: bool) {
    for id in [NAV_MENU_ID, HAMBURGER_ID] {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(OPEN_CLASS, open);
        }
    }
    // Lock page scroll behind the open menu.
    if let Some(body) = document.body() {
        let style = body.style();
        if open {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }
}

pub(super) fn is_open(document: &web_sys::Document) -> bool {
    document
        .get_element_by_id(NAV_MENU_ID)
        .is_some_and(|menu| menu.class_list().contains(OPEN_CLASS))
}

pub(super) fn close(document: &web_sys::Document) {
    set_open(document, false);
}

pub(super) fn init(document: &web_sys::Document) {
    let (Some(hamburger), Some(_)) = (
        document.get_element_by_id(HAMBURGER_ID),
        document.get_element_by_id(NAV_MENU_ID),
    ) else {
        return;
    };

    let doc = document.clone();
    keep(EventBinding::new(&hamburger, "click", move |_| {
        let open = !is_open(&doc);
        set_open(&doc, open);
    }));

    for link in query_all(document, ".nav-link") {
        let doc = document.clone();
        keep(EventBinding::new(&link, "click", move |_| close(&doc)));
    }

    let doc = document.clone();
    keep(EventBinding::new(document, "click", move |e| {
        let Some(target) = event_element(&e) else {
            return;
        };
        let inside_nav = target.closest(".nav-container").ok().flatten().is_some();
        let on_toggle = target.closest("#hamburger").ok().flatten().is_some();
        if !inside_nav && !on_toggle {
            close(&doc);
        }
    }));

    if let Some(window) = web_sys::window() {
        let doc = document.clone();
        keep(EventBinding::new(&window, "orientationchange", move |_| {
            close(&doc)
        }));
    }
}
