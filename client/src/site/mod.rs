//! Page behaviors outside the map: navigation, scrolling effects, accordion,
//! dropdown and mobile tweaks. None of these touch map state.

mod accordion;
mod dropdown;
mod mobile;
mod nav_menu;
mod parallax;
mod reveal;
mod service_worker;
mod smooth_scroll;
mod viewport_meta;

use crate::dom::{EventBinding, keep};

pub(crate) fn init(document: &web_sys::Document) {
    viewport_meta::init(document);
    nav_menu::init(document);
    smooth_scroll::init(document);
    reveal::init(document);
    parallax::init(document);
    accordion::init(document);
    dropdown::init(document);
    mobile::init(document);
}

/// Work that waits for every resource to finish loading.
pub(crate) fn on_load(document: &web_sys::Document) {
    let run = {
        let document = document.clone();
        move || {
            if let Some(body) = document.body() {
                let _ = body.class_list().add_1("loaded");
            }
            service_worker::register();
        }
    };

    if document.ready_state() == "complete" {
        run();
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut run = Some(run);
    keep(EventBinding::new(&window, "load", move |_| {
        if let Some(run) = run.take() {
            run();
        }
    }));
}
