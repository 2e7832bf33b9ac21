mod app;
mod config;
mod dom;
mod map_dom;
mod map_input;
mod regions;
mod render_loop;
mod site;

use crate::dom::{EventBinding, keep};

fn boot(document: &web_sys::Document) {
    site::init(document);
    app::start(document);
    site::on_load(document);
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    // If main() is re-entered (e.g. dev/hot-reload runtime quirks), detach the old
    // page listeners so handlers never stack up.
    dom::release_all();

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let mut pending = true;
        keep(EventBinding::new(&document, "DOMContentLoaded", move |_| {
            if std::mem::take(&mut pending) {
                boot(&doc);
            }
        }));
    } else {
        boot(&document);
    }
}
