use crate::dom::{EventBinding, keep, query_all};

const HEADER_SELECTOR: &str = ".writing-header";
const OPEN_CLASS: &str = "open";
const ACTIVE_CLASS: &str = "active";

/// Single-open accordion: a header opens the content right after it and closes the rest.
pub(super) fn init(document: &web_sys::Document) {
    for header in query_all(document, HEADER_SELECTOR) {
        let doc = document.clone();
        let this = header.clone();
        keep(EventBinding::new(&header, "click", move |_| {
            let Some(content) = this.next_element_sibling() else {
                return;
            };
            let was_open = content.class_list().contains(OPEN_CLASS);

            for open in query_all(&doc, ".writing-content.open") {
                let _ = open.class_list().remove_1(OPEN_CLASS);
            }
            for active in query_all(&doc, ".writing-header.active") {
                let _ = active.class_list().remove_1(ACTIVE_CLASS);
            }

            if !was_open {
                let _ = content.class_list().add_1(OPEN_CLASS);
                let _ = this.class_list().add_1(ACTIVE_CLASS);
            }
        }));
    }
}
