use std::rc::Rc;

use web_sys::Event;

use crate::config::is_mobile;
use crate::dom::{EventBinding, event_element, keep, log_warn, query_all};

const DROPDOWN_ID: &str = "additional-dropdown";
const BUTTON_ID: &str = "additional-button";
const OPEN_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownClick {
    /// Desktop widths: the dropdown opens on hover via CSS.
    Ignore,
    Toggle,
    Inside,
    Outside,
}

impl DropdownClick {
    /// Clicks handled by the dropdown stay there: other document click handlers, such
    /// as the nav menu's outside-click close, do not see them.
    pub fn stops_propagation(self) -> bool {
        matches!(self, Self::Toggle | Self::Inside)
    }
}

pub fn classify_click(mobile: bool, on_button: bool, inside: bool) -> DropdownClick {
    if !mobile {
        DropdownClick::Ignore
    } else if on_button {
        DropdownClick::Toggle
    } else if inside {
        DropdownClick::Inside
    } else {
        DropdownClick::Outside
    }
}

/// Tap-to-open dropdown for mobile widths.
///
/// The click handlers are bound once and decide at dispatch time whether the viewport
/// is mobile, so resizing never adds or removes listeners.
pub(super) fn init(document: &web_sys::Document) {
    let (Some(dropdown), Some(button)) = (
        document.get_element_by_id(DROPDOWN_ID),
        document.get_element_by_id(BUTTON_ID),
    ) else {
        log_warn("Dropdown menu elements not found");
        return;
    };

    let respond = {
        let doc = document.clone();
        let menu = dropdown.clone();
        Rc::new(move |e: &Event| {
            let target = event_element(e);
            let target_node = target.as_deref();
            let click = classify_click(
                is_mobile(),
                button.contains(target_node),
                menu.contains(target_node),
            );
            if click.stops_propagation() {
                e.stop_propagation();
            }

            match click {
                DropdownClick::Ignore | DropdownClick::Inside => {}
                DropdownClick::Toggle => {
                    e.prevent_default();
                    for other in query_all(&doc, ".dropdown.active") {
                        if other != menu {
                            let _ = other.class_list().remove_1(OPEN_CLASS);
                        }
                    }
                    let _ = menu.class_list().toggle(OPEN_CLASS);
                }
                DropdownClick::Outside => {
                    let _ = menu.class_list().remove_1(OPEN_CLASS);
                }
            }
        })
    };

    // Clicks inside the dropdown are answered on the dropdown itself so their
    // propagation stops before reaching the document; the document handler sees
    // the rest.
    let inner = respond.clone();
    keep(EventBinding::new(&dropdown, "click", move |e| inner(&e)));
    keep(EventBinding::new(document, "click", move |e| respond(&e)));

    if let Some(window) = web_sys::window() {
        keep(EventBinding::new(&window, "resize", move |_| {
            if !is_mobile() {
                let _ = dropdown.class_list().remove_1(OPEN_CLASS);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::{DropdownClick, classify_click};

    #[test]
    fn desktop_clicks_are_ignored() {
        assert_eq!(classify_click(false, true, true), DropdownClick::Ignore);
        assert_eq!(classify_click(false, false, false), DropdownClick::Ignore);
    }

    #[test]
    fn button_wins_over_inside() {
        assert_eq!(classify_click(true, true, true), DropdownClick::Toggle);
    }

    #[test]
    fn inside_clicks_keep_menu_open() {
        assert_eq!(classify_click(true, false, true), DropdownClick::Inside);
    }

    #[test]
    fn outside_clicks_close() {
        assert_eq!(classify_click(true, false, false), DropdownClick::Outside);
    }

    #[test]
    fn only_dropdown_clicks_stop_propagating() {
        assert!(classify_click(true, false, true).stops_propagation());
        assert!(classify_click(true, true, true).stops_propagation());
        assert!(!classify_click(true, false, false).stops_propagation());
        assert!(!classify_click(false, false, true).stops_propagation());
    }
}
