use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use leptos::mount::mount_to;
use leptos::prelude::*;

use atlas_shared::{Description, MapController};

use crate::config::map_config;
use crate::dom::{log_info, log_warn};
use crate::map_dom::MapElements;
use crate::map_input;
use crate::regions;

thread_local! {
    static MAP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

/// Resolve the map elements and region data, then mount the widget into the
/// description panel. Returns `false` (and attaches nothing) when the page has no
/// usable map.
pub(crate) fn start(document: &web_sys::Document) -> bool {
    // Unmount a previous boot before reading the panel, so its rendered card is not
    // mistaken for the placeholder.
    let old = MAP_MOUNT_HANDLE.with(|slot| slot.borrow_mut().take());
    drop(old);

    let elements = match MapElements::locate(document) {
        Ok(elements) => elements,
        Err(missing) => {
            log_warn(&format!("Map disabled: {missing}"));
            return false;
        }
    };
    let registry = match regions::load(document) {
        Ok(registry) => registry,
        Err(e) => {
            log_warn(&format!("Map disabled: {e}"));
            return false;
        }
    };

    let config = map_config(&elements.container);
    let placeholder = elements.description.inner_html();
    log_info(&format!(
        "map ready: {} regions, {} legend entries, {} areas",
        registry.len(),
        elements.legend.len(),
        elements.areas.len()
    ));

    let target = elements.description.clone();
    target.set_inner_html("");
    let document = document.clone();
    let elements = Rc::new(elements);

    MAP_MOUNT_HANDLE.with(move |slot| {
        let handle = mount_to(target, move || {
            let controller = RwSignal::new(MapController::new(registry, config));
            bind_map(&document, elements, controller);
            view! { <RegionDescription controller=controller placeholder=placeholder /> }
        });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
    true
}

/// Push controller state to the static map DOM and wire the input handlers.
fn bind_map(
    document: &web_sys::Document,
    elements: Rc<MapElements>,
    controller: RwSignal<MapController>,
) {
    let transform_css = Memo::new(move |_| controller.with(|map| map.transform().css()));
    let cursor = Memo::new(move |_| controller.with(|map| map.cursor()));
    let selection = Memo::new(move |_| controller.with(|map| map.selection().clone()));

    // Every zoom, pan, drag move and reset re-applies translate+scale.
    let elements_tf = elements.clone();
    Effect::new(move || {
        elements_tf.apply_transform(&transform_css.get());
    });

    let elements_cursor = elements.clone();
    Effect::new(move || {
        elements_cursor.set_cursor(cursor.get());
    });

    let elements_sel = elements.clone();
    Effect::new(move || {
        selection.with(|selection| elements_sel.sync_selection(selection));
    });

    map_input::install(document, elements, controller);
}

#[component]
fn RegionDescription(controller: RwSignal<MapController>, placeholder: String) -> impl IntoView {
    let description = Memo::new(move |_| controller.with(|map| map.description().clone()));

    move || match description.get() {
        Description::Placeholder => {
            view! { <div class="region-placeholder" inner_html=placeholder.clone()></div> }
                .into_any()
        }
        Description::Region(card) => view! {
            <h3 class="region-name">{card.name}</h3>
            <p class="region-text">{card.description}</p>
            <span class="region-category">{card.category_label}</span>
        }
        .into_any(),
    }
}
