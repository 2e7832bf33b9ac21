use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget};

/// An attached event listener. Dropping the binding detaches it.
pub struct EventBinding {
    target: EventTarget,
    event: &'static str,
    handler: Closure<dyn FnMut(Event)>,
}

impl EventBinding {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let handler = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            handler,
        })
    }

    /// Attach with an explicit `passive` flag. Handlers that call `prevent_default`
    /// on touch events must be registered non-passive.
    pub fn with_passive(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let handler = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                handler.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            handler,
        })
    }

    /// Remove the listener but keep the closure alive. Safe to call from inside the
    /// handler itself, unlike dropping the binding.
    pub fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref());
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

thread_local! {
    static PAGE_BINDINGS: RefCell<Vec<EventBinding>> = const { RefCell::new(Vec::new()) };
}

/// Keep a listener attached for the lifetime of the page.
pub fn keep(binding: Option<EventBinding>) {
    if let Some(binding) = binding {
        PAGE_BINDINGS.with(|slot| slot.borrow_mut().push(binding));
    }
}

/// Detach every page-lifetime listener (used when the app boots a second time).
pub fn release_all() {
    let old = PAGE_BINDINGS.with(|slot| std::mem::take(&mut *slot.borrow_mut()));
    drop(old);
}

pub fn query_all(document: &web_sys::Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Element the event was dispatched to, if it is an element.
pub fn event_element(e: &Event) -> Option<Element> {
    e.target().and_then(|t| t.dyn_into::<Element>().ok())
}

pub fn set_style(element: &Element, name: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<web_sys::HtmlElement>() {
        el.style().set_property(name, value).ok();
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn log_info(message: &str) {
    web_sys::console::info_1(&message.into());
}

pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}
