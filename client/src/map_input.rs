use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, PointerEvent, TouchEvent, TouchList};

use atlas_shared::{MapController, TouchPoint};

use crate::config::{ACTION_ATTR, ACTION_SELECTOR};
use crate::dom::{EventBinding, log_warn, query_all};
use crate::map_dom::MapElements;

/// Operations exposed to page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapAction {
    ZoomIn,
    ZoomOut,
    Reset,
    HighlightAll,
}

impl MapAction {
    pub const ALL: [MapAction; 4] = [
        MapAction::ZoomIn,
        MapAction::ZoomOut,
        MapAction::Reset,
        MapAction::HighlightAll,
    ];

    /// Value of `data-map-action` on a control.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "zoom-in" => Some(Self::ZoomIn),
            "zoom-out" => Some(Self::ZoomOut),
            "reset" => Some(Self::Reset),
            "highlight-all" => Some(Self::HighlightAll),
            _ => None,
        }
    }

    /// Name of the `window` function installed for inline `onclick` handlers.
    pub fn global_name(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::Reset => "resetMap",
            Self::HighlightAll => "highlightAllRegions",
        }
    }

    /// Returns whether the action ended a drag session.
    pub fn apply(self, map: &mut MapController) -> bool {
        let was_dragging = map.is_dragging();
        match self {
            Self::ZoomIn => map.zoom_in(),
            Self::ZoomOut => map.zoom_out(),
            Self::Reset => {
                map.reset();
            }
            Self::HighlightAll => map.highlight_all(),
        }
        was_dragging && !map.is_dragging()
    }
}

type DragSession = Rc<RefCell<Vec<EventBinding>>>;

struct MapBindings {
    _listeners: Vec<EventBinding>,
    _globals: Vec<Closure<dyn Fn()>>,
    _drag: DragSession,
}

thread_local! {
    static MAP_BINDINGS: RefCell<Option<MapBindings>> = const { RefCell::new(None) };
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            x: t.client_x() as f64,
            y: t.client_y() as f64,
        })
        .collect()
}

fn select(elements: &MapElements, controller: RwSignal<MapController>, id: &str) {
    let offset = elements.area_offset(id);
    let viewport = elements.viewport_size();
    controller.update(|map| map.select_region(id, offset, viewport));
}

/// Detach the window listeners of the current drag session. Safe to call from one
/// of those listeners; the closures are dropped when the next session replaces them.
fn end_session(session: &DragSession) {
    for binding in session.borrow().iter() {
        binding.detach();
    }
}

fn run_action(controller: RwSignal<MapController>, session: &DragSession, action: MapAction) {
    let ended = controller
        .try_update(|map| action.apply(map))
        .unwrap_or(false);
    if ended {
        end_session(session);
    }
}

/// `pointercancel`/`touchcancel`: the browser took the gesture over.
fn cancel_listener(
    window: &web_sys::Window,
    event: &'static str,
    controller: RwSignal<MapController>,
    session: &DragSession,
) -> Option<EventBinding> {
    let session = session.clone();
    EventBinding::new(window, event, move |_: Event| {
        controller.update(|map| {
            map.cancel_drag();
        });
        end_session(&session);
    })
}

/// Move/end listeners on the window for the current drag session. They exist only
/// while Dragging: attached when a session starts, detached as soon as it ends,
/// whether by release, cancel or reset.
fn attach_pointer_session(controller: RwSignal<MapController>, session: &DragSession) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let on_move = EventBinding::new(&window, "pointermove", move |e: Event| {
        let Some(e) = e.dyn_ref::<PointerEvent>() else {
            return;
        };
        e.prevent_default();
        let (x, y) = (e.client_x() as f64, e.client_y() as f64);
        controller.maybe_update(|map| map.pointer_move(x, y));
    });

    let on_up = {
        let session = session.clone();
        EventBinding::new(&window, "pointerup", move |_: Event| {
            controller.update(|map| map.pointer_up());
            end_session(&session);
        })
    };
    let on_cancel = cancel_listener(&window, "pointercancel", controller, session);

    *session.borrow_mut() = on_move.into_iter().chain(on_up).chain(on_cancel).collect();
}

fn attach_touch_session(controller: RwSignal<MapController>, session: &DragSession) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let on_move = EventBinding::with_passive(&window, "touchmove", false, move |e: Event| {
        let Some(e) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        e.prevent_default();
        let touches = touch_points(&e.touches());
        controller.maybe_update(|map| map.touch_move(&touches));
    });

    let on_end = {
        let session = session.clone();
        EventBinding::new(&window, "touchend", move |e: Event| {
            let Some(e) = e.dyn_ref::<TouchEvent>() else {
                return;
            };
            let remaining = touch_points(&e.touches());
            let ended = controller
                .try_update(|map| map.touch_end(&remaining))
                .unwrap_or(false);
            if ended {
                end_session(&session);
            }
        })
    };
    let on_cancel = cancel_listener(&window, "touchcancel", controller, session);

    *session.borrow_mut() = on_move.into_iter().chain(on_end).chain(on_cancel).collect();
}

fn install_globals(
    controller: RwSignal<MapController>,
    session: &DragSession,
) -> Vec<Closure<dyn Fn()>> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    MapAction::ALL
        .into_iter()
        .filter_map(|action| {
            let session = session.clone();
            let callback = Closure::<dyn Fn()>::new(move || {
                run_action(controller, &session, action);
            });
            match Reflect::set(
                window.as_ref(),
                &JsValue::from_str(action.global_name()),
                callback.as_ref(),
            ) {
                Ok(_) => Some(callback),
                Err(_) => {
                    log_warn(&format!("Could not install window.{}", action.global_name()));
                    None
                }
            }
        })
        .collect()
}

/// Wire legend, map areas, drag input and controls to the controller.
/// Replaces any bindings from a previous boot.
pub fn install(
    document: &web_sys::Document,
    elements: Rc<MapElements>,
    controller: RwSignal<MapController>,
) {
    MAP_BINDINGS.with(|slot| {
        slot.borrow_mut().take();
    });

    let drag: DragSession = Rc::new(RefCell::new(Vec::new()));
    let mut listeners = Vec::new();

    let on_pointer_down = {
        let drag = drag.clone();
        EventBinding::new(&elements.container, "pointerdown", move |e: Event| {
            let Some(e) = e.dyn_ref::<PointerEvent>() else {
                return;
            };
            // Touch input is handled by the touch listeners below.
            if e.pointer_type() == "touch" {
                return;
            }
            let (x, y) = (e.client_x() as f64, e.client_y() as f64);
            let started = controller
                .try_update(|map| map.pointer_down(x, y))
                .unwrap_or(false);
            if started {
                attach_pointer_session(controller, &drag);
            }
        })
    };
    listeners.extend(on_pointer_down);

    let on_touch_start = {
        let drag = drag.clone();
        EventBinding::new(&elements.container, "touchstart", move |e: Event| {
            let Some(e) = e.dyn_ref::<TouchEvent>() else {
                return;
            };
            let touches = touch_points(&e.touches());
            let started = controller
                .try_update(|map| map.touch_start(&touches))
                .unwrap_or(false);
            if started {
                attach_touch_session(controller, &drag);
            }
        })
    };
    listeners.extend(on_touch_start);

    for entry in &elements.legend {
        let id = entry.id.clone();
        let elements_for_click = elements.clone();
        listeners.extend(EventBinding::new(&entry.element, "click", move |_: Event| {
            select(&elements_for_click, controller, &id);
        }));
    }

    for area in &elements.areas {
        let id = area.id.clone();
        let elements_for_click = elements.clone();
        listeners.extend(EventBinding::new(&area.element, "click", move |_: Event| {
            let after_drag = controller
                .try_update(|map| map.take_click_suppression())
                .unwrap_or(false);
            if !after_drag {
                select(&elements_for_click, controller, &id);
            }
        }));
    }

    for control in query_all(document, ACTION_SELECTOR) {
        let Some(action) = control
            .get_attribute(ACTION_ATTR)
            .as_deref()
            .and_then(MapAction::parse)
        else {
            continue;
        };
        let drag = drag.clone();
        listeners.extend(EventBinding::new(&control, "click", move |e: Event| {
            e.prevent_default();
            run_action(controller, &drag, action);
        }));
    }

    let globals = install_globals(controller, &drag);

    MAP_BINDINGS.with(|slot| {
        *slot.borrow_mut() = Some(MapBindings {
            _listeners: listeners,
            _globals: globals,
            _drag: drag,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::MapAction;
    use atlas_shared::{MapConfig, MapController, RegionRegistry, TouchPoint};

    fn controller() -> MapController {
        MapController::new(RegionRegistry::new(Vec::new()).unwrap(), MapConfig::default())
    }

    #[test]
    fn parses_control_actions() {
        assert_eq!(MapAction::parse("zoom-in"), Some(MapAction::ZoomIn));
        assert_eq!(MapAction::parse("zoom-out"), Some(MapAction::ZoomOut));
        assert_eq!(MapAction::parse(" reset "), Some(MapAction::Reset));
        assert_eq!(MapAction::parse("highlight-all"), Some(MapAction::HighlightAll));
        assert_eq!(MapAction::parse("rotate"), None);
    }

    #[test]
    fn global_names_are_unique() {
        let mut names: Vec<&str> = MapAction::ALL.iter().map(|a| a.global_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MapAction::ALL.len());
    }

    #[test]
    fn reset_reports_an_interrupted_drag() {
        let mut map = controller();
        map.touch_start(&[TouchPoint { id: 1, x: 0.0, y: 0.0 }]);
        assert!(MapAction::Reset.apply(&mut map));
        assert!(!map.is_dragging());
        assert!(!MapAction::Reset.apply(&mut map));
    }

    #[test]
    fn other_actions_keep_the_drag_alive() {
        let mut map = controller();
        map.pointer_down(10.0, 10.0);
        for action in [MapAction::ZoomIn, MapAction::ZoomOut, MapAction::HighlightAll] {
            assert!(!action.apply(&mut map));
            assert!(map.is_dragging());
        }
    }
}
