use crate::drag::{DragState, TouchPoint};
use crate::region::RegionRegistry;
use crate::selection::Selection;
use crate::transform::{MapConfig, MapTransform};

/// Text shown in the region description panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Description {
    /// The panel's initial page content.
    #[default]
    Placeholder,
    Region(RegionCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCard {
    pub name: String,
    pub description: String,
    pub category_label: String,
}

/// Owns every piece of mutable map state: transform, drag session, selection
/// and the description panel. One instance per map widget.
#[derive(Debug, Clone)]
pub struct MapController {
    registry: RegionRegistry,
    config: MapConfig,
    transform: MapTransform,
    drag: DragState,
    selection: Selection,
    description: Description,
    suppress_click: bool,
}

impl MapController {
    pub fn new(registry: RegionRegistry, config: MapConfig) -> Self {
        Self {
            registry,
            config,
            transform: MapTransform::new(config.initial_scale),
            drag: DragState::Idle,
            selection: Selection::default(),
            description: Description::Placeholder,
            suppress_click: false,
        }
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn transform(&self) -> &MapTransform {
        &self.transform
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn cursor(&self) -> &'static str {
        self.drag.cursor()
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in(self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.transform
            .zoom_out(self.config.zoom_step, self.config.min_scale);
    }

    /// Returns whether a drag session was in progress and has been ended.
    pub fn reset(&mut self) -> bool {
        self.transform.reset(self.config.initial_scale);
        let ended = self.drag.end().is_some();
        self.selection.clear();
        self.description = Description::Placeholder;
        self.suppress_click = false;
        ended
    }

    // --- Selection ---

    /// Select a region and center the map on it.
    ///
    /// `area_offset` is the on-screen center of the region's map area relative to the map
    /// container, or `None` when the page has no area for this id (the pan is skipped).
    /// `viewport` is the container's client size.
    pub fn select_region(
        &mut self,
        id: &str,
        area_offset: Option<(f64, f64)>,
        viewport: (f64, f64),
    ) {
        self.selection.select(id);

        if let Some((sx, sy)) = area_offset {
            let (x, y) = self.transform.screen_to_map(sx, sy);
            self.transform.pan_to_point(x, y, viewport.0, viewport.1);
        }

        if let Some(region) = self.registry.lookup(id) {
            self.description = Description::Region(RegionCard {
                name: region.name.clone(),
                description: region.description.clone(),
                category_label: region.category.label().to_string(),
            });
        }
    }

    pub fn highlight_all(&mut self) {
        self.selection.highlight_all();
    }

    // --- Drag ---

    fn translate(&self) -> (f64, f64) {
        (self.transform.translate_x, self.transform.translate_y)
    }

    fn apply_translate(&mut self, translate: Option<(f64, f64)>) -> bool {
        let Some((x, y)) = translate else {
            return false;
        };
        self.transform.translate_x = x;
        self.transform.translate_y = y;
        true
    }

    /// Returns whether a drag session started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let translate = self.translate();
        let started = self.drag.pointer_down(x, y, translate);
        if started {
            self.suppress_click = false;
        }
        started
    }

    /// Returns whether the transform changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let next = self.drag.pointer_move(x, y);
        self.apply_translate(next)
    }

    pub fn pointer_up(&mut self) {
        if let Some(session) = self.drag.end() {
            self.suppress_click = session.was_drag();
        }
    }

    /// Returns whether a drag session started.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        let translate = self.translate();
        let started = self.drag.touch_start(touches, translate);
        if started {
            self.suppress_click = false;
        }
        started
    }

    /// Returns whether the transform changed.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> bool {
        let next = self.drag.touch_move(touches);
        self.apply_translate(next)
    }

    /// Returns whether the session ended.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> bool {
        match self.drag.touch_end(remaining) {
            Some(session) => {
                self.suppress_click = session.was_drag();
                true
            }
            None => false,
        }
    }

    /// Drop the session without treating it as a drag, for gestures the browser
    /// took over (`pointercancel`, `touchcancel`). Returns whether a session was active.
    pub fn cancel_drag(&mut self) -> bool {
        self.suppress_click = false;
        self.drag.end().is_some()
    }

    /// True once for the click that trails a real drag, so releasing over a map area
    /// after panning does not select it.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}
