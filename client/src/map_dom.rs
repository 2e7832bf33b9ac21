use std::fmt;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use atlas_shared::Selection;

use crate::config::{
    ACTIVE_CLASS, AREA_SELECTOR, DESCRIPTION_ID, HIGHLIGHT_CLASS, LEGEND_SELECTOR, MAP_OVERLAY_ID,
    MAP_SURFACE_ID, REGION_ATTR,
};
use crate::dom::{query_all, set_class, set_style};

/// A legend entry or map area tagged with `data-region`.
pub struct RegionElement {
    pub id: String,
    pub element: Element,
}

/// The page elements the map widget drives. Resolved once at startup.
pub struct MapElements {
    pub surface: HtmlElement,
    pub overlay: HtmlElement,
    /// Clipping viewport around the surface: drag target and geometry reference.
    pub container: HtmlElement,
    pub description: HtmlElement,
    pub legend: Vec<RegionElement>,
    pub areas: Vec<RegionElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingElement {
    Surface,
    Overlay,
    Description,
}

impl fmt::Display for MissingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Self::Surface => MAP_SURFACE_ID,
            Self::Overlay => MAP_OVERLAY_ID,
            Self::Description => DESCRIPTION_ID,
        };
        write!(f, "map element #{id} not found")
    }
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn region_elements(document: &Document, selector: &str) -> Vec<RegionElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|element| {
            let id = element.get_attribute(REGION_ATTR)?;
            Some(RegionElement { id, element })
        })
        .collect()
}

impl MapElements {
    /// Resolve every element up front so a page missing any root never gets a
    /// partially wired map.
    pub fn locate(document: &Document) -> Result<Self, MissingElement> {
        let surface = html_by_id(document, MAP_SURFACE_ID).ok_or(MissingElement::Surface)?;
        let overlay = html_by_id(document, MAP_OVERLAY_ID).ok_or(MissingElement::Overlay)?;
        let description =
            html_by_id(document, DESCRIPTION_ID).ok_or(MissingElement::Description)?;
        let container = surface
            .parent_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .unwrap_or_else(|| overlay.clone());

        Ok(Self {
            surface,
            overlay,
            container,
            description,
            legend: region_elements(document, LEGEND_SELECTOR),
            areas: region_elements(document, AREA_SELECTOR),
        })
    }

    pub fn apply_transform(&self, css: &str) {
        self.surface.style().set_property("transform", css).ok();
        self.overlay.style().set_property("transform", css).ok();
    }

    pub fn set_cursor(&self, cursor: &str) {
        set_style(&self.container, "cursor", cursor);
    }

    pub fn sync_selection(&self, selection: &Selection) {
        for entry in &self.legend {
            set_class(&entry.element, ACTIVE_CLASS, selection.is_active(&entry.id));
        }
        for area in &self.areas {
            set_class(&area.element, ACTIVE_CLASS, selection.is_active(&area.id));
            set_class(&area.element, HIGHLIGHT_CLASS, selection.is_highlighted(&area.id));
        }
    }

    /// Container client size, used as the viewport for centering.
    pub fn viewport_size(&self) -> (f64, f64) {
        (
            self.container.client_width() as f64,
            self.container.client_height() as f64,
        )
    }

    /// On-screen center of a region's map area relative to the container.
    pub fn area_offset(&self, id: &str) -> Option<(f64, f64)> {
        let area = self.areas.iter().find(|area| area.id == id)?;
        let rect = area.element.get_bounding_client_rect();
        let origin = self.container.get_bounding_client_rect();
        Some((
            rect.left() + rect.width() / 2.0 - origin.left(),
            rect.top() + rect.height() / 2.0 - origin.top(),
        ))
    }
}
