use atlas_shared::MapConfig;
use atlas_shared::transform::{DEFAULT_INITIAL_SCALE, DEFAULT_MIN_SCALE, DEFAULT_ZOOM_STEP};

// Map DOM contract
pub const MAP_SURFACE_ID: &str = "world-map";
pub const MAP_OVERLAY_ID: &str = "map-overlay";
pub const DESCRIPTION_ID: &str = "region-description";
pub const REGION_DATA_ID: &str = "map-regions";
pub const LEGEND_SELECTOR: &str = ".legend-item[data-region]";
pub const AREA_SELECTOR: &str = ".map-area[data-region]";
pub const ACTION_SELECTOR: &str = "[data-map-action]";
pub const REGION_ATTR: &str = "data-region";
pub const ACTION_ATTR: &str = "data-map-action";
pub const ACTIVE_CLASS: &str = "active";
pub const HIGHLIGHT_CLASS: &str = "highlighted";

// Breakpoints (CSS px)
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

// Site behavior
pub const NAV_SCROLL_OFFSET_PX: f64 = 80.0;
pub const ORIENTATION_SETTLE_MS: u32 = 100;
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_SELECTOR: &str =
    "section, .about-card, .character-hero, .character-villain, .world-card, .feature-item";
pub const PARALLAX_RATE: f64 = 0.5;
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
pub const CTA_CLICK_COOLDOWN_MS: f64 = 1_000.0;
pub const SERVICE_WORKER_URL: &str = "/sw.js";

/// Read zoom settings from `data-zoom-step`, `data-min-scale` and `data-initial-scale`
/// on the map viewport element.
pub fn map_config(viewport: &web_sys::Element) -> MapConfig {
    map_config_from(|name| viewport.get_attribute(name))
}

fn map_config_from(attr: impl Fn(&str) -> Option<String>) -> MapConfig {
    let zoom_step = positive_or(attr("data-zoom-step"), DEFAULT_ZOOM_STEP);
    let min_scale = positive_or(attr("data-min-scale"), DEFAULT_MIN_SCALE);
    let initial_scale = positive_or(attr("data-initial-scale"), DEFAULT_INITIAL_SCALE).max(min_scale);
    MapConfig {
        zoom_step,
        min_scale,
        initial_scale,
    }
}

fn positive_or(value: Option<String>, default: f64) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f64) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

pub fn window_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(TABLET_MAX_WIDTH + 1.0)
}

pub fn window_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn is_mobile() -> bool {
    DeviceClass::from_width(window_width()) == DeviceClass::Mobile
}

#[cfg(test)]
mod tests {
    use super::{DeviceClass, map_config_from, positive_or};
    use std::collections::HashMap;

    #[test]
    fn device_class_boundaries() {
        assert_eq!(DeviceClass::from_width(320.0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(768.0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(769.0), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_width(1024.0), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_width(1025.0), DeviceClass::Desktop);
    }

    #[test]
    fn positive_or_rejects_garbage() {
        assert_eq!(positive_or(None, 0.2), 0.2);
        assert_eq!(positive_or(Some("abc".into()), 0.2), 0.2);
        assert_eq!(positive_or(Some("-1".into()), 0.2), 0.2);
        assert_eq!(positive_or(Some("0".into()), 0.2), 0.2);
        assert_eq!(positive_or(Some("NaN".into()), 0.2), 0.2);
        assert_eq!(positive_or(Some(" 0.25 ".into()), 0.2), 0.25);
    }

    #[test]
    fn map_config_defaults_without_attributes() {
        let config = map_config_from(|_| None);
        assert_eq!(config.zoom_step, 0.2);
        assert_eq!(config.min_scale, 0.5);
        assert_eq!(config.initial_scale, 1.0);
    }

    #[test]
    fn map_config_reads_overrides() {
        let attrs: HashMap<&str, &str> = [
            ("data-zoom-step", "0.1"),
            ("data-min-scale", "0.75"),
            ("data-initial-scale", "0.6"),
        ]
        .into_iter()
        .collect();
        let config = map_config_from(|name| attrs.get(name).map(|v| v.to_string()));
        assert_eq!(config.zoom_step, 0.1);
        assert_eq!(config.min_scale, 0.75);
        // Initial scale never starts below the floor.
        assert_eq!(config.initial_scale, 0.75);
    }
}
