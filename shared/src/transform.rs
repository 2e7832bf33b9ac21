/// Zoom limits and defaults for one map widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub zoom_step: f64,
    pub min_scale: f64,
    pub initial_scale: f64,
}

pub const DEFAULT_ZOOM_STEP: f64 = 0.2;
pub const DEFAULT_MIN_SCALE: f64 = 0.5;
pub const DEFAULT_INITIAL_SCALE: f64 = 1.0;

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            min_scale: DEFAULT_MIN_SCALE,
            initial_scale: DEFAULT_INITIAL_SCALE,
        }
    }
}

/// Pan/zoom state of the map surface, applied as `translate(..) scale(..)`.
///
/// Translation is in screen pixels and applied before the scale, so zooming
/// grows the map from the current pan position rather than from the viewport origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for MapTransform {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_SCALE)
    }
}

impl MapTransform {
    pub fn new(scale: f64) -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale,
        }
    }

    pub fn zoom_in(&mut self, step: f64) {
        self.scale += step;
    }

    /// Step the scale down, but only when the result stays strictly above `floor`.
    /// Returns whether the scale changed.
    pub fn zoom_out(&mut self, step: f64, floor: f64) -> bool {
        let next = self.scale - step;
        if next > floor {
            self.scale = next;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, scale: f64) {
        *self = Self::new(scale);
    }

    /// Center the viewport on a pre-scale map point at the current scale.
    pub fn pan_to_point(&mut self, x: f64, y: f64, viewport_w: f64, viewport_h: f64) {
        self.translate_x = -x * self.scale + viewport_w / 2.0;
        self.translate_y = -y * self.scale + viewport_h / 2.0;
    }

    /// Convert an on-screen offset (relative to the map container) to pre-scale map coordinates.
    pub fn screen_to_map(&self, sx: f64, sy: f64) -> (f64, f64) {
        (sx / self.scale, sy / self.scale)
    }

    /// CSS `transform` value: translate first, then scale.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MapConfig, MapTransform};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zoom_out_never_reaches_floor() {
        let config = MapConfig::default();
        let mut transform = MapTransform::default();
        for _ in 0..20 {
            transform.zoom_out(config.zoom_step, config.min_scale);
            assert!(transform.scale > config.min_scale);
        }
        assert!(approx(transform.scale, 0.6));
    }

    #[test]
    fn zoom_out_is_ignored_at_or_below_floor() {
        let mut transform = MapTransform::new(0.5);
        assert!(!transform.zoom_out(0.2, 0.5));
        assert_eq!(transform.scale, 0.5);

        let mut transform = MapTransform::new(0.6);
        assert!(!transform.zoom_out(0.2, 0.5));
        assert_eq!(transform.scale, 0.6);
    }

    #[test]
    fn zoom_in_has_no_upper_bound() {
        let mut transform = MapTransform::default();
        for _ in 0..100 {
            transform.zoom_in(0.2);
        }
        assert!(approx(transform.scale, 21.0));
    }

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut transform = MapTransform::default();
        transform.zoom_in(0.2);
        assert!(transform.zoom_out(0.2, 0.5));
        assert!(approx(transform.scale, 1.0));
    }

    #[test]
    fn pan_to_point_centers_point_at_current_scale() {
        let mut transform = MapTransform::new(2.0);
        transform.pan_to_point(100.0, 50.0, 800.0, 600.0);
        assert_eq!(transform.translate_x, -200.0 + 400.0);
        assert_eq!(transform.translate_y, -100.0 + 300.0);
    }

    #[test]
    fn screen_to_map_divides_by_scale() {
        let transform = MapTransform::new(2.0);
        assert_eq!(transform.screen_to_map(300.0, 120.0), (150.0, 60.0));
    }

    #[test]
    fn css_orders_translate_before_scale() {
        let mut transform = MapTransform::new(1.2);
        transform.translate_x = -15.0;
        transform.translate_y = 30.5;
        assert_eq!(transform.css(), "translate(-15px, 30.5px) scale(1.2)");
    }
}
