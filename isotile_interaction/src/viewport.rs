// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom and scroll of the canvas.

use isotile_scene::Projection;
use kurbo::{Point, Vec2};

use crate::config::InteractionConfig;

/// Keyboard pan directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Scroll content up.
    Up,
    /// Scroll content down.
    Down,
    /// Scroll content left.
    Left,
    /// Scroll content right.
    Right,
}

impl PanDirection {
    fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// The projection a canvas is shown through, kept inside zoom bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    projection: Projection,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    zoom_to_cursor: bool,
    pan_speed: f64,
}

impl Viewport {
    /// A viewport at zoom 1 with no scroll.
    pub fn new(config: &InteractionConfig) -> Self {
        Self::with_projection(Projection::default(), config)
    }

    /// A viewport starting from `projection`, its zoom clamped into bounds.
    ///
    /// Inverted bounds are swapped. A bound that is NaN or not positive falls
    /// back to its default.
    pub fn with_projection(projection: Projection, config: &InteractionConfig) -> Self {
        let (min_zoom, max_zoom) = zoom_bounds(config);
        let mut viewport = Self {
            projection,
            min_zoom,
            max_zoom,
            zoom_step: config.zoom_step,
            zoom_to_cursor: config.zoom_to_cursor,
            pan_speed: config.pan_speed,
        };
        viewport.projection.zoom = viewport.clamp(projection.zoom);
        viewport
    }

    /// The current projection.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// The current zoom.
    pub fn zoom(&self) -> f64 {
        self.projection.zoom
    }

    /// The current scroll offset.
    pub fn scroll(&self) -> Vec2 {
        self.projection.scroll
    }

    /// Whether another zoom-in step is possible.
    pub fn can_zoom_in(&self) -> bool {
        self.zoom() < self.max_zoom
    }

    /// Whether another zoom-out step is possible.
    pub fn can_zoom_out(&self) -> bool {
        self.zoom() > self.min_zoom
    }

    /// Zoom in one step. Returns whether the zoom changed.
    pub fn zoom_in(&mut self, cursor: Option<Point>) -> bool {
        self.set_zoom(self.zoom() + self.zoom_step, cursor)
    }

    /// Zoom out one step. Returns whether the zoom changed.
    pub fn zoom_out(&mut self, cursor: Option<Point>) -> bool {
        self.set_zoom(self.zoom() - self.zoom_step, cursor)
    }

    /// Wheel input: positive `delta_y` zooms out, anything else zooms in.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) -> bool {
        if delta_y > 0.0 {
            self.zoom_out(Some(cursor))
        } else {
            self.zoom_in(Some(cursor))
        }
    }

    /// Set the zoom, clamped into bounds and snapped to the step.
    ///
    /// With zoom-to-cursor enabled and a cursor given, the point under the
    /// cursor stays fixed; otherwise scroll is left alone. Returns whether the
    /// zoom changed.
    pub fn set_zoom(&mut self, zoom: f64, cursor: Option<Point>) -> bool {
        let zoom = self.clamp(self.snap(zoom));
        if zoom == self.zoom() {
            return false;
        }
        self.projection = match cursor {
            Some(cursor) if self.zoom_to_cursor => self.projection.zoom_at(zoom, cursor),
            _ => Projection {
                zoom,
                ..self.projection
            },
        };
        true
    }

    /// Scroll by a pixel delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.projection = self.projection.pan_by(delta);
    }

    /// Scroll one keyboard step.
    pub fn pan_key(&mut self, direction: PanDirection) {
        self.pan_by(direction.unit() * self.pan_speed);
    }

    /// Move scroll back to the origin without touching zoom.
    pub fn reset_scroll(&mut self) {
        self.projection.scroll = Vec2::ZERO;
    }

    fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    fn snap(&self, zoom: f64) -> f64 {
        if self.zoom_step > 0.0 {
            (zoom / self.zoom_step).round() * self.zoom_step
        } else {
            zoom
        }
    }
}

fn zoom_bounds(config: &InteractionConfig) -> (f64, f64) {
    let defaults = InteractionConfig::default();
    let usable = |zoom: f64, fallback: f64| if zoom > 0.0 { zoom } else { fallback };
    let min = usable(config.min_zoom, defaults.min_zoom);
    let max = usable(config.max_zoom, defaults.max_zoom);
    if min <= max { (min, max) } else { (max, min) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn steps_stay_in_bounds() {
        let mut v = Viewport::new(&InteractionConfig::default());
        for _ in 0..100 {
            v.zoom_in(None);
        }
        assert!(approx_eq!(f64, v.zoom(), 4.0, epsilon = 1e-9));
        assert!(!v.can_zoom_in());
        assert!(!v.zoom_in(None));
        for _ in 0..100 {
            v.zoom_out(None);
        }
        assert!(approx_eq!(f64, v.zoom(), 0.1, epsilon = 1e-9));
        assert!(!v.can_zoom_out());
    }

    #[test]
    fn repeated_steps_do_not_drift() {
        let mut v = Viewport::new(&InteractionConfig::default());
        for _ in 0..7 {
            v.zoom_in(None);
        }
        for _ in 0..7 {
            v.zoom_out(None);
        }
        assert!(approx_eq!(f64, v.zoom(), 1.0, epsilon = 1e-9));
    }

    #[test]
    fn zoom_to_cursor_keeps_the_tile_under_it() {
        let mut v = Viewport::new(&InteractionConfig::default());
        let cursor = Point::new(240.0, -130.0);
        let before = v.projection().screen_to_tile_fractional(cursor);
        assert!(v.wheel(-1.0, cursor));
        let after = v.projection().screen_to_tile_fractional(cursor);
        assert!(approx_eq!(f64, before.x, after.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, before.y, after.y, epsilon = 1e-9));
    }

    #[test]
    fn zoom_without_cursor_tracking_leaves_scroll() {
        let config = InteractionConfig {
            zoom_to_cursor: false,
            ..InteractionConfig::default()
        };
        let mut v = Viewport::new(&config);
        v.pan_by(Vec2::new(10.0, 10.0));
        v.wheel(1.0, Point::new(500.0, 500.0));
        assert_eq!(v.scroll(), Vec2::new(10.0, 10.0));
        assert!(approx_eq!(f64, v.zoom(), 0.9, epsilon = 1e-9));
    }

    #[test]
    fn keyboard_pan() {
        let mut v = Viewport::new(&InteractionConfig::default());
        v.pan_key(PanDirection::Right);
        v.pan_key(PanDirection::Up);
        assert_eq!(v.scroll(), Vec2::new(20.0, -20.0));
        v.reset_scroll();
        assert_eq!(v.scroll(), Vec2::ZERO);
    }

    #[test]
    fn initial_zoom_is_clamped() {
        let v = Viewport::with_projection(
            Projection::new(12.0, Vec2::ZERO),
            &InteractionConfig::default(),
        );
        assert_eq!(v.zoom(), 4.0);
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let config: InteractionConfig =
            serde_json::from_str(r#"{ "minZoom": 5.0, "maxZoom": 1.0 }"#).unwrap();
        let mut v = Viewport::new(&config);
        assert_eq!(v.zoom(), 1.0);
        for _ in 0..100 {
            v.zoom_in(None);
        }
        assert!(approx_eq!(f64, v.zoom(), 5.0, epsilon = 1e-9));
    }

    #[test]
    fn unusable_bounds_fall_back_to_defaults() {
        let config = InteractionConfig {
            min_zoom: f64::NAN,
            max_zoom: -2.0,
            ..InteractionConfig::default()
        };
        let v = Viewport::with_projection(Projection::new(12.0, Vec2::ZERO), &config);
        assert_eq!(v.zoom(), 4.0);
        assert!(v.can_zoom_out());
    }
}
