//! View transform - pan/zoom between screen space and world space
//!
//! Screen coordinates here are relative to the canvas viewport origin.
//! World coordinates are plan pixels (the space placed items live in).

/// Zoom bounds
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Wheel zoom step per event
const WHEEL_STEP_IN: f32 = 1.1;
const WHEEL_STEP_OUT: f32 = 0.9;

/// Discrete zoom-button step
const BUTTON_STEP: f32 = 1.2;

/// Pan/zoom state for the plan canvas. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates
    pub fn screen_to_world(&self, sx: f32, sy: f32) -> (f32, f32) {
        ((sx - self.pan_x) / self.zoom, (sy - self.pan_y) / self.zoom)
    }

    /// Convert a world point to screen coordinates
    pub fn world_to_screen(&self, wx: f32, wy: f32) -> (f32, f32) {
        (wx * self.zoom + self.pan_x, wy * self.zoom + self.pan_y)
    }

    /// Wheel zoom, anchored at the pointer: the world point under
    /// `(anchor_x, anchor_y)` stays under it after the zoom change.
    pub fn wheel_zoom(&mut self, anchor_x: f32, anchor_y: f32, zoom_in: bool) {
        let factor = if zoom_in { WHEEL_STEP_IN } else { WHEEL_STEP_OUT };
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        let before_x = (anchor_x - self.pan_x) / self.zoom;
        let before_y = (anchor_y - self.pan_y) / self.zoom;
        let after_x = (anchor_x - self.pan_x) / new_zoom;
        let after_y = (anchor_y - self.pan_y) / new_zoom;

        self.pan_x += (after_x - before_x) * new_zoom;
        self.pan_y += (after_y - before_y) * new_zoom;
        self.zoom = new_zoom;
    }

    /// Discrete zoom in (origin-anchored)
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * BUTTON_STEP).min(MAX_ZOOM);
    }

    /// Discrete zoom out (origin-anchored)
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / BUTTON_STEP).max(MIN_ZOOM);
    }

    /// Back to 1:1 with no pan
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_round_trip_across_zoom_and_pan() {
        let samples = [
            (1.0, 0.0, 0.0),
            (0.1, 40.0, -25.0),
            (5.0, -300.0, 120.0),
            (2.5, 13.7, 99.9),
        ];
        for (zoom, pan_x, pan_y) in samples {
            let view = ViewTransform { zoom, pan_x, pan_y };
            for (wx, wy) in [(0.0, 0.0), (300.0, 300.0), (-50.0, 1200.0)] {
                let (sx, sy) = view.world_to_screen(wx, wy);
                let (bx, by) = view.screen_to_world(sx, sy);
                assert!((bx - wx).abs() < EPS, "zoom {} x", zoom);
                assert!((by - wy).abs() < EPS, "zoom {} y", zoom);
            }
        }
    }

    #[test]
    fn test_wheel_zoom_keeps_anchor_fixed() {
        let mut view = ViewTransform {
            zoom: 1.5,
            pan_x: -80.0,
            pan_y: 40.0,
        };
        let anchor = (412.0, 267.0);
        let before = view.screen_to_world(anchor.0, anchor.1);

        view.wheel_zoom(anchor.0, anchor.1, true);
        let after = view.screen_to_world(anchor.0, anchor.1);
        assert!((before.0 - after.0).abs() < EPS);
        assert!((before.1 - after.1).abs() < EPS);
        assert!((view.zoom - 1.65).abs() < EPS);

        view.wheel_zoom(anchor.0, anchor.1, false);
        let back = view.screen_to_world(anchor.0, anchor.1);
        assert!((before.0 - back.0).abs() < EPS);
        assert!((before.1 - back.1).abs() < EPS);
    }

    #[test]
    fn test_zoom_clamping() {
        let mut view = ViewTransform::new();
        for _ in 0..100 {
            view.wheel_zoom(0.0, 0.0, false);
        }
        assert!((view.zoom - MIN_ZOOM).abs() < EPS);

        for _ in 0..100 {
            view.wheel_zoom(0.0, 0.0, true);
        }
        assert!((view.zoom - MAX_ZOOM).abs() < EPS);

        for _ in 0..100 {
            view.zoom_in();
        }
        assert!((view.zoom - MAX_ZOOM).abs() < EPS);
        for _ in 0..100 {
            view.zoom_out();
        }
        assert!((view.zoom - MIN_ZOOM).abs() < EPS);
    }

    #[test]
    fn test_discrete_zoom_steps() {
        let mut view = ViewTransform::new();
        view.zoom_in();
        assert!((view.zoom - 1.2).abs() < EPS);
        view.zoom_out();
        assert!((view.zoom - 1.0).abs() < EPS);
        // Origin-anchored: pan untouched
        assert_eq!(view.pan_x, 0.0);
        assert_eq!(view.pan_y, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut view = ViewTransform {
            zoom: 3.0,
            pan_x: 10.0,
            pan_y: -4.0,
        };
        view.reset();
        assert_eq!(view, ViewTransform::default());
    }
}
