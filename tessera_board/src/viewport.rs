// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom state and the screen ↔ world mapping.

use kurbo::{Point, Rect, Size, Vec2};

/// Map a screen-space point into world space: `(screen - pan) / scale`.
///
/// `scale` must be non-zero; [`Viewport`] keeps it clamped to a positive range.
///
/// ```
/// use kurbo::{Point, Vec2};
/// use tessera_board::to_world;
///
/// let w = to_world(Point::new(120.0, 80.0), Vec2::new(20.0, -20.0), 2.0);
/// assert_eq!(w, Point::new(50.0, 50.0));
/// ```
pub fn to_world(screen: Point, pan: Vec2, scale: f64) -> Point {
    ((screen.to_vec2() - pan) / scale).to_point()
}

/// Wheel zoom step and the range the scale is clamped to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Scale change per wheel notch.
    pub step: f64,
    /// Smallest scale.
    pub min: f64,
    /// Largest scale.
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.1,
            max: 5.0,
        }
    }
}

/// Which way a wheel notch zooms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Scale up.
    In,
    /// Scale down.
    Out,
}

impl ZoomDirection {
    /// Direction for a wheel delta: scrolling down (positive) zooms out.
    ///
    /// A zero delta carries no direction.
    pub fn from_wheel(delta_y: f64) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::Out)
        } else if delta_y < 0.0 {
            Some(Self::In)
        } else {
            None
        }
    }
}

/// Pan offset (screen units), zoom scale, and canvas size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Screen-space offset of the world origin.
    pub pan: Vec2,
    /// Screen pixels per world unit.
    pub(crate) scale: f64,
    /// Canvas size in screen pixels.
    pub canvas_size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
            canvas_size: Size::ZERO,
        }
    }
}

impl Viewport {
    /// A viewport with no pan and unit scale over a canvas of `canvas_size`.
    pub fn new(canvas_size: Size) -> Self {
        Self {
            canvas_size,
            ..Self::default()
        }
    }

    /// Current zoom factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Screen → world.
    pub fn to_world(&self, screen: Point) -> Point {
        to_world(screen, self.pan, self.scale)
    }

    /// World → screen.
    pub fn to_screen(&self, world: Point) -> Point {
        (world.to_vec2() * self.scale + self.pan).to_point()
    }

    /// The world rectangle currently on screen.
    ///
    /// `[-px/s, -px/s + cw/s] × [-py/s, -py/s + ch/s]`.
    pub fn visible_world_rect(&self) -> Rect {
        let origin = self.to_world(Point::ORIGIN);
        Rect::from_origin_size(origin, self.canvas_size / self.scale)
    }

    /// Shift the view by a screen-space amount.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Set the scale, clamped to `limits`. The pan is left alone.
    ///
    /// A non-finite `scale` is ignored and the current scale kept.
    pub fn set_scale(&mut self, scale: f64, limits: &ZoomLimits) {
        if !scale.is_finite() {
            log::warn!("ignoring non-finite scale {scale}");
            return;
        }
        let clamped = scale.clamp(limits.min, limits.max);
        if clamped != scale {
            log::warn!("scale {scale} clamped to {clamped}");
        }
        self.scale = clamped;
    }

    /// Zoom one step around a screen-space `cursor`.
    ///
    /// The world point under the cursor stays under the cursor:
    /// `pan' = cursor - (cursor - pan) * (scale' / scale)`.
    /// Returns `false` when the scale was already at the limit.
    pub fn zoom_at(&mut self, cursor: Point, direction: ZoomDirection, limits: &ZoomLimits) -> bool {
        let step = match direction {
            ZoomDirection::In => limits.step,
            ZoomDirection::Out => -limits.step,
        };
        let new_scale = (self.scale + step).clamp(limits.min, limits.max);
        if new_scale == self.scale {
            return false;
        }
        let c = cursor.to_vec2();
        self.pan = c - (c - self.pan) * (new_scale / self.scale);
        self.scale = new_scale;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn world_and_screen_are_inverse() {
        let v = Viewport {
            pan: Vec2::new(-40.0, 15.0),
            scale: 2.5,
            canvas_size: Size::new(800.0, 600.0),
        };
        let p = Point::new(123.0, -7.0);
        assert!(close(v.to_world(v.to_screen(p)), p));
    }

    #[test]
    fn visible_rect_tracks_pan_and_scale() {
        let v = Viewport {
            pan: Vec2::new(100.0, -50.0),
            scale: 2.0,
            canvas_size: Size::new(800.0, 600.0),
        };
        assert_eq!(v.visible_world_rect(), Rect::new(-50.0, 25.0, 350.0, 325.0));
    }

    #[test]
    fn zoom_keeps_cursor_anchored() {
        let limits = ZoomLimits::default();
        let mut v = Viewport::new(Size::new(800.0, 600.0));
        v.pan = Vec2::new(13.0, -4.0);
        let cursor = Point::new(400.0, 300.0);
        for dir in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
            let before = v.to_world(cursor);
            assert!(v.zoom_at(cursor, dir, &limits));
            assert!(close(v.to_world(cursor), before));
        }
        assert!((v.scale() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn zoom_stops_at_limits() {
        let limits = ZoomLimits::default();
        let mut v = Viewport::default();
        v.set_scale(5.0, &limits);
        let pan = v.pan;
        assert!(!v.zoom_at(Point::new(10.0, 10.0), ZoomDirection::In, &limits));
        assert_eq!(v.pan, pan);
        assert_eq!(v.scale(), 5.0);

        v.set_scale(0.15, &limits);
        assert!(v.zoom_at(Point::ORIGIN, ZoomDirection::Out, &limits));
        assert_eq!(v.scale(), 0.1);
    }

    #[test]
    fn set_scale_clamps() {
        let limits = ZoomLimits::default();
        let mut v = Viewport::default();
        v.set_scale(50.0, &limits);
        assert_eq!(v.scale(), 5.0);
        v.set_scale(0.0, &limits);
        assert_eq!(v.scale(), 0.1);
    }

    #[test]
    fn set_scale_ignores_non_finite() {
        let limits = ZoomLimits::default();
        let mut v = Viewport::default();
        v.set_scale(2.0, &limits);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            v.set_scale(bad, &limits);
            assert_eq!(v.scale(), 2.0, "scale changed by {bad}");
        }
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(ZoomDirection::from_wheel(3.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_wheel(-0.5), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_wheel(0.0), None);
    }
}
