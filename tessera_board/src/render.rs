// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the board and whatever paints it.

use core::f64::consts::FRAC_PI_6;

use kurbo::{BezPath, Point, Rect, Vec2};

use crate::element::Element;
use crate::types::Color;
use crate::viewport::Viewport;

/// Highlight color for the selection outline.
pub const SELECTION_COLOR: Color = Color::rgb(0x69, 0x65, 0xdb);

/// Dash pattern of the selection outline, in screen pixels.
pub const SELECTION_DASH: [f64; 2] = [5.0, 5.0];

/// Length of each arrow-head barb in world units.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;

/// Polyline through stroke points.
pub fn stroke_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

/// Shaft from `tail` to `tip` plus two barbs at ±30° off the shaft.
pub fn arrow_path(tail: Point, tip: Point) -> BezPath {
    let angle = (tip - tail).atan2();
    let barb = |a: f64| tip - Vec2::from_angle(a) * ARROW_HEAD_LENGTH;
    let mut path = BezPath::new();
    path.move_to(tail);
    path.line_to(tip);
    path.line_to(barb(angle - FRAC_PI_6));
    path.move_to(tip);
    path.line_to(barb(angle + FRAC_PI_6));
    path
}

/// Paints a frame handed over by [`Board::render`](crate::Board::render).
///
/// Elements arrive in world coordinates, bottom to top. Implementations apply
/// the viewport transform themselves.
pub trait Renderer {
    /// Called once before any element of a frame.
    fn begin_frame(&mut self, viewport: &Viewport) {
        let _ = viewport;
    }

    /// Paint one element.
    fn draw_element(&mut self, element: &Element);

    /// Paint the selection highlight around a world rectangle.
    ///
    /// `scale` is the current zoom, for keeping the outline one pixel wide.
    fn draw_selection(&mut self, outline: Rect, scale: f64) {
        let _ = (outline, scale);
    }

    /// Called once after the last element of a frame.
    fn end_frame(&mut self) {}
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;

    #[test]
    fn arrow_barbs_trail_the_tip() {
        let path = arrow_path(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let els = path.elements();
        assert_eq!(els.len(), 5);
        let PathEl::LineTo(b1) = els[2] else {
            panic!("expected a barb, got {:?}", els[2]);
        };
        let PathEl::LineTo(b2) = els[4] else {
            panic!("expected a barb, got {:?}", els[4]);
        };
        assert!((b1.x - (100.0 - 15.0 * FRAC_PI_6.cos())).abs() < 1e-9);
        assert!((b1.y - 7.5).abs() < 1e-9);
        assert!((b2.y + 7.5).abs() < 1e-9);
    }

    #[test]
    fn stroke_path_visits_points_in_order() {
        let pts = [Point::new(0.0, 0.0), Point::new(5.0, 1.0), Point::new(9.0, -3.0)];
        let path = stroke_path(&pts);
        assert_eq!(
            path.elements(),
            [PathEl::MoveTo(pts[0]), PathEl::LineTo(pts[1]), PathEl::LineTo(pts[2])]
        );
        assert!(stroke_path(&[]).elements().is_empty());
    }
}
