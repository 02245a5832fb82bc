// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between Kurbo rectangles and index boxes.

use kurbo::Rect;
use tessera_index::Aabb2D;

/// Convert a Kurbo rect to an index box, keeping inverted corners as they are.
pub(crate) fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Strict containment: the point must lie inside the open rectangle.
///
/// Corners are used as given, so an inverted rect contains nothing.
pub(crate) fn strictly_contains(r: Rect, x: f64, y: f64) -> bool {
    x > r.x0 && x < r.x1 && y > r.y0 && y < r.y1
}
