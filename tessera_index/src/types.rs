// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: boxes, cell keys, and cell ranges.

use core::cmp::Ordering;

/// Axis-aligned bounding box in 2D.
///
/// The corners are stored as given. A box built from a negative width or
/// height is *inverted* (`max < min` on that axis); see [`Aabb2D::normalized`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Return true if the AABB is inverted on either axis. Assumes no NaN.
    ///
    /// A zero-area box (a point or a line) is not empty.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// The same box with each axis ordered so that `min <= max`.
    pub fn normalized(&self) -> Self {
        Self {
            min_x: min_t(self.min_x, self.max_x),
            min_y: min_t(self.min_y, self.max_y),
            max_x: max_t(self.min_x, self.max_x),
            max_y: max_t(self.min_y, self.max_y),
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from an origin and a (possibly negative) size.
    ///
    /// No reordering takes place: `from_xywh(10.0, 0.0, -5.0, 1.0)` has
    /// `min_x == 10.0` and `max_x == 5.0`.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

/// Discrete coordinate of a grid cell.
///
/// A world coordinate `v` lands in cell `floor(v / cell_size)`.
/// Keys order row-major (by `y`, then `x`) so a row of cells is a contiguous range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl CellKey {
    /// Create a cell key.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Inclusive rectangular range of cells.
///
/// When `min` exceeds `max` on either axis the range is empty and iterates nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    /// First cell (inclusive).
    pub min: CellKey,
    /// Last cell (inclusive).
    pub max: CellKey,
}

impl CellRange {
    /// Create a range from its corner cells.
    pub const fn new(min: CellKey, max: CellKey) -> Self {
        Self { min, max }
    }

    /// True when the range covers no cells.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Number of cells covered, saturating at `u128::MAX`.
    pub fn cell_count(&self) -> u128 {
        if self.is_empty() {
            return 0;
        }
        let w = (i128::from(self.max.x) - i128::from(self.min.x) + 1).unsigned_abs();
        let h = (i128::from(self.max.y) - i128::from(self.min.y) + 1).unsigned_abs();
        w.saturating_mul(h)
    }

    /// Whether `cell` lies inside the range.
    pub fn contains(&self, cell: CellKey) -> bool {
        self.min.x <= cell.x && cell.x <= self.max.x && self.min.y <= cell.y && cell.y <= self.max.y
    }

    /// Iterate the covered cells row by row.
    pub fn iter(self) -> impl Iterator<Item = CellKey> {
        let Self { min, max } = self;
        let rows = if self.is_empty() { 1..=0 } else { min.y..=max.y };
        rows.flat_map(move |y| (min.x..=max.x).map(move |x| CellKey::new(x, y)))
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
