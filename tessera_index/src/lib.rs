// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Index: a uniform grid over 2D bounding boxes.
//!
//! World space is cut into square cells of a fixed edge length. Every item is
//! associated with each cell its bounding box overlaps, and a rectangle query
//! returns the deduplicated union of the cells it covers.
//!
//! - Cells are sparse: only occupied cells are stored, so the plane is unbounded
//!   and negative coordinates need no origin offset.
//! - The index stores keys, never items. Items expose their key and current
//!   bounds through the [`Bounded`] trait.
//! - There is no incremental move: when geometry changes, [`GridIndex::rebuild`]
//!   clears and re-inserts the whole set. That is cheap for thousands of items
//!   and keeps the index trivially consistent.
//!
//! # Example
//!
//! ```rust
//! use tessera_index::{Aabb2D, ExtentPolicy, GridIndex};
//!
//! let items = [
//!     (1_u32, Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0)),
//!     (2_u32, Aabb2D::from_xywh(1000.0, 1000.0, 50.0, 50.0)),
//! ];
//!
//! let mut grid = GridIndex::new(500.0, ExtentPolicy::Normalized);
//! grid.rebuild(items.iter());
//!
//! let near_origin: Vec<_> = grid.query(Aabb2D::new(0.0, 0.0, 200.0, 200.0)).into_iter().collect();
//! assert_eq!(near_origin, [1]);
//!
//! let both: Vec<_> = grid.query(Aabb2D::new(0.0, 0.0, 1200.0, 1200.0)).into_iter().collect();
//! assert_eq!(both, [1, 2]);
//! ```
//!
//! ## Negative extents
//!
//! A box dragged backwards from its origin has negative width or height.
//! [`ExtentPolicy::Normalized`] orders the corner cells and indexes the full box.
//! [`ExtentPolicy::Raw`] keeps the corners as given, which yields an empty range
//! once the box crosses a cell boundary; it exists for compatibility with data
//! produced by the legacy board.
//!
//! ### Float semantics
//!
//! Coordinates are expected to be finite. Values outside the `i64` cell range
//! saturate to the outermost cell and NaN maps to cell 0.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bounded;
pub mod grid;
pub mod types;

pub use bounded::Bounded;
pub use grid::{DEFAULT_CELL_SIZE, ExtentPolicy, GridIndex};
pub use types::{Aabb2D, CellKey, CellRange};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Clone, Debug)]
    struct Shape {
        id: u64,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    }

    impl Bounded for Shape {
        type Key = u64;

        fn key(&self) -> u64 {
            self.id
        }

        fn bounds(&self) -> Aabb2D<f64> {
            Aabb2D::from_xywh(self.x, self.y, self.w, self.h)
        }
    }

    #[test]
    fn move_then_rebuild_tracks_new_location() {
        let mut shapes = Vec::from([
            Shape {
                id: 1,
                x: 0.0,
                y: 0.0,
                w: 100.0,
                h: 100.0,
            },
            Shape {
                id: 2,
                x: 1000.0,
                y: 1000.0,
                w: 50.0,
                h: 50.0,
            },
        ]);
        let mut grid = GridIndex::default();
        grid.rebuild(shapes.iter());

        shapes[0].x += 3000.0;
        // Stale until rebuilt.
        assert!(grid.query(Aabb2D::new(0.0, 0.0, 10.0, 10.0)).contains(&1));
        grid.rebuild(shapes.iter());
        assert!(!grid.query(Aabb2D::new(0.0, 0.0, 10.0, 10.0)).contains(&1));
        assert!(grid.query(Aabb2D::new(3000.0, 0.0, 3010.0, 10.0)).contains(&1));
    }

    #[test]
    fn every_overlapped_cell_answers_for_the_item() {
        let shape = Shape {
            id: 42,
            x: -730.0,
            y: 260.0,
            w: 1800.0,
            h: 900.0,
        };
        let mut grid = GridIndex::new(500.0, ExtentPolicy::Normalized);
        grid.insert(&shape);
        let range = grid.cell_range(&shape.bounds());
        assert_eq!(grid.cells_of(42), range.iter().collect::<Vec<_>>());
        for cell in range.iter() {
            let s = grid.cell_size();
            #[allow(clippy::cast_precision_loss, reason = "test cell coordinates are small")]
            let probe = Aabb2D::new(
                cell.x as f64 * s + 1.0,
                cell.y as f64 * s + 1.0,
                cell.x as f64 * s + 2.0,
                cell.y as f64 * s + 2.0,
            );
            assert!(grid.query(probe).contains(&42), "missing from {cell:?}");
        }
    }
}
