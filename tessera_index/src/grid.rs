// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid: cell mapping, rebuild, and range queries.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::bounded::Bounded;
use crate::types::{Aabb2D, CellKey, CellRange};

/// Default edge length of a grid cell in world units.
pub const DEFAULT_CELL_SIZE: f64 = 500.0;

/// How the two corner cells of a box become a cell range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExtentPolicy {
    /// Order each axis with min/max before building the range.
    ///
    /// A box with negative width or height is indexed under every cell it covers.
    #[default]
    Normalized,
    /// Use the corners as given: `floor(x / s) ..= floor((x + w) / s)`.
    ///
    /// A negative width or height that crosses a cell boundary produces an
    /// empty range and the item is not indexed at all. Zero-sized or
    /// within-one-cell boxes still land in their origin cell.
    Raw,
}

/// Uniform grid index mapping square cells to the set of keys overlapping them.
///
/// Cells are created on demand and only occupied cells are stored, so the
/// world is unbounded in every direction, negative coordinates included.
///
/// There is no per-item update or removal: when geometry changes, call
/// [`GridIndex::rebuild`] with the full item set.
#[derive(Clone)]
pub struct GridIndex<K: Copy + Ord + Debug> {
    cell_size: f64,
    policy: ExtentPolicy,
    cells: BTreeMap<CellKey, BTreeSet<K>>,
}

impl<K: Copy + Ord + Debug> Default for GridIndex<K> {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, ExtentPolicy::default())
    }
}

impl<K: Copy + Ord + Debug> GridIndex<K> {
    /// Create an empty grid with the given cell edge length.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not finite and strictly positive.
    pub fn new(cell_size: f64, policy: ExtentPolicy) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be finite and positive"
        );
        Self {
            cell_size,
            policy,
            cells: BTreeMap::new(),
        }
    }

    /// Cell edge length in world units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The extent policy used for inserts and queries.
    pub fn policy(&self) -> ExtentPolicy {
        self.policy
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell holds any key.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Out-of-range coordinates saturate to the outermost cell."
        )]
        let i = v as i64;
        if (i as f64) > v { i.saturating_sub(1) } else { i }
    }

    /// The cell a world point falls in.
    pub fn key_for(&self, x: f64, y: f64) -> CellKey {
        CellKey::new(
            Self::floor_to_i64(x / self.cell_size),
            Self::floor_to_i64(y / self.cell_size),
        )
    }

    /// Cells covered by `aabb` under the current [`ExtentPolicy`].
    pub fn cell_range(&self, aabb: &Aabb2D<f64>) -> CellRange {
        let a = self.key_for(aabb.min_x, aabb.min_y);
        let b = self.key_for(aabb.max_x, aabb.max_y);
        match self.policy {
            ExtentPolicy::Raw => CellRange::new(a, b),
            ExtentPolicy::Normalized => CellRange::new(
                CellKey::new(a.x.min(b.x), a.y.min(b.y)),
                CellKey::new(a.x.max(b.x), a.y.max(b.y)),
            ),
        }
    }

    /// Remove every association.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Add `item` to every cell its current bounds overlap.
    ///
    /// Inserting the same unchanged item twice is a no-op the second time.
    pub fn insert<E: Bounded<Key = K> + ?Sized>(&mut self, item: &E) {
        self.insert_aabb(item.key(), item.bounds());
    }

    /// Add `key` to every cell `aabb` overlaps.
    pub fn insert_aabb(&mut self, key: K, aabb: Aabb2D<f64>) {
        for cell in self.cell_range(&aabb).iter() {
            self.cells.entry(cell).or_default().insert(key);
        }
    }

    /// Clear the grid and insert every item.
    ///
    /// Order does not matter; the resulting contents depend only on the set of items.
    pub fn rebuild<'a, E, I>(&mut self, items: I)
    where
        E: Bounded<Key = K> + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        self.clear();
        for item in items {
            self.insert(item);
        }
    }

    /// Keys stored in any cell overlapping `rect`, each exactly once.
    ///
    /// Results are at cell granularity: a key may be returned whose box shares a
    /// cell with `rect` without intersecting it.
    pub fn query(&self, rect: Aabb2D<f64>) -> BTreeSet<K> {
        let range = self.cell_range(&rect);
        let mut out = BTreeSet::new();
        if range.is_empty() || self.cells.is_empty() {
            return out;
        }
        if range.cell_count() > self.cells.len() as u128 {
            // More cells requested than occupied: filtering occupied cells is cheaper.
            for (_, keys) in self.cells.iter().filter(|(c, _)| range.contains(**c)) {
                out.extend(keys.iter().copied());
            }
        } else {
            for y in range.min.y..=range.max.y {
                let row = CellKey::new(range.min.x, y)..=CellKey::new(range.max.x, y);
                for (_, keys) in self.cells.range(row) {
                    out.extend(keys.iter().copied());
                }
            }
        }
        out
    }

    /// Keys stored in a single cell.
    pub fn cell_members(&self, cell: CellKey) -> impl Iterator<Item = K> + '_ {
        self.cells.get(&cell).into_iter().flatten().copied()
    }

    /// Every cell that currently holds `key`, in row-major order. Linear in the grid size.
    pub fn cells_of(&self, key: K) -> Vec<CellKey> {
        self.cells
            .iter()
            .filter(|(_, keys)| keys.contains(&key))
            .map(|(c, _)| *c)
            .collect()
    }
}

impl<K: Copy + Ord + Debug> Debug for GridIndex<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries: usize = self.cells.values().map(BTreeSet::len).sum();
        f.debug_struct("GridIndex")
            .field("cell_size", &self.cell_size)
            .field("policy", &self.policy)
            .field("cells", &self.cells.len())
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    fn grid() -> GridIndex<u32> {
        GridIndex::new(500.0, ExtentPolicy::Normalized)
    }

    fn q(g: &GridIndex<u32>, x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<u32> {
        g.query(Aabb2D::new(x0, y0, x1, y1)).into_iter().collect()
    }

    #[derive(Clone)]
    struct Rng(u64);

    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn next_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) / ((1_u64 << 53) as f64)
        }

        fn range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + (hi - lo) * self.next_f64()
        }
    }

    #[test]
    fn floor_matches_negative_division() {
        let g = grid();
        assert_eq!(g.key_for(0.0, 0.0), CellKey::new(0, 0));
        assert_eq!(g.key_for(499.9, 500.0), CellKey::new(0, 1));
        assert_eq!(g.key_for(-0.1, -500.0), CellKey::new(-1, -1));
        assert_eq!(g.key_for(-500.1, -1000.0), CellKey::new(-2, -2));
    }

    #[test]
    fn out_of_range_coordinates_saturate() {
        let mut g = grid();
        assert_eq!(g.key_for(-1.0e300, 0.0), CellKey::new(i64::MIN, 0));
        assert_eq!(g.key_for(f64::NEG_INFINITY, 0.0), CellKey::new(i64::MIN, 0));
        assert_eq!(g.key_for(f64::INFINITY, 1.0e300), CellKey::new(i64::MAX, i64::MAX));
        assert_eq!(g.key_for(f64::NAN, 0.0), CellKey::new(0, 0));

        g.insert(&(1_u32, Aabb2D::from_xywh(-1.0e300, 0.0, 10.0, 10.0)));
        g.insert(&(2_u32, Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(
            q(&g, f64::NEG_INFINITY, -10.0, 10.0, 10.0),
            [1, 2],
            "an unbounded query reaches the saturated cell"
        );
    }

    #[test]
    fn two_rect_scenario() {
        let mut g = grid();
        let items = [
            (1_u32, Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0)),
            (2_u32, Aabb2D::from_xywh(1000.0, 1000.0, 50.0, 50.0)),
        ];
        g.rebuild(items.iter());
        assert_eq!(q(&g, 0.0, 0.0, 200.0, 200.0), [1]);
        assert_eq!(q(&g, 900.0, 900.0, 1100.0, 1100.0), [2]);
        assert_eq!(q(&g, 0.0, 0.0, 1200.0, 1200.0), [1, 2]);
    }

    #[test]
    fn spanning_item_is_reported_once() {
        let mut g = grid();
        g.insert(&(7_u32, Aabb2D::from_xywh(-250.0, -250.0, 1500.0, 1000.0)));
        assert_eq!(g.cells_of(7).len(), 4 * 3);
        assert_eq!(q(&g, -1000.0, -1000.0, 2000.0, 2000.0), [7]);
    }

    #[test]
    fn zero_size_item_occupies_origin_cell() {
        let mut g = grid();
        g.insert(&(3_u32, Aabb2D::from_xywh(750.0, -10.0, 0.0, 0.0)));
        assert_eq!(g.cells_of(3), [CellKey::new(1, -1)]);
    }

    #[test]
    fn normalized_policy_indexes_negative_extent() {
        let mut g = grid();
        // Dragged up-left from (600, 600) to (100, 100).
        g.insert(&(9_u32, Aabb2D::from_xywh(600.0, 600.0, -500.0, -500.0)));
        assert_eq!(
            g.cells_of(9),
            [
                CellKey::new(0, 0),
                CellKey::new(1, 0),
                CellKey::new(0, 1),
                CellKey::new(1, 1)
            ]
        );
        assert_eq!(q(&g, 0.0, 0.0, 200.0, 200.0), [9]);
    }

    #[test]
    fn raw_policy_drops_negative_extent_across_cells() {
        let mut g: GridIndex<u32> = GridIndex::new(500.0, ExtentPolicy::Raw);
        g.insert(&(9_u32, Aabb2D::from_xywh(600.0, 600.0, -500.0, -500.0)));
        assert!(g.cells_of(9).is_empty(), "reversed range indexes nothing");
        assert!(q(&g, 0.0, 0.0, 1000.0, 1000.0).is_empty());

        // Negative extent inside one cell still lands in the origin cell.
        g.insert(&(4_u32, Aabb2D::from_xywh(450.0, 450.0, -40.0, -40.0)));
        assert_eq!(g.cells_of(4), [CellKey::new(0, 0)]);
    }

    #[test]
    fn insert_twice_is_idempotent() {
        let mut g = grid();
        let item = (5_u32, Aabb2D::from_xywh(0.0, 0.0, 600.0, 10.0));
        g.insert(&item);
        let before = format!("{g:?}");
        g.insert(&item);
        assert_eq!(before, format!("{g:?}"));
        assert_eq!(g.cells_of(5).len(), 2);
    }

    #[test]
    fn rebuild_is_order_independent_and_idempotent() {
        let items: Vec<(u32, Aabb2D<f64>)> = (0..40_u32)
            .map(|i| {
                let f = f64::from(i);
                (i, Aabb2D::from_xywh(f * 137.0 - 2000.0, f * -91.0, f * 13.0, 60.0))
            })
            .collect();
        let mut a = grid();
        a.rebuild(items.iter());
        let mut b = grid();
        b.rebuild(items.iter().rev());
        b.rebuild(items.iter().rev());
        let probe = Aabb2D::new(-3000.0, -4000.0, 3000.0, 1000.0);
        assert_eq!(a.query(probe), b.query(probe));
        for i in 0..40 {
            assert_eq!(a.cells_of(i), b.cells_of(i));
        }
    }

    #[test]
    fn rebuild_forgets_stale_positions() {
        let mut g = grid();
        let mut item = (1_u32, Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0));
        g.rebuild([item].iter());
        item.1 = Aabb2D::from_xywh(5000.0, 5000.0, 100.0, 100.0);
        g.rebuild([item].iter());
        assert!(q(&g, 0.0, 0.0, 200.0, 200.0).is_empty());
        assert_eq!(q(&g, 4900.0, 4900.0, 5200.0, 5200.0), [1]);
    }

    #[test]
    fn tall_query_over_sparse_grid_matches_row_walk() {
        let mut g = grid();
        g.insert(&(1_u32, Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0)));
        g.insert(&(2_u32, Aabb2D::from_xywh(0.0, 1.0e7, 10.0, 10.0)));
        // 40_001 rows against 2 occupied cells takes the filtering path.
        assert_eq!(q(&g, -10.0, -1.0e7, 10.0, 1.0e7), [1, 2]);
        assert_eq!(q(&g, -10.0, -10.0, 10.0, 10.0), [1]);
    }

    #[test]
    fn query_agrees_with_brute_force_cell_overlap() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        let items: Vec<(u32, Aabb2D<f64>)> = (0..300_u32)
            .map(|i| {
                let x = rng.range(-5000.0, 5000.0);
                let y = rng.range(-5000.0, 5000.0);
                let w = rng.range(-800.0, 800.0);
                let h = rng.range(-800.0, 800.0);
                (i, Aabb2D::from_xywh(x, y, w, h))
            })
            .collect();
        let mut g = grid();
        g.rebuild(items.iter());

        for _ in 0..50 {
            let x = rng.range(-6000.0, 6000.0);
            let y = rng.range(-6000.0, 6000.0);
            let rect = Aabb2D::from_xywh(x, y, rng.range(0.0, 3000.0), rng.range(0.0, 3000.0));
            let got = g.query(rect);
            let want_range = g.cell_range(&rect);
            for (key, aabb) in &items {
                let r = g.cell_range(aabb);
                let overlaps = r.min.x <= want_range.max.x
                    && want_range.min.x <= r.max.x
                    && r.min.y <= want_range.max.y
                    && want_range.min.y <= r.max.y;
                assert_eq!(
                    got.contains(key),
                    overlaps,
                    "key {key} disagrees with cell overlap"
                );
            }
        }
    }

    #[test]
    fn cell_members_lists_keys() {
        let mut g = grid();
        g.insert(&(1_u32, Aabb2D::from_xywh(10.0, 10.0, 1.0, 1.0)));
        g.insert(&(2_u32, Aabb2D::from_xywh(20.0, 20.0, 1.0, 1.0)));
        let m: Vec<_> = g.cell_members(CellKey::new(0, 0)).collect();
        assert_eq!(m, [1, 2]);
        assert_eq!(g.cell_members(CellKey::new(8, 8)).count(), 0);
    }

    #[test]
    #[should_panic(expected = "cell size must be finite and positive")]
    fn zero_cell_size_panics() {
        let _ = GridIndex::<u32>::new(0.0, ExtentPolicy::Normalized);
    }
}
