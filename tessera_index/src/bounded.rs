// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trait through which the index reads an item's identity and extent.

use core::fmt::Debug;

use crate::types::Aabb2D;

/// Something that occupies a world-space box and can be indexed by key.
///
/// The index never stores the item itself, only `key()` under every cell the
/// current `bounds()` overlaps. Keys must therefore be stable for as long as the
/// item lives and unique among live items.
pub trait Bounded {
    /// Identity stored in the grid cells.
    type Key: Copy + Ord + Debug;

    /// The identity of this item.
    fn key(&self) -> Self::Key;

    /// Current world-space bounds. Inverted boxes are allowed; see
    /// [`ExtentPolicy`](crate::ExtentPolicy) for how they are indexed.
    fn bounds(&self) -> Aabb2D<f64>;
}

impl<K: Copy + Ord + Debug> Bounded for (K, Aabb2D<f64>) {
    type Key = K;

    fn key(&self) -> K {
        self.0
    }

    fn bounds(&self) -> Aabb2D<f64> {
        self.1
    }
}
