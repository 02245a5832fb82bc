// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport culling: the per-frame draw list.

use kurbo::Rect;
use tessera_index::GridIndex;

use crate::element::Element;
use crate::store::ElementStore;
use crate::types::ElementId;
use crate::util::rect_to_aabb;

/// Elements to paint this frame, bottom to top.
#[derive(Clone, Debug)]
pub struct DrawList<'a> {
    /// World rectangle the list was culled against.
    pub visible: Rect,
    /// Indexed elements in cells overlapping `visible`, in paint order.
    pub elements: Vec<&'a Element>,
    /// The element being drawn, if any. Always included and painted last.
    pub in_progress: Option<&'a Element>,
}

impl<'a> DrawList<'a> {
    /// Every element to paint, in order, ending with the in-progress element.
    pub fn iter(&self) -> impl Iterator<Item = &'a Element> + '_ {
        self.elements.iter().copied().chain(self.in_progress)
    }

    /// Number of elements to paint.
    pub fn len(&self) -> usize {
        self.elements.len() + usize::from(self.in_progress.is_some())
    }

    /// Whether there is nothing to paint.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the element with `id` will be painted.
    pub fn contains(&self, id: ElementId) -> bool {
        self.iter().any(|e| e.id() == id)
    }
}

/// Query `index` with `visible` and resolve the hits through `store`.
///
/// Each element appears at most once no matter how many visible cells hold it.
pub(crate) fn cull<'a>(
    index: &GridIndex<ElementId>,
    store: &'a ElementStore,
    visible: Rect,
    in_progress: Option<&'a Element>,
) -> DrawList<'a> {
    let hits = index.query(rect_to_aabb(visible));
    let mut positions: Vec<usize> = hits.into_iter().filter_map(|id| store.position(id)).collect();
    positions.sort_unstable();
    let slice = store.as_slice();
    DrawList {
        visible,
        elements: positions.into_iter().map(|i| &slice[i]).collect(),
        in_progress,
    }
}
