// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered element storage.

use std::collections::HashMap;

use crate::element::Element;
use crate::types::ElementId;

/// Elements in paint order (first is bottom-most), addressable by id.
///
/// The store never touches the spatial index itself; the
/// [`Board`](crate::Board) rebuilds the index after each committed mutation.
#[derive(Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    positions: HashMap<ElementId, usize>,
    next_id: u64,
}

impl core::fmt::Debug for ElementStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementStore")
            .field("len", &self.elements.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh id. Ids are never handed out twice, even after undo or import.
    pub fn mint_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an element on top of the paint order.
    ///
    /// The element's id must have come from [`ElementStore::mint_id`] on this store.
    pub fn push(&mut self, element: Element) {
        debug_assert!(
            !self.positions.contains_key(&element.id),
            "element {} is already stored",
            element.id
        );
        self.positions.insert(element.id, self.elements.len());
        self.elements.push(element);
    }

    /// Remove and return the most recently appended element.
    pub fn pop(&mut self) -> Option<Element> {
        let element = self.elements.pop()?;
        self.positions.remove(&element.id);
        Some(element)
    }

    /// Swap in a whole new element list, assigning each element a fresh id.
    ///
    /// Returns the previous contents.
    pub fn replace_all(&mut self, elements: Vec<Element>) -> Vec<Element> {
        let old = core::mem::take(&mut self.elements);
        self.positions.clear();
        self.elements.reserve(elements.len());
        for mut e in elements {
            e.id = self.mint_id();
            self.push(e);
        }
        old
    }

    /// Look up an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.position(id).map(|i| &self.elements[i])
    }

    /// Look up an element for in-place mutation.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.position(id).map(|i| &mut self.elements[i])
    }

    /// Paint-order position of an element.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// The top-most element, if any.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Elements bottom to top.
    pub fn iter(&self) -> core::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Elements as a slice in paint order.
    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the store holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a ElementStore {
    type Item = &'a Element;
    type IntoIter = core::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
