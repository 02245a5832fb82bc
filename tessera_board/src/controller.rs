// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gestures: hit testing, selection, dragging, drawing, panning, and wheel zoom.
//!
//! At most one gesture is active at a time. A gesture starts on pointer-down
//! and ends on the next pointer-up; the spatial index is left untouched while it
//! runs and is rebuilt once when a drag or draw completes.

use kurbo::{Point, Rect};
use tessera_index::ExtentPolicy;

use crate::board::Board;
use crate::element::Element;
use crate::input::{Effects, PointerButton, TextEntry};
use crate::store::ElementStore;
use crate::types::{ElementId, ElementKind, Tool};
use crate::util::strictly_contains;
use crate::viewport::ZoomDirection;

/// Live gesture state.
#[derive(Clone, Debug, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    /// Last pointer position in screen space.
    Panning { last: Point },
    /// Last pointer position in world space.
    Dragging { last: Point },
    /// The element being drawn; not yet in the store or the index.
    Drawing { element: Element },
}

/// Which gesture is active, without its data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// No button held.
    #[default]
    Idle,
    /// Moving the view.
    Panning,
    /// Moving the selected element.
    Dragging,
    /// Creating an element.
    Drawing,
}

impl Gesture {
    pub(crate) fn kind(&self) -> GestureKind {
        match self {
            Self::Idle => GestureKind::Idle,
            Self::Panning { .. } => GestureKind::Panning,
            Self::Dragging { .. } => GestureKind::Dragging,
            Self::Drawing { .. } => GestureKind::Drawing,
        }
    }
}

/// The box used for picking and outlining `element`.
///
/// Under [`ExtentPolicy::Raw`] an inverted box is used as stored, so it only
/// catches points inside the margin band. Otherwise the box is normalized.
pub(crate) fn pick_box(element: &Element, policy: ExtentPolicy) -> Rect {
    let b = element.bounds();
    match policy {
        ExtentPolicy::Raw => b,
        ExtentPolicy::Normalized => b.abs(),
    }
}

/// Top-most element whose pick box, grown by `margin`, strictly contains `world`.
///
/// Scans the store from newest to oldest so later elements win ties.
pub(crate) fn hit_test_store(
    store: &ElementStore,
    world: Point,
    margin: f64,
    policy: ExtentPolicy,
) -> Option<ElementId> {
    store
        .iter()
        .rev()
        .find(|e| strictly_contains(pick_box(e, policy).inflate(margin, margin), world.x, world.y))
        .map(Element::id)
}

impl Board {
    pub(crate) fn pointer_down(
        &mut self,
        screen: Point,
        button: PointerButton,
        text: &mut impl TextEntry,
    ) -> Effects {
        if !matches!(self.gesture, Gesture::Idle) {
            log::trace!("pointer down ignored during {:?}", self.gesture.kind());
            return Effects::empty();
        }
        if button == PointerButton::Secondary {
            return Effects::empty();
        }
        if button == PointerButton::Middle || self.space_held || self.tool == Tool::Hand {
            log::trace!("pan start at {screen:?}");
            self.gesture = Gesture::Panning { last: screen };
            return Effects::empty();
        }

        let world = self.viewport.to_world(screen);
        match self.tool.element_kind() {
            None => {
                let hit = self.hit_test(world);
                let mut effects = Effects::empty();
                if hit != self.selection {
                    self.selection = hit;
                    effects |= Effects::SELECTION_CHANGED | Effects::REDRAW;
                }
                if let Some(id) = hit {
                    log::trace!("drag start on {id} at {world:?}");
                    self.gesture = Gesture::Dragging { last: world };
                }
                effects
            }
            Some(ElementKind::Text) => self.place_text(world, text),
            Some(kind) => {
                let id = self.store.mint_id();
                log::trace!("draw start: {kind:?} {id} at {world:?}");
                self.gesture = Gesture::Drawing {
                    element: Element::begin(id, kind, world, self.style.clone()),
                };
                Effects::REDRAW
            }
        }
    }

    /// Text is committed immediately; there is no drag phase.
    fn place_text(&mut self, world: Point, text: &mut impl TextEntry) -> Effects {
        let Some(content) = text.request_text(world).filter(|s| !s.is_empty()) else {
            log::trace!("text placement at {world:?} cancelled");
            return Effects::empty();
        };
        let id = self.store.mint_id();
        self.store.push(Element::text(id, world, self.style.clone(), content));
        self.rebuild_index();
        Effects::REDRAW | Effects::INDEX_REBUILT | Effects::PERSIST
    }

    pub(crate) fn pointer_move(&mut self, screen: Point) -> Effects {
        let world = self.viewport.to_world(screen);
        match &mut self.gesture {
            Gesture::Idle => Effects::empty(),
            Gesture::Panning { last } => {
                let delta = screen - *last;
                *last = screen;
                self.viewport.pan_by(delta);
                Effects::VIEW_CHANGED | Effects::REDRAW
            }
            Gesture::Dragging { last } => {
                let delta = world - *last;
                *last = world;
                match self.selection.and_then(|id| self.store.get_mut(id)) {
                    Some(element) => {
                        element.translate(delta);
                        Effects::REDRAW
                    }
                    None => Effects::empty(),
                }
            }
            Gesture::Drawing { element } => {
                element.extend_to(world);
                Effects::REDRAW
            }
        }
    }

    pub(crate) fn pointer_up(&mut self) -> Effects {
        match core::mem::take(&mut self.gesture) {
            Gesture::Idle => Effects::empty(),
            Gesture::Panning { .. } => {
                log::trace!("pan end");
                Effects::empty()
            }
            Gesture::Dragging { .. } => {
                log::trace!("drag end");
                self.rebuild_index();
                Effects::REDRAW | Effects::INDEX_REBUILT | Effects::PERSIST
            }
            Gesture::Drawing { element } => {
                log::trace!("draw end: {:?} {}", element.kind(), element.id());
                self.store.push(element);
                self.rebuild_index();
                Effects::REDRAW | Effects::INDEX_REBUILT | Effects::PERSIST
            }
        }
    }

    pub(crate) fn wheel(&mut self, screen: Point, delta_y: f64) -> Effects {
        let Some(direction) = ZoomDirection::from_wheel(delta_y) else {
            return Effects::empty();
        };
        let limits = self.config.zoom_limits();
        if self.viewport.zoom_at(screen, direction, &limits) {
            Effects::VIEW_CHANGED | Effects::REDRAW
        } else {
            Effects::empty()
        }
    }

    /// Abandon the active gesture.
    ///
    /// A drag keeps the distance already moved and is committed; a draft
    /// element is discarded.
    pub(crate) fn cancel_gesture(&mut self) -> Effects {
        match core::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => Effects::empty(),
            Gesture::Dragging { .. } => {
                self.rebuild_index();
                Effects::REDRAW | Effects::INDEX_REBUILT | Effects::PERSIST
            }
            Gesture::Drawing { element } => {
                log::trace!("draft {} discarded", element.id());
                Effects::REDRAW
            }
        }
    }
}
