// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The board context: owns every piece of mutable state.

use std::collections::BTreeSet;

use kurbo::{Point, Rect, Size, Vec2};
use tessera_index::GridIndex;

use crate::config::BoardConfig;
use crate::controller::{Gesture, GestureKind, hit_test_store, pick_box};
use crate::cull::{DrawList, cull};
use crate::element::{Element, Shape};
use crate::error::BoardResult;
use crate::input::{Effects, InputEvent, Key, TextEntry};
use crate::render::Renderer;
use crate::store::ElementStore;
use crate::types::{ElementId, Style, Tool};
use crate::util::rect_to_aabb;
use crate::viewport::Viewport;

/// An infinite canvas: elements, their spatial index, the view, and input state.
///
/// Every mutation goes through `&mut self`, so the index is never read while it
/// is being rebuilt. After any committed change (a finished draw or drag, undo,
/// import) every stored element is indexed under exactly the cells its current
/// bounds overlap.
pub struct Board {
    pub(crate) config: BoardConfig,
    pub(crate) store: ElementStore,
    pub(crate) index: GridIndex<ElementId>,
    pub(crate) viewport: Viewport,
    pub(crate) tool: Tool,
    pub(crate) style: Style,
    pub(crate) selection: Option<ElementId>,
    pub(crate) gesture: Gesture,
    pub(crate) space_held: bool,
}

impl core::fmt::Debug for Board {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Board")
            .field("elements", &self.store.len())
            .field("index", &self.index)
            .field("viewport", &self.viewport)
            .field("tool", &self.tool)
            .field("selection", &self.selection)
            .field("gesture", &self.gesture.kind())
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create an empty board. Fails if `config` is out of range.
    pub fn new(config: BoardConfig) -> BoardResult<Self> {
        config.validate()?;
        let index = GridIndex::new(config.cell_size, config.extent_policy);
        Ok(Self {
            config,
            store: ElementStore::new(),
            index,
            viewport: Viewport::default(),
            tool: Tool::default(),
            style: Style::default(),
            selection: None,
            gesture: Gesture::Idle,
            space_held: false,
        })
    }

    /// Apply one input event to completion.
    pub fn handle(&mut self, event: InputEvent, text: &mut impl TextEntry) -> Effects {
        match event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(pos, button, text),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::Wheel { pos, delta_y } => self.wheel(pos, delta_y),
            InputEvent::KeyDown(Key::Space) => {
                self.space_held = true;
                Effects::empty()
            }
            InputEvent::KeyUp(Key::Space) => {
                self.space_held = false;
                Effects::empty()
            }
            InputEvent::KeyDown(Key::Other) | InputEvent::KeyUp(Key::Other) => Effects::empty(),
            InputEvent::SelectTool(tool) => self.set_tool(tool),
            InputEvent::Resize(size) => self.set_canvas_size(size),
            InputEvent::Undo => self.undo(),
        }
    }

    /// Top-most element under a world-space point, using the configured hit margin.
    ///
    /// Scans every element rather than the index.
    pub fn hit_test(&self, world: Point) -> Option<ElementId> {
        hit_test_store(&self.store, world, self.config.hit_margin, self.config.extent_policy)
    }

    /// Ids indexed in any cell overlapping a world rectangle, each once.
    pub fn query(&self, world: Rect) -> BTreeSet<ElementId> {
        self.index.query(rect_to_aabb(world))
    }

    /// What to paint this frame: visible elements in paint order, then the draft.
    pub fn draw_list(&self) -> DrawList<'_> {
        cull(
            &self.index,
            &self.store,
            self.viewport.visible_world_rect(),
            self.in_progress(),
        )
    }

    /// Paint one frame.
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.begin_frame(&self.viewport);
        for element in self.draw_list().iter() {
            renderer.draw_element(element);
        }
        if let Some(outline) = self.selection_outline() {
            renderer.draw_selection(outline, self.viewport.scale());
        }
        renderer.end_frame();
    }

    /// World-space highlight around the selected element: its box grown by the hit margin.
    pub fn selection_outline(&self) -> Option<Rect> {
        let m = self.config.hit_margin;
        self.selected()
            .map(|e| pick_box(e, self.config.extent_policy).inflate(m, m))
    }

    /// Remove the most recently created element.
    ///
    /// Does nothing on an empty board. Clears the selection if it pointed at
    /// the removed element.
    pub fn undo(&mut self) -> Effects {
        let Some(removed) = self.store.pop() else {
            return Effects::empty();
        };
        log::debug!("undo removed {} ({:?})", removed.id(), removed.kind());
        let mut effects = Effects::REDRAW | Effects::INDEX_REBUILT | Effects::PERSIST;
        if self.selection == Some(removed.id()) {
            self.selection = None;
            effects |= Effects::SELECTION_CHANGED;
        }
        self.rebuild_index();
        effects
    }

    /// Re-derive the index from the store.
    pub fn rebuild_index(&mut self) {
        self.index.rebuild(self.store.iter());
        log::debug!(
            "index rebuilt: {} elements in {} cells",
            self.store.len(),
            self.index.cell_count()
        );
    }

    /// Switch tools. Clears the selection and ends any active gesture.
    pub fn set_tool(&mut self, tool: Tool) -> Effects {
        let mut effects = self.cancel_gesture();
        if self.selection.take().is_some() {
            effects |= Effects::SELECTION_CHANGED | Effects::REDRAW;
        }
        self.tool = tool;
        effects
    }

    /// Replace the style used for new elements.
    pub fn set_style(&mut self, style: Style) -> BoardResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Record a new canvas size in screen pixels.
    pub fn set_canvas_size(&mut self, size: Size) -> Effects {
        if self.viewport.canvas_size == size {
            return Effects::empty();
        }
        self.viewport.canvas_size = size;
        Effects::VIEW_CHANGED | Effects::REDRAW
    }

    /// Set pan and scale directly. The scale is clamped to the configured range.
    ///
    /// Non-finite values are ignored and the view is left unchanged.
    pub fn set_view(&mut self, pan: Vec2, scale: f64) -> Effects {
        if !(pan.is_finite() && scale.is_finite()) {
            log::warn!("ignoring non-finite view {pan:?} at scale {scale}");
            return Effects::empty();
        }
        self.viewport.pan = pan;
        self.viewport.set_scale(scale, &self.config.zoom_limits());
        Effects::VIEW_CHANGED | Effects::REDRAW
    }

    /// Add an element with the current style, as if it had just been drawn.
    ///
    /// Text sizes are estimated from the content and `size` is ignored for them.
    pub fn add_shape(&mut self, shape: Shape, origin: Point, size: Vec2) -> BoardResult<ElementId> {
        let id = self.push_shape(shape, origin, size)?;
        self.rebuild_index();
        Ok(id)
    }

    /// Add many elements, rebuilding the index once at the end.
    ///
    /// Every item is validated first; if any is invalid nothing is added and the
    /// error names its position in `items`.
    pub fn extend_shapes<I>(&mut self, items: I) -> BoardResult<Vec<ElementId>>
    where
        I: IntoIterator<Item = (Shape, Point, Vec2)>,
    {
        let pending = items
            .into_iter()
            .enumerate()
            .map(|(i, (shape, origin, size))| self.prepare(i, shape, origin, size))
            .collect::<BoardResult<Vec<_>>>()?;
        let ids: Vec<ElementId> = pending.into_iter().map(|e| self.commit_new(e)).collect();
        if !ids.is_empty() {
            self.rebuild_index();
        }
        Ok(ids)
    }

    fn push_shape(&mut self, shape: Shape, origin: Point, size: Vec2) -> BoardResult<ElementId> {
        let element = self.prepare(self.store.len(), shape, origin, size)?;
        Ok(self.commit_new(element))
    }

    /// A validated element in the current style, not yet given an id.
    fn prepare(&self, index: usize, shape: Shape, origin: Point, size: Vec2) -> BoardResult<Element> {
        let element = Element::from_parts(ElementId(0), shape, origin, size, self.style.clone());
        element.validate(index)?;
        Ok(element)
    }

    fn commit_new(&mut self, mut element: Element) -> ElementId {
        element.id = self.store.mint_id();
        let id = element.id;
        self.store.push(element);
        id
    }

    /// Swap in new contents and view. The caller has already validated everything.
    pub(crate) fn replace_contents(&mut self, elements: Vec<Element>, pan: Vec2, scale: f64) {
        self.cancel_gesture();
        self.selection = None;
        self.store.replace_all(elements);
        self.viewport.pan = pan;
        self.viewport.set_scale(scale, &self.config.zoom_limits());
        self.rebuild_index();
    }

    /// Active configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Committed elements in paint order.
    pub fn elements(&self) -> &ElementStore {
        &self.store
    }

    /// The spatial index over committed elements.
    pub fn index(&self) -> &GridIndex<ElementId> {
        &self.index
    }

    /// Current view.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Style applied to new elements.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Selected element id, if any.
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Selected element, if any.
    pub fn selected(&self) -> Option<&Element> {
        self.selection.and_then(|id| self.store.get(id))
    }

    /// Which gesture is running.
    pub fn gesture(&self) -> GestureKind {
        self.gesture.kind()
    }

    /// The element being drawn, before it is committed.
    pub fn in_progress(&self) -> Option<&Element> {
        match &self.gesture {
            Gesture::Drawing { element } => Some(element),
            _ => None,
        }
    }
}
