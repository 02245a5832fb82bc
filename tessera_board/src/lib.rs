// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Board: the engine behind an infinite drawing canvas.
//!
//! Users place freehand strokes, rectangles, ellipses, arrows, and text on an
//! unbounded plane, pan and zoom freely, and save or export the result. This
//! crate holds everything except the pixels:
//!
//! - A uniform-grid spatial index ([`tessera_index::GridIndex`]) over element
//!   bounding boxes, rebuilt whenever committed geometry changes.
//! - Viewport culling: the visible world rectangle is queried against the
//!   index to produce a per-frame [`DrawList`].
//! - Screen ↔ world mapping with anchor-preserving wheel zoom ([`Viewport`]).
//! - A gesture controller for selection, dragging, drawing, and panning, driven
//!   by [`InputEvent`]s through [`Board::handle`] or an [`EventQueue`].
//! - Undo of the newest element, JSON import/export, a file-backed
//!   [`LocalStore`], and SVG export.
//!
//! ## API overview
//!
//! - [`Board`]: owns the elements, the index, the view, and input state.
//! - [`Element`] and [`Shape`]: one item on the board and its kind-specific data.
//! - [`ElementStore`]: elements in paint order, addressable by [`ElementId`].
//! - [`Style`], [`Color`], [`StrokeStyle`], [`Tool`]: what new elements look like and how input is interpreted.
//! - [`Renderer`]: the seam to a drawing backend; [`SvgRenderer`] writes SVG.
//! - [`BoardConfig`]: cell size, extent policy, hit margin, and zoom limits,
//!   loadable from TOML or JSON.
//!
//! Key operations:
//! - [`Board::handle`] → [`Effects`] telling the host what to redraw or save.
//! - [`Board::draw_list`] and [`Board::render`] once per frame.
//! - [`Board::hit_test`], [`Board::undo`], [`Board::query`].
//! - [`Board::import_json`] / [`Board::export_json`], [`export_svg`].
//!
//! ## Index consistency
//!
//! The index is rebuilt after every committed change: a finished draw or
//! drag, a placed text label, undo, and import. While a gesture is running the
//! index is left as it was; the element being drawn is appended
//! to the draw list regardless, and a dragged element is re-indexed on release.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use tessera_board::{Board, BoardConfig, InputEvent, NoTextEntry, PointerButton, Tool};
//!
//! let mut board = Board::new(BoardConfig::default()).unwrap();
//! board.set_canvas_size(Size::new(800.0, 600.0));
//!
//! // Draw a rectangle from (0, 0) to (100, 100).
//! board.set_tool(Tool::Rectangle);
//! for event in [
//!     InputEvent::PointerDown { pos: Point::new(0.0, 0.0), button: PointerButton::Primary },
//!     InputEvent::PointerMove { pos: Point::new(100.0, 100.0) },
//!     InputEvent::PointerUp { pos: Point::new(100.0, 100.0), button: PointerButton::Primary },
//! ] {
//!     board.handle(event, &mut NoTextEntry);
//! }
//!
//! // Select it by clicking inside.
//! board.set_tool(Tool::Selection);
//! board.handle(
//!     InputEvent::PointerDown { pos: Point::new(50.0, 50.0), button: PointerButton::Primary },
//!     &mut NoTextEntry,
//! );
//! assert!(board.selection().is_some());
//!
//! assert_eq!(board.draw_list().len(), 1);
//! assert_eq!(board.query(Rect::new(0.0, 0.0, 200.0, 200.0)).len(), 1);
//! ```
//!
//! ## Negative extents
//!
//! Dragging a box up or left of where it started gives it a negative width or
//! height. With the default [`ExtentPolicy::Normalized`] such boxes are indexed
//! and picked like any other. [`ExtentPolicy::Raw`] reproduces the legacy
//! behavior, where a reversed box can drop out of culling and picking; see
//! [`BoardConfig::extent_policy`].

mod board;
mod config;
mod controller;
mod cull;
mod element;
mod error;
mod input;
mod persist;
mod render;
mod store;
mod svg;
mod types;
mod util;
mod viewport;

pub use board::Board;
pub use config::BoardConfig;
pub use controller::GestureKind;
pub use cull::DrawList;
pub use element::{Element, Shape};
pub use error::{BoardError, BoardResult};
pub use input::{Effects, EventQueue, InputEvent, Key, NoTextEntry, PointerButton, TextEntry};
pub use persist::{
    BoardSnapshot, DEFAULT_FILE_NAME, ElementRecord, ImportOutcome, LocalStore, PointRecord,
    SNAPSHOT_VERSION,
};
pub use render::{
    ARROW_HEAD_LENGTH, Renderer, SELECTION_COLOR, SELECTION_DASH, arrow_path, stroke_path,
};
pub use store::ElementStore;
pub use svg::{SvgRenderer, export_svg};
pub use tessera_index::ExtentPolicy;
pub use types::{Color, ElementId, ElementKind, StrokeStyle, Style, Tool};
pub use viewport::{Viewport, ZoomDirection, ZoomLimits, to_world};
