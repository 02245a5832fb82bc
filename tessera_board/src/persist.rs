// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of a board and a file-backed local store.
//!
//! The layout is `{ "version"?, "elements": [...], "pan": {"x","y"}, "scale" }`
//! with each element a flat record. Imports are validated in full before any
//! state is replaced, so a failed import leaves the board untouched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::element::{Element, Shape};
use crate::error::{BoardError, BoardResult};
use crate::types::{Color, ElementId, ElementKind, StrokeStyle, Style};

/// Newest snapshot version this build writes and reads.
pub const SNAPSHOT_VERSION: u32 = 1;

/// File name used by [`LocalStore::in_dir`].
pub const DEFAULT_FILE_NAME: &str = "board.json";

/// A point as `{"x": .., "y": ..}`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point {
    fn from(p: PointRecord) -> Self {
        Self::new(p.x, p.y)
    }
}

fn default_stroke() -> Color {
    Style::default().stroke_color
}

fn default_fill() -> Color {
    Style::default().fill_color
}

fn default_width() -> u32 {
    Style::default().stroke_width
}

fn default_opacity() -> f64 {
    Style::default().opacity
}

fn default_hollow() -> bool {
    !Style::default().filled
}

/// One element as a flat record.
///
/// Only `type`, `x`, and `y` are required; everything else falls back to the
/// default style and a zero size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// Element kind (`"pen"`, `"rectangle"`, ...).
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Origin x.
    pub x: f64,
    /// Origin y.
    pub y: f64,
    /// Signed width. Always 0 for pen strokes.
    #[serde(default)]
    pub w: f64,
    /// Signed height. Always 0 for pen strokes.
    #[serde(default)]
    pub h: f64,
    /// Outline color.
    #[serde(default = "default_stroke")]
    pub stroke: Color,
    /// Fill color.
    #[serde(default = "default_fill")]
    pub fill: Color,
    /// Stroke width.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Dash style.
    #[serde(default)]
    pub style: StrokeStyle,
    /// Opacity in `0.0..=1.0`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Whether the shape is drawn without fill.
    #[serde(default = "default_hollow")]
    pub is_hollow: bool,
    /// Pen points; empty for other kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<PointRecord>,
    /// Text content, for text elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ElementRecord {
    /// Flatten an element.
    pub fn from_element(e: &Element) -> Self {
        let s = &e.style;
        Self {
            kind: e.kind(),
            x: e.origin.x,
            y: e.origin.y,
            w: e.size.x,
            h: e.size.y,
            stroke: s.stroke_color,
            fill: s.fill_color,
            width: s.stroke_width,
            style: s.stroke_style,
            opacity: s.opacity,
            is_hollow: !s.filled,
            points: e.points().iter().copied().map(PointRecord::from).collect(),
            text: e.content().map(str::to_owned),
        }
    }

    /// Rebuild and validate an element. `index` is the record's position, for errors.
    ///
    /// The returned element carries a placeholder id; the store assigns a real one.
    pub(crate) fn into_element(self, index: usize) -> BoardResult<Element> {
        let style = Style {
            stroke_color: self.stroke,
            fill_color: self.fill,
            stroke_width: self.width,
            stroke_style: self.style,
            opacity: self.opacity,
            filled: !self.is_hollow,
        };
        let shape = match self.kind {
            ElementKind::Stroke => Shape::Stroke {
                points: self.points.into_iter().map(Point::from).collect(),
            },
            ElementKind::Rectangle => Shape::Rectangle,
            ElementKind::Ellipse => Shape::Ellipse,
            ElementKind::Arrow => Shape::Arrow,
            ElementKind::Text => Shape::Text {
                content: self.text.ok_or_else(|| BoardError::InvalidElement {
                    index,
                    reason: "text element has no text".to_owned(),
                })?,
            },
        };
        let element = Element::from_parts(
            ElementId(0),
            shape,
            Point::new(self.x, self.y),
            Vec2::new(self.w, self.h),
            style,
        );
        element.validate(index)?;
        Ok(element)
    }
}

/// A whole board: elements in paint order plus the view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Schema version. Absent in files from before versioning, read as 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Elements, bottom to top.
    pub elements: Vec<ElementRecord>,
    /// Pan offset in screen units.
    pub pan: PointRecord,
    /// Zoom scale.
    pub scale: f64,
}

/// What an import did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The input was empty or `null`; nothing changed.
    Empty,
    /// The board was replaced.
    Replaced {
        /// Number of elements now on the board.
        elements: usize,
    },
}

impl Board {
    /// Capture the committed elements and the view.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            version: Some(SNAPSHOT_VERSION),
            elements: self.store.iter().map(ElementRecord::from_element).collect(),
            pan: Point::new(self.viewport.pan.x, self.viewport.pan.y).into(),
            scale: self.viewport.scale(),
        }
    }

    /// Serialize the board as JSON.
    pub fn export_json(&self) -> BoardResult<String> {
        let json = serde_json::to_string(&self.snapshot())?;
        log::info!("exported {} elements as JSON", self.store.len());
        Ok(json)
    }

    /// Replace the board with a snapshot.
    ///
    /// Everything is validated first; on error the board is unchanged.
    /// Selection and any active gesture are dropped on success.
    pub fn restore(&mut self, snapshot: BoardSnapshot) -> BoardResult<ImportOutcome> {
        let result = Self::decode(snapshot);
        let (elements, pan, scale) = match result {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("import rejected: {e}");
                return Err(e);
            }
        };
        let count = elements.len();
        self.replace_contents(elements, pan, scale);
        log::info!("imported {count} elements");
        Ok(ImportOutcome::Replaced { elements: count })
    }

    fn decode(snapshot: BoardSnapshot) -> BoardResult<(Vec<Element>, Vec2, f64)> {
        let version = snapshot.version.unwrap_or(1);
        if version > SNAPSHOT_VERSION {
            return Err(BoardError::UnsupportedVersion {
                found: version,
                supported: SNAPSHOT_VERSION,
            });
        }
        let pan = Vec2::new(snapshot.pan.x, snapshot.pan.y);
        if !pan.is_finite() {
            return Err(BoardError::InvalidViewport {
                reason: format!("pan {pan:?} is not finite"),
            });
        }
        if !(snapshot.scale.is_finite() && snapshot.scale > 0.0) {
            return Err(BoardError::InvalidViewport {
                reason: format!("scale {} must be finite and positive", snapshot.scale),
            });
        }
        let elements = snapshot
            .elements
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_element(i))
            .collect::<BoardResult<Vec<_>>>()?;
        Ok((elements, pan, snapshot.scale))
    }

    /// Replace the board from JSON text.
    ///
    /// Blank input and `null` are a no-op. Anything else must be a complete,
    /// valid snapshot or the board is left as it was.
    pub fn import_json(&mut self, json: &str) -> BoardResult<ImportOutcome> {
        if json.trim().is_empty() {
            return Ok(ImportOutcome::Empty);
        }
        let snapshot: Option<BoardSnapshot> = match serde_json::from_str(json) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("import rejected: {e}");
                return Err(e.into());
            }
        };
        match snapshot {
            Some(s) => self.restore(s),
            None => Ok(ImportOutcome::Empty),
        }
    }
}

/// Saves and restores a board as a JSON file.
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store backed by [`DEFAULT_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the board, creating parent directories as needed.
    pub fn save(&self, board: &Board) -> BoardResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, board.export_json()?)?;
        log::info!("saved board to {}", self.path.display());
        Ok(())
    }

    /// Load the board. A missing file is a no-op.
    pub fn load(&self, board: &mut Board) -> BoardResult<ImportOutcome> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no saved board at {}", self.path.display());
                return Ok(ImportOutcome::Empty);
            }
            Err(e) => return Err(e.into()),
        };
        let outcome = board.import_json(&json)?;
        log::info!("loaded board from {}", self.path.display());
        Ok(outcome)
    }
}
