// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elements: shared geometry and style plus kind-specific data.

use kurbo::{Point, Rect, Vec2};
use tessera_index::{Aabb2D, Bounded};

use crate::error::{BoardError, BoardResult};
use crate::types::{ElementId, ElementKind, Style};
use crate::util::rect_to_aabb;

/// Average glyph advance relative to the font size, used to estimate text extents.
const TEXT_ADVANCE: f64 = 0.6;

/// Kind-specific data of an element.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Freehand stroke through world-space points. The first point is the origin.
    Stroke {
        /// Points in drawing order.
        points: Vec<Point>,
    },
    /// Rectangle spanning the element box.
    Rectangle,
    /// Ellipse inscribed in the element box.
    Ellipse,
    /// Arrow from the origin to the far corner of the element box.
    Arrow,
    /// Text anchored at the origin.
    Text {
        /// Non-empty content.
        content: String,
    },
}

impl Shape {
    /// The tag of this shape.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Stroke { .. } => ElementKind::Stroke,
            Self::Rectangle => ElementKind::Rectangle,
            Self::Ellipse => ElementKind::Ellipse,
            Self::Arrow => ElementKind::Arrow,
            Self::Text { .. } => ElementKind::Text,
        }
    }
}

/// One item on the board.
///
/// `size` may be negative on either axis when a shape was dragged up or left
/// of where it started. [`Element::bounds`] keeps that orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub(crate) id: ElementId,
    /// World-space origin: where the pointer went down.
    pub origin: Point,
    /// Signed width and height from the origin.
    pub size: Vec2,
    /// Style captured at creation.
    pub style: Style,
    /// Kind-specific data.
    pub shape: Shape,
}

impl Element {
    /// Start a new element of a drag-drawn kind at `origin` with zero size.
    ///
    /// Strokes begin with the origin as their first point. Text elements are
    /// built with [`Element::text`] instead; passing [`ElementKind::Text`]
    /// here yields an empty label.
    pub fn begin(id: ElementId, kind: ElementKind, origin: Point, style: Style) -> Self {
        let shape = match kind {
            ElementKind::Stroke => Shape::Stroke {
                points: vec![origin],
            },
            ElementKind::Rectangle => Shape::Rectangle,
            ElementKind::Ellipse => Shape::Ellipse,
            ElementKind::Arrow => Shape::Arrow,
            ElementKind::Text => Shape::Text {
                content: String::new(),
            },
        };
        Self {
            id,
            origin,
            size: Vec2::ZERO,
            style,
            shape,
        }
    }

    /// A finished text element. Its size is estimated from the content and font size.
    pub fn text(id: ElementId, origin: Point, style: Style, content: String) -> Self {
        let size = estimate_text_size(&content, style.font_size());
        Self {
            id,
            origin,
            size,
            style,
            shape: Shape::Text { content },
        }
    }

    /// Assemble an element from its parts.
    ///
    /// `size` is only kept for box kinds: strokes get a zero size and text an
    /// estimate from its content.
    pub(crate) fn from_parts(id: ElementId, shape: Shape, origin: Point, size: Vec2, style: Style) -> Self {
        let size = match &shape {
            Shape::Stroke { .. } => Vec2::ZERO,
            Shape::Text { content } => estimate_text_size(content, style.font_size()),
            Shape::Rectangle | Shape::Ellipse | Shape::Arrow => size,
        };
        Self {
            id,
            origin,
            size,
            style,
            shape,
        }
    }

    /// Identity of this element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The tag of this element.
    pub fn kind(&self) -> ElementKind {
        self.shape.kind()
    }

    /// Stroke points; empty for other kinds.
    pub fn points(&self) -> &[Point] {
        match &self.shape {
            Shape::Stroke { points } => points,
            _ => &[],
        }
    }

    /// Text content, if this is a text element.
    pub fn content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content } => Some(content),
            _ => None,
        }
    }

    /// `origin + size`: the corner diagonally opposite the origin (the arrow tip).
    pub fn far_corner(&self) -> Point {
        self.origin + self.size
    }

    /// The element box exactly as stored, possibly inverted.
    pub fn raw_rect(&self) -> Rect {
        let far = self.far_corner();
        Rect::new(self.origin.x, self.origin.y, far.x, far.y)
    }

    /// World-space bounding box.
    ///
    /// Strokes use the box around their points, which is always ordered.
    /// Other kinds use [`Element::raw_rect`], which is inverted along any
    /// axis with a negative size; callers choose whether to normalize.
    pub fn bounds(&self) -> Rect {
        match &self.shape {
            Shape::Stroke { points } => match points.split_first() {
                Some((first, rest)) => rest
                    .iter()
                    .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
                None => self.raw_rect(),
            },
            _ => self.raw_rect(),
        }
    }

    /// Check that the geometry is finite, the style is in range, and the
    /// kind-specific data is present. `index` is reported in the error.
    pub(crate) fn validate(&self, index: usize) -> BoardResult<()> {
        let fail = |reason: String| Err(BoardError::InvalidElement { index, reason });
        if !(self.origin.is_finite() && self.size.is_finite()) {
            return fail(format!("non-finite geometry {:?} {:?}", self.origin, self.size));
        }
        if let Err(e) = self.style.validate() {
            return fail(e.to_string());
        }
        match &self.shape {
            Shape::Stroke { points } if points.is_empty() => fail("pen stroke has no points".to_owned()),
            Shape::Stroke { points } if !points.iter().all(|p| p.is_finite()) => {
                fail("pen stroke has a non-finite point".to_owned())
            }
            Shape::Text { content } if content.is_empty() => fail("text is empty".to_owned()),
            _ => Ok(()),
        }
    }

    /// Move the element and every stroke point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
        if let Shape::Stroke { points } = &mut self.shape {
            for p in points {
                *p += delta;
            }
        }
    }

    /// Follow the pointer while drawing.
    ///
    /// Strokes append `p`. Box kinds set `size = p - origin`, which may be
    /// negative. Text is fixed at creation and ignores this.
    pub fn extend_to(&mut self, p: Point) {
        match &mut self.shape {
            Shape::Stroke { points } => points.push(p),
            Shape::Rectangle | Shape::Ellipse | Shape::Arrow => self.size = p - self.origin,
            Shape::Text { .. } => {}
        }
    }
}

impl Bounded for Element {
    type Key = ElementId;

    fn key(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Aabb2D<f64> {
        rect_to_aabb(Self::bounds(self))
    }
}

/// Rough single-line text extent for a font size.
pub(crate) fn estimate_text_size(content: &str, font_size: f64) -> Vec2 {
    #[allow(
        clippy::cast_precision_loss,
        reason = "Character counts never approach f64 precision limits."
    )]
    let chars = content.chars().count() as f64;
    Vec2::new(chars * TEXT_ADVANCE * font_size, font_size)
}
