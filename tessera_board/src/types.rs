// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: identifiers, kinds, tools, colors, and styles.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Identity of an element.
///
/// Minted by the [`ElementStore`](crate::ElementStore) in increasing order and
/// never reused, so an id of an undone element can never alias a later one.
/// Higher ids are newer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The five element kinds. Serialized names follow the legacy board format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Freehand stroke (`"pen"`).
    #[serde(rename = "pen")]
    Stroke,
    /// Axis-aligned rectangle.
    Rectangle,
    /// Ellipse inscribed in the element box.
    Ellipse,
    /// Single line of text anchored at the origin.
    Text,
    /// Line from the origin to the far corner with a head at the far end.
    Arrow,
}

/// Active input tool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pick and drag elements.
    #[default]
    Selection,
    /// Pan the view with the primary button.
    Hand,
    /// Freehand strokes.
    Pen,
    /// Rectangles.
    Rectangle,
    /// Ellipses.
    Ellipse,
    /// Arrows.
    Arrow,
    /// Text labels.
    Text,
}

impl Tool {
    /// The kind of element this tool creates, if it creates one.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            Self::Selection | Self::Hand => None,
            Self::Pen => Some(ElementKind::Stroke),
            Self::Rectangle => Some(ElementKind::Rectangle),
            Self::Ellipse => Some(ElementKind::Ellipse),
            Self::Arrow => Some(ElementKind::Arrow),
            Self::Text => Some(ElementKind::Text),
        }
    }
}

/// Line dash pattern.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Long dashes.
    Dashed,
    /// Short dots.
    Dotted,
}

impl StrokeStyle {
    /// Dash pattern as alternating on/off lengths; empty for solid.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[10.0, 5.0],
            Self::Dotted => &[2.0, 4.0],
        }
    }
}

/// Opaque RGB color, written as `#rrggbb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = BoardError;

    fn from_str(s: &str) -> BoardResult<Self> {
        let bad = || BoardError::InvalidColor(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc is #aabbcc
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = BoardError;

    fn try_from(s: String) -> BoardResult<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Style attributes captured when an element is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Outline (and text) color.
    pub stroke_color: Color,
    /// Interior color, used only when `filled`.
    pub fill_color: Color,
    /// Line width in world units; also sets the text size.
    pub stroke_width: u32,
    /// Dash pattern for outlines.
    pub stroke_style: StrokeStyle,
    /// Whole-element opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Whether closed shapes are filled with `fill_color`.
    pub filled: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            fill_color: Color::WHITE,
            stroke_width: 2,
            stroke_style: StrokeStyle::Solid,
            opacity: 1.0,
            filled: false,
        }
    }
}

impl Style {
    /// Check ranges: positive stroke width, opacity within `0.0..=1.0`.
    pub fn validate(&self) -> BoardResult<()> {
        if self.stroke_width == 0 {
            return Err(BoardError::InvalidStyle {
                reason: "stroke width must be positive".to_owned(),
            });
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(BoardError::InvalidStyle {
                reason: format!("opacity {} is outside 0..=1", self.opacity),
            });
        }
        Ok(())
    }

    /// Font size for text elements drawn with this style.
    pub fn font_size(&self) -> f64 {
        f64::from(self.stroke_width) * 5.0
    }
}
