// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output: a [`Renderer`] that writes markup, and whole-board export.

use kurbo::Rect;

use crate::board::Board;
use crate::element::{Element, Shape};
use crate::render::{Renderer, SELECTION_COLOR, SELECTION_DASH, arrow_path, stroke_path};
use crate::types::StrokeStyle;
use crate::viewport::Viewport;

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn dasharray(style: StrokeStyle) -> Option<String> {
    let pattern = style.dash_pattern();
    if pattern.is_empty() {
        return None;
    }
    let parts: Vec<String> = pattern.iter().map(f64::to_string).collect();
    Some(parts.join(" "))
}

/// Stroke, dash, and opacity attributes shared by every element.
fn paint_attrs(e: &Element) -> String {
    let s = &e.style;
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{}""#,
        s.stroke_color, s.stroke_width
    );
    if let Some(dash) = dasharray(s.stroke_style) {
        attrs.push_str(&format!(r#" stroke-dasharray="{dash}""#));
    }
    if s.opacity < 1.0 {
        attrs.push_str(&format!(r#" opacity="{:.3}""#, s.opacity));
    }
    attrs
}

fn fill_attr(e: &Element) -> String {
    if e.style.filled {
        format!(r#"fill="{}""#, e.style.fill_color)
    } else {
        r#"fill="none""#.to_owned()
    }
}

/// Append one element as an SVG node, in world coordinates.
fn write_element(out: &mut String, e: &Element) {
    let paint = paint_attrs(e);
    match &e.shape {
        Shape::Rectangle => {
            let r = e.raw_rect().abs();
            out.push_str(&format!(
                r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" {} {paint}/>"#,
                r.x0,
                r.y0,
                r.width(),
                r.height(),
                fill_attr(e),
            ));
        }
        Shape::Ellipse => {
            let r = e.raw_rect().abs();
            let c = r.center();
            out.push_str(&format!(
                r#"<ellipse cx="{:.3}" cy="{:.3}" rx="{:.3}" ry="{:.3}" {} {paint}/>"#,
                c.x,
                c.y,
                r.width() / 2.0,
                r.height() / 2.0,
                fill_attr(e),
            ));
        }
        Shape::Stroke { points } => {
            out.push_str(&format!(
                r#"<path d="{}" fill="none" stroke-linecap="round" stroke-linejoin="round" {paint}/>"#,
                stroke_path(points).to_svg()
            ));
        }
        Shape::Arrow => {
            out.push_str(&format!(
                r#"<path d="{}" fill="none" {paint}/>"#,
                arrow_path(e.origin, e.far_corner()).to_svg()
            ));
        }
        Shape::Text { content } => {
            let s = &e.style;
            let mut attrs = String::new();
            if s.opacity < 1.0 {
                attrs.push_str(&format!(r#" opacity="{:.3}""#, s.opacity));
            }
            out.push_str(&format!(
                r#"<text x="{:.3}" y="{:.3}" font-size="{}" font-family="sans-serif" fill="{}" dominant-baseline="hanging"{attrs}>{}</text>"#,
                e.origin.x,
                e.origin.y,
                s.font_size(),
                s.stroke_color,
                escape_xml(content),
            ));
        }
    }
    out.push('\n');
}

/// A [`Renderer`] that produces an SVG document per frame.
///
/// The view transform is applied with a group transform, so element
/// coordinates stay in world units.
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
    out: String,
}

impl SvgRenderer {
    /// Create a renderer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The markup written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take the finished document.
    pub fn finish(self) -> String {
        self.out
    }
}

impl Renderer for SvgRenderer {
    fn begin_frame(&mut self, viewport: &Viewport) {
        let size = viewport.canvas_size;
        let s = viewport.scale();
        self.out.clear();
        self.out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        self.out.push('\n');
        self.out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            size.width, size.height
        ));
        self.out.push('\n');
        self.out.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
        self.out.push('\n');
        self.out.push_str(&format!(
            r#"<g transform="matrix({s} 0 0 {s} {} {})">"#,
            viewport.pan.x, viewport.pan.y
        ));
        self.out.push('\n');
    }

    fn draw_element(&mut self, element: &Element) {
        write_element(&mut self.out, element);
    }

    fn draw_selection(&mut self, outline: Rect, scale: f64) {
        let [on, off] = SELECTION_DASH;
        self.out.push_str(&format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="none" stroke="{SELECTION_COLOR}" stroke-width="{}" stroke-dasharray="{} {}"/>"#,
            outline.x0,
            outline.y0,
            outline.width(),
            outline.height(),
            1.0 / scale,
            on / scale,
            off / scale,
        ));
        self.out.push('\n');
    }

    fn end_frame(&mut self) {
        self.out.push_str("</g>\n</svg>\n");
    }
}

/// Every committed element as a standalone SVG document sized to the canvas.
///
/// Elements keep their world coordinates; pan and zoom are not applied and
/// nothing is culled.
pub fn export_svg(board: &Board) -> String {
    let mut r = SvgRenderer::new();
    r.begin_frame(&Viewport::new(board.viewport().canvas_size));
    for e in board.elements() {
        r.draw_element(e);
    }
    r.end_frame();
    log::info!("exported {} elements as SVG", board.elements().len());
    r.finish()
}
