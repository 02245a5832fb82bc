// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events, the text-entry seam, and the FIFO dispatcher.
//!
//! Events are applied to a [`Board`] one at a time, each to completion, in the
//! order they were queued. Nothing here blocks; text content is requested
//! synchronously from a [`TextEntry`] when a text element is placed.

use std::collections::VecDeque;

use kurbo::{Point, Size};

use crate::board::Board;
use crate::types::Tool;

/// Pointer buttons the board distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button, pen contact, or touch.
    Primary,
    /// Middle button; always pans.
    Middle,
    /// Right button; ignored.
    Secondary,
}

/// Keys the board reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// While held, a pointer press pans regardless of the active tool.
    Space,
    /// Any other key.
    Other,
}

/// One user input. Positions are in screen space.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A button was pressed.
    PointerDown {
        /// Screen position.
        pos: Point,
        /// Which button.
        button: PointerButton,
    },
    /// The pointer moved.
    PointerMove {
        /// Screen position.
        pos: Point,
    },
    /// A button was released.
    PointerUp {
        /// Screen position.
        pos: Point,
        /// Which button.
        button: PointerButton,
    },
    /// Wheel scrolled at a screen position. Positive `delta_y` zooms out.
    Wheel {
        /// Cursor position.
        pos: Point,
        /// Vertical scroll amount; only the sign is used.
        delta_y: f64,
    },
    /// A key went down.
    KeyDown(Key),
    /// A key came up.
    KeyUp(Key),
    /// The active tool changed.
    SelectTool(Tool),
    /// The canvas was resized.
    Resize(Size),
    /// Remove the most recently created element.
    Undo,
}

bitflags::bitflags! {
    /// What changed as a result of handling events.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Effects: u8 {
        /// The next frame looks different.
        const REDRAW            = 0b0000_0001;
        /// The spatial index was rebuilt.
        const INDEX_REBUILT     = 0b0000_0010;
        /// The selection changed.
        const SELECTION_CHANGED = 0b0000_0100;
        /// Pan, scale, or canvas size changed.
        const VIEW_CHANGED      = 0b0000_1000;
        /// Committed content changed and should be saved.
        const PERSIST           = 0b0001_0000;
    }
}

/// Supplies text content when a text element is placed.
///
/// Returning `None` or an empty string places nothing.
pub trait TextEntry {
    /// Ask for the content of a text element anchored at world point `at`.
    fn request_text(&mut self, at: Point) -> Option<String>;
}

impl<F: FnMut(Point) -> Option<String>> TextEntry for F {
    fn request_text(&mut self, at: Point) -> Option<String> {
        self(at)
    }
}

/// A [`TextEntry`] that never supplies text.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTextEntry;

impl TextEntry for NoTextEntry {
    fn request_text(&mut self, _at: Point) -> Option<String> {
        None
    }
}

/// First-in, first-out queue of pending input.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<InputEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event behind everything already pending.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every pending event to `board` in order and return the combined effects.
    pub fn dispatch(&mut self, board: &mut Board, text: &mut impl TextEntry) -> Effects {
        let mut effects = Effects::empty();
        while let Some(event) = self.pending.pop_front() {
            effects |= board.handle(event, text);
        }
        effects
    }
}

impl Extend<InputEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = InputEvent>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    #[test]
    fn closures_are_text_entries() {
        let mut calls = 0;
        let mut entry = |_at: Point| {
            calls += 1;
            Some("hi".to_owned())
        };
        assert_eq!(entry.request_text(Point::ORIGIN).as_deref(), Some("hi"));
        assert_eq!(calls, 1);
        assert_eq!(NoTextEntry.request_text(Point::ORIGIN), None);
    }

    #[test]
    fn dispatch_drains_in_order() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let mut queue = EventQueue::new();
        queue.extend([
            InputEvent::Resize(Size::new(800.0, 600.0)),
            InputEvent::SelectTool(Tool::Rectangle),
            InputEvent::PointerDown {
                pos: Point::new(10.0, 10.0),
                button: PointerButton::Primary,
            },
            InputEvent::PointerMove {
                pos: Point::new(60.0, 40.0),
            },
            InputEvent::PointerUp {
                pos: Point::new(60.0, 40.0),
                button: PointerButton::Primary,
            },
        ]);
        assert_eq!(queue.len(), 5);
        let effects = queue.dispatch(&mut board, &mut NoTextEntry);
        assert!(queue.is_empty());
        assert!(effects.contains(Effects::REDRAW | Effects::INDEX_REBUILT | Effects::PERSIST | Effects::VIEW_CHANGED));
        assert_eq!(board.elements().len(), 1);
    }

    #[test]
    fn empty_queue_has_no_effects() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        assert_eq!(EventQueue::new().dispatch(&mut board, &mut NoTextEntry), Effects::empty());
    }
}
