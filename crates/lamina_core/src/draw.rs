//! Canvas contract and command recording
//!
//! [`Canvas`] is the drawing surface handed to layers during paint. Backends
//! implement it directly over their pixel storage; [`RecordingContext`]
//! implements it by recording [`DrawCommand`]s for later inspection or replay.

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{Rect, Size};

/// A single recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill the entire surface, ignoring translation
    Clear(Color),
    /// Fill a rectangle in the current coordinate space
    FillRect { rect: Rect, color: Color },
    /// Push a translation onto the transform stack
    PushTranslate(f32, f32),
    /// Pop the most recent translation
    PopTranslate,
    /// Submit pending work
    Flush,
}

/// Drawing surface used by layers
///
/// Translations are stack-based: every [`Canvas::translate`] must be balanced
/// by a [`Canvas::restore`] before the layer returns from paint.
pub trait Canvas {
    /// Size of the drawable area in pixels
    fn size(&self) -> Size;

    /// Fill the whole surface with a color
    fn clear(&mut self, color: Color);

    /// Fill a rectangle with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Offset all following drawing by (dx, dy)
    fn translate(&mut self, dx: f32, dy: f32);

    /// Undo the most recent [`Canvas::translate`]
    fn restore(&mut self);

    /// Submit queued drawing commands
    fn flush(&mut self);

    /// Fill a rectangle at (x, y) with width/height
    fn fill_rect_xywh(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.fill_rect(Rect::new(x, y, width, height), color);
    }

    /// Fill the whole surface through the rectangle path (blends like any fill)
    fn fill_all(&mut self, color: Color) {
        let size = self.size();
        self.fill_rect(Rect::from_size(size), color);
    }
}

/// A canvas that records every call as a [`DrawCommand`]
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    translate_stack: SmallVec<[(f32, f32); 4]>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            translate_stack: SmallVec::new(),
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop all recorded commands and reset the transform stack
    pub fn clear_commands(&mut self) {
        self.commands.clear();
        self.translate_stack.clear();
    }

    /// Accumulated translation of the current transform stack
    pub fn current_offset(&self) -> (f32, f32) {
        self.translate_stack
            .iter()
            .fold((0.0, 0.0), |(x, y), (dx, dy)| (x + dx, y + dy))
    }
}

impl Canvas for RecordingContext {
    fn size(&self) -> Size {
        self.viewport
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.translate_stack.push((dx, dy));
        self.commands.push(DrawCommand::PushTranslate(dx, dy));
    }

    fn restore(&mut self) {
        if self.translate_stack.pop().is_some() {
            self.commands.push(DrawCommand::PopTranslate);
        } else {
            tracing::warn!("RecordingContext::restore called with empty transform stack");
        }
    }

    fn flush(&mut self) {
        self.commands.push(DrawCommand::Flush);
    }
}
