//! Layer capability set
//!
//! A [`Layer`] is a pluggable unit of input handling and drawing. Every
//! callback has a default so concrete layers override only what they need.

use lamina_core::Canvas;
use lamina_platform::{InputState, Key, Modifiers, TouchId};

/// A unit of input handling and drawing stacked inside a window
///
/// Input callbacks return `true` when the event was consumed, which stops it
/// from reaching layers further down the stack.
pub trait Layer {
    /// A new backend context is ready; (re)allocate backend resources
    fn on_backend_created(&mut self) {}

    /// Text input
    fn on_char(&mut self, _c: char, _modifiers: Modifiers) -> bool {
        false
    }

    /// Key press, release, or repeat
    fn on_key(&mut self, _key: Key, _state: InputState, _modifiers: Modifiers) -> bool {
        false
    }

    /// Pointer button or motion at window coordinates
    fn on_mouse(&mut self, _x: i32, _y: i32, _state: InputState, _modifiers: Modifiers) -> bool {
        false
    }

    /// Scroll wheel
    fn on_mouse_wheel(&mut self, _delta: f32, _modifiers: Modifiers) -> bool {
        false
    }

    /// Touch contact owned by `owner`
    fn on_touch(&mut self, _owner: TouchId, _state: InputState, _x: f32, _y: f32) -> bool {
        false
    }

    /// Named UI state change; unknown names should be ignored
    fn on_ui_state_changed(&mut self, _name: &str, _value: &str) {}

    /// The backend render target was resized
    fn on_resize(&mut self, _width: i32, _height: i32) {}

    /// Draw onto the frame's canvas
    fn on_paint(&mut self, _canvas: &mut dyn Canvas) {}
}
