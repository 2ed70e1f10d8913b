//! Platform events fed into a window by the embedding event loop

use crate::input::{InputState, Key, Modifiers, TouchId};

/// Events delivered by the host event loop
///
/// Input variants short-circuit through the layer stack (topmost first);
/// the rest are broadcasts or window-level requests.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Text input character
    Char { c: char, modifiers: Modifiers },
    /// Key press, release, or repeat
    Key {
        key: Key,
        state: InputState,
        modifiers: Modifiers,
    },
    /// Pointer button or motion
    Mouse {
        x: i32,
        y: i32,
        state: InputState,
        modifiers: Modifiers,
    },
    /// Scroll wheel
    MouseWheel { delta: f32, modifiers: Modifiers },
    /// Touch contact
    Touch {
        owner: TouchId,
        state: InputState,
        x: f32,
        y: f32,
    },
    /// Named UI state change, forwarded to every layer
    UiStateChanged { name: String, value: String },
    /// Surface was resized
    Resized {
        /// New width in physical pixels
        width: i32,
        /// New height in physical pixels
        height: i32,
    },
    /// A backend context finished attaching
    BackendCreated,
    /// Time to render a frame
    Paint,
}

impl Event {
    /// Whether this event propagates through layers until one consumes it
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Event::Char { .. }
                | Event::Key { .. }
                | Event::Mouse { .. }
                | Event::MouseWheel { .. }
                | Event::Touch { .. }
        )
    }
}
