//! Lamina Platform Contracts
//!
//! Platform-agnostic types exchanged between an embedding event loop, a
//! window, and a rendering backend.
//!
//! # Architecture
//!
//! - [`Event`] and the input payload types describe what the host feeds in
//! - [`DisplayParams`] describes the render target the application wants
//! - [`WindowContext`] and [`Surface`] are implemented by rendering backends
//!
//! # Backend Implementations
//!
//! - `lamina_raster` - CPU raster backend

mod context;
mod display;
mod error;
mod event;
mod input;

// Re-export all public types
pub use context::{Surface, WindowContext};
pub use display::{ColorSettings, ColorSpace, ColorType, DisplayParams};
pub use error::{PlatformError, Result};
pub use event::Event;
pub use input::{InputState, Key, Modifiers, TouchId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{Surface, WindowContext};
    pub use crate::display::{ColorSpace, DisplayParams};
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::Event;
    pub use crate::input::{InputState, Key, Modifiers, TouchId};
}
