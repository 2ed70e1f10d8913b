//! Lamina Window
//!
//! A thin presentation shell around a rendering backend. A [`Window`] owns at
//! most one backend context and a stack of [`Layer`]s, fans host events out
//! to the stack, and orchestrates painting.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use lamina_core::{Canvas, Color};
//! use lamina_window::{Layer, Window};
//!
//! struct Background;
//!
//! impl Layer for Background {
//!     fn on_paint(&mut self, canvas: &mut dyn Canvas) {
//!         canvas.clear(Color::BLACK);
//!     }
//! }
//!
//! let background = Rc::new(RefCell::new(Background));
//! let mut window = Window::new();
//! window.add_layer(&background);
//!
//! // No backend yet: paint services the request without drawing
//! window.inval();
//! window.on_paint();
//! assert!(!window.is_invalidated());
//! assert_eq!(window.width(), 0);
//! ```

mod layer;
mod window;

pub use layer::Layer;
pub use window::Window;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::layer::Layer;
    pub use crate::window::Window;
    pub use lamina_core::{Canvas, Color, Rect};
    pub use lamina_platform::prelude::*;
}
