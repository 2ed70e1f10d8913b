//! Lamina Core
//!
//! Foundational drawing types for the Lamina window shell:
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`]
//! - **Color**: straight-alpha RGBA [`Color`]
//! - **Canvas**: the [`Canvas`] drawing contract layers paint through, and
//!   [`RecordingContext`], a canvas that records [`DrawCommand`]s
//!
//! # Example
//!
//! ```rust
//! use lamina_core::{Canvas, Color, DrawCommand, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(320.0, 240.0));
//! ctx.clear(Color::BLACK);
//! ctx.fill_rect_xywh(10.0, 10.0, 50.0, 20.0, Color::RED);
//!
//! assert_eq!(ctx.commands()[0], DrawCommand::Clear(Color::BLACK));
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::Color;
pub use draw::{Canvas, DrawCommand, RecordingContext};
pub use geometry::{Point, Rect, Size};
