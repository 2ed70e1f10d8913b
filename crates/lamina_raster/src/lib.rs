//! Lamina Raster Backend
//!
//! A CPU implementation of the [`lamina_platform::WindowContext`] contract.
//! It fills solid rectangles into a float RGBA backbuffer and presents by
//! copying into a front buffer the host can read back.
//!
//! # Example
//!
//! ```rust
//! use lamina_platform::{DisplayParams, WindowContext};
//! use lamina_raster::RasterWindowContext;
//!
//! let mut context = RasterWindowContext::new(&DisplayParams::default().size(64, 64))?;
//! if let Some(surface) = context.backbuffer_surface() {
//!     surface.canvas().clear(lamina_core::Color::WHITE);
//!     surface.flush();
//! }
//! context.swap_buffers();
//! assert_eq!(context.frames_presented(), 1);
//! # Ok::<(), lamina_platform::PlatformError>(())
//! ```

mod context;
mod surface;

pub use context::RasterWindowContext;
pub use surface::{Pixel, RasterSurface};
