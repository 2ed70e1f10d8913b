//! Backend context contract
//!
//! A [`WindowContext`] owns the backend's render target and presents frames.
//! Windows hold at most one context and drop it to destroy it.

use std::any::Any;

use lamina_core::Canvas;

use crate::display::DisplayParams;

/// Per-frame drawable surface obtained from a [`WindowContext`]
pub trait Surface {
    /// Canvas drawing into this surface
    fn canvas(&mut self) -> &mut dyn Canvas;

    /// Submit all queued drawing
    fn flush(&mut self);
}

/// Backend context implemented by each rendering backend
pub trait WindowContext {
    /// Drawable surface for the current frame
    ///
    /// Returns `None` when the backend is lost or not ready; the caller skips
    /// the frame.
    fn backbuffer_surface(&mut self) -> Option<&mut dyn Surface>;

    /// Present the current frame
    fn swap_buffers(&mut self);

    /// Resize the render target
    fn resize(&mut self, width: i32, height: i32);

    /// Reconfigure the backend
    fn set_display_params(&mut self, params: &DisplayParams);

    /// Parameters currently in effect
    fn display_params(&self) -> &DisplayParams;

    /// Render target width in physical pixels
    fn width(&self) -> i32;

    /// Render target height in physical pixels
    fn height(&self) -> i32;

    /// MSAA sample count of the render target
    fn sample_count(&self) -> i32;

    /// Stencil buffer depth in bits
    fn stencil_bits(&self) -> i32;

    /// Backend GPU context handle, `None` for CPU backends
    fn gpu_context(&self) -> Option<&dyn Any> {
        None
    }

    /// Downcast support for hosts that need the concrete backend
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
