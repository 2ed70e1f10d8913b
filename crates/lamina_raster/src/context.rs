//! CPU raster backend context

use std::any::Any;

use image::{Rgba, RgbaImage};
use lamina_core::Color;
use lamina_platform::{DisplayParams, PlatformError, Result, Surface, WindowContext};

use crate::surface::{Pixel, RasterSurface};

/// Software backend context with a backbuffer and a presented front buffer
///
/// Frames are drawn into the backbuffer and copied to the front buffer on
/// [`WindowContext::swap_buffers`]. Hosts read presented frames through
/// [`RasterWindowContext::front_buffer`] or [`RasterWindowContext::front_bytes`].
#[derive(Debug)]
pub struct RasterWindowContext {
    params: DisplayParams,
    backbuffer: RasterSurface,
    front: Vec<Pixel>,
    frames_presented: u64,
    lost: bool,
}

impl RasterWindowContext {
    /// Create a context sized and formatted from `params`
    pub fn new(params: &DisplayParams) -> Result<Self> {
        if params.width == 0 || params.height == 0 {
            return Err(PlatformError::ContextCreation(format!(
                "raster surface needs a non-empty size, got {}x{}",
                params.width, params.height
            )));
        }

        let settings = params.color_settings();
        tracing::debug!(
            width = params.width,
            height = params.height,
            color_type = ?settings.color_type,
            "creating raster context"
        );

        Ok(Self {
            params: params.clone(),
            backbuffer: RasterSurface::new(params.width, params.height, settings.color_type),
            front: vec![[0.0; 4]; params.width as usize * params.height as usize],
            frames_presented: 0,
            lost: false,
        })
    }

    /// Simulate losing (or regaining) the backend surface
    pub fn mark_lost(&mut self, lost: bool) {
        self.lost = lost;
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Number of frames presented
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Number of backbuffer flushes
    pub fn flush_count(&self) -> u64 {
        self.backbuffer.flush_count()
    }

    /// Backbuffer, for inspection between frames
    pub fn backbuffer(&self) -> &RasterSurface {
        &self.backbuffer
    }

    /// Color of the last presented frame at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.params.width || y >= self.params.height {
            return None;
        }
        let [r, g, b, a] = self.front[(y * self.params.width + x) as usize];
        Some(Color::rgba(r, g, b, a))
    }

    /// Last presented frame as 8-bit RGBA
    pub fn front_buffer(&self) -> RgbaImage {
        let width = self.params.width;
        RgbaImage::from_fn(width, self.params.height, |x, y| {
            let [r, g, b, a] = self.front[(y * width + x) as usize];
            Rgba(Color::rgba(r, g, b, a).to_rgba8())
        })
    }

    /// Last presented frame as raw f32 RGBA bytes, for texture upload
    pub fn front_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.front)
    }

    fn reallocate(&mut self) {
        let settings = self.params.color_settings();
        self.backbuffer =
            RasterSurface::new(self.params.width, self.params.height, settings.color_type);
        self.front = vec![[0.0; 4]; self.params.width as usize * self.params.height as usize];
    }
}

impl WindowContext for RasterWindowContext {
    fn backbuffer_surface(&mut self) -> Option<&mut dyn Surface> {
        if self.lost {
            return None;
        }
        self.backbuffer.begin_frame();
        Some(&mut self.backbuffer)
    }

    fn swap_buffers(&mut self) {
        self.front.copy_from_slice(self.backbuffer.pixels());
        self.frames_presented += 1;
        tracing::trace!(frame = self.frames_presented, "raster frame presented");
    }

    fn resize(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            tracing::debug!(width, height, "ignoring resize to empty raster surface");
            return;
        }
        self.params.width = width as u32;
        self.params.height = height as u32;
        self.reallocate();
    }

    fn set_display_params(&mut self, params: &DisplayParams) {
        let mut params = params.clone();
        if params.width == 0 || params.height == 0 {
            tracing::debug!("keeping current raster size for empty display params");
            params.width = self.params.width;
            params.height = self.params.height;
        }

        let needs_realloc = params.width != self.params.width
            || params.height != self.params.height
            || params.color_settings() != self.params.color_settings();

        self.params = params;
        if needs_realloc {
            self.reallocate();
        }
    }

    fn display_params(&self) -> &DisplayParams {
        &self.params
    }

    fn width(&self) -> i32 {
        self.backbuffer.width() as i32
    }

    fn height(&self) -> i32 {
        self.backbuffer.height() as i32
    }

    fn sample_count(&self) -> i32 {
        self.params.msaa_sample_count as i32
    }

    fn stencil_bits(&self) -> i32 {
        self.params.stencil_bits as i32
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::Canvas;
    use lamina_platform::{ColorSpace, ColorType};

    fn small_params() -> DisplayParams {
        DisplayParams::default().size(8, 4)
    }

    #[test]
    fn test_empty_size_is_rejected() {
        let err = RasterWindowContext::new(&DisplayParams::default().size(0, 10)).unwrap_err();
        assert!(matches!(err, PlatformError::ContextCreation(_)));
    }

    #[test]
    fn test_color_space_selects_format() {
        let srgb = RasterWindowContext::new(&small_params()).unwrap();
        assert_eq!(srgb.backbuffer().color_type(), ColorType::Rgba8888);

        let p3 = RasterWindowContext::new(&small_params().color_space(ColorSpace::DisplayP3))
            .unwrap();
        assert_eq!(p3.backbuffer().color_type(), ColorType::RgbaF16);
    }

    #[test]
    fn test_reports_requested_capabilities() {
        let context =
            RasterWindowContext::new(&small_params().msaa(4).stencil_bits(0)).unwrap();
        assert_eq!(context.width(), 8);
        assert_eq!(context.height(), 4);
        assert_eq!(context.sample_count(), 4);
        assert_eq!(context.stencil_bits(), 0);
        assert!(context.gpu_context().is_none());
    }

    #[test]
    fn test_swap_presents_backbuffer() {
        let mut context = RasterWindowContext::new(&small_params()).unwrap();
        {
            let surface = context.backbuffer_surface().unwrap();
            surface.canvas().clear(Color::RED);
            surface.flush();
        }
        assert_eq!(context.pixel(0, 0), Some(Color::TRANSPARENT));

        context.swap_buffers();
        assert_eq!(context.pixel(7, 3), Some(Color::RED));
        assert_eq!(context.frames_presented(), 1);
        assert_eq!(context.flush_count(), 1);

        let image = context.front_buffer();
        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(context.front_bytes().len(), 8 * 4 * 16);
    }

    #[test]
    fn test_lost_context_has_no_surface() {
        let mut context = RasterWindowContext::new(&small_params()).unwrap();
        context.mark_lost(true);
        assert!(context.backbuffer_surface().is_none());

        context.mark_lost(false);
        assert!(context.backbuffer_surface().is_some());
    }

    #[test]
    fn test_resize_reallocates() {
        let mut context = RasterWindowContext::new(&small_params()).unwrap();
        context.resize(16, 16);
        assert_eq!((context.width(), context.height()), (16, 16));
        assert_eq!(context.display_params().width, 16);
        assert_eq!(context.pixel(15, 15), Some(Color::TRANSPARENT));

        context.resize(0, 16);
        assert_eq!((context.width(), context.height()), (16, 16));
    }

    #[test]
    fn test_set_display_params_switches_format() {
        let mut context = RasterWindowContext::new(&small_params()).unwrap();
        context.set_display_params(&small_params().color_space(ColorSpace::LinearSrgb));
        assert_eq!(context.backbuffer().color_type(), ColorType::RgbaF16);
        assert_eq!((context.width(), context.height()), (8, 4));
    }
}
