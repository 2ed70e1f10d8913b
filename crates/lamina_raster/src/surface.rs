//! Software backbuffer surface
//!
//! Pixels are stored as straight-alpha RGBA floats. Writes are quantized to
//! the precision of the surface's [`ColorType`]: 8-bit surfaces round every
//! channel to 1/255 steps, wide surfaces keep full float precision.

use lamina_core::{Canvas, Color, Rect, Size};
use lamina_platform::{ColorType, Surface};
use smallvec::SmallVec;

/// A single RGBA pixel
pub type Pixel = [f32; 4];

fn quantize(color: Color, color_type: ColorType) -> Pixel {
    match color_type {
        ColorType::Rgba8888 => color.to_rgba8().map(|c| c as f32 / 255.0),
        ColorType::RgbaF16 => color.to_array().map(|c| c.clamp(0.0, 1.0)),
    }
}

/// Source-over blend of a straight-alpha color onto a pixel
fn blend(dst: Pixel, src: Color) -> Color {
    if src.is_opaque() {
        return src;
    }
    let sa = src.a.max(0.0);
    let da = dst[3];
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Color::TRANSPARENT;
    }
    let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    Color::rgba(
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        out_a,
    )
}

/// CPU backbuffer implementing [`Canvas`] and [`Surface`]
#[derive(Debug)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    color_type: ColorType,
    pixels: Vec<Pixel>,
    translate_stack: SmallVec<[(f32, f32); 4]>,
    offset: (f32, f32),
    flushes: u64,
}

impl RasterSurface {
    /// Allocate a surface cleared to transparent
    pub fn new(width: u32, height: u32, color_type: ColorType) -> Self {
        Self {
            width,
            height,
            color_type,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
            translate_stack: SmallVec::new(),
            offset: (0.0, 0.0),
            flushes: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    /// Raw pixel storage, row-major
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Color at (x, y), `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[(y * self.width + x) as usize];
        Some(Color::rgba(r, g, b, a))
    }

    /// Number of flushes since creation
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Size of the backing store a real surface of this format would need
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * self.color_type.bytes_per_pixel()
    }

    /// Drop any translations left over from the previous frame
    pub(crate) fn begin_frame(&mut self) {
        if !self.translate_stack.is_empty() {
            tracing::warn!(
                depth = self.translate_stack.len(),
                "unbalanced translate left on raster surface"
            );
        }
        self.translate_stack.clear();
        self.offset = (0.0, 0.0);
    }

    /// Pixel span covered by `rect`, clipped to the surface
    fn span(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let bounds = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let clipped = rect.intersect(&bounds)?;

        let x0 = clipped.x().round() as usize;
        let y0 = clipped.y().round() as usize;
        let x1 = (clipped.right().round() as usize).min(self.width as usize);
        let y1 = (clipped.bottom().round() as usize).min(self.height as usize);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }
}

impl Canvas for RasterSurface {
    fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Color) {
        let value = quantize(color, self.color_type);
        self.pixels.fill(value);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let rect = rect.translate(self.offset.0, self.offset.1);
        let Some((x0, y0, x1, y1)) = self.span(rect) else {
            return;
        };

        let stride = self.width as usize;
        for y in y0..y1 {
            for pixel in &mut self.pixels[y * stride + x0..y * stride + x1] {
                *pixel = quantize(blend(*pixel, color), self.color_type);
            }
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.translate_stack.push((dx, dy));
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn restore(&mut self) {
        if let Some((dx, dy)) = self.translate_stack.pop() {
            self.offset.0 -= dx;
            self.offset.1 -= dy;
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

impl Surface for RasterSurface {
    fn canvas(&mut self) -> &mut dyn Canvas {
        self
    }

    fn flush(&mut self) {
        Canvas::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = RasterSurface::new(4, 3, ColorType::Rgba8888);
        assert_eq!(surface.pixel(3, 2), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(4, 0), None);
        assert_eq!(surface.byte_size(), 4 * 3 * 4);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut surface = RasterSurface::new(4, 4, ColorType::Rgba8888);
        surface.fill_rect(Rect::new(2.0, 2.0, 10.0, 10.0), Color::RED);

        assert_eq!(surface.pixel(1, 1), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(2, 2), Some(Color::RED));
        assert_eq!(surface.pixel(3, 3), Some(Color::RED));
    }

    #[test]
    fn test_fill_outside_bounds_is_ignored() {
        let mut surface = RasterSurface::new(4, 4, ColorType::Rgba8888);
        surface.fill_rect(Rect::new(-10.0, -10.0, 5.0, 5.0), Color::RED);
        assert!(surface.pixels().iter().all(|p| *p == [0.0; 4]));
    }

    #[test]
    fn test_empty_rect_draws_nothing() {
        let mut surface = RasterSurface::new(4, 4, ColorType::Rgba8888);
        surface.fill_rect(Rect::new(1.0, 1.0, 0.0, 2.0), Color::RED);
        surface.fill_rect(Rect::new(1.0, 1.0, 2.0, -1.0), Color::RED);
        assert!(surface.pixels().iter().all(|p| *p == [0.0; 4]));
    }

    #[test]
    fn test_opaque_fill_replaces_pixels() {
        let mut surface = RasterSurface::new(2, 2, ColorType::RgbaF16);
        surface.clear(Color::WHITE.with_alpha(0.5));
        surface.fill_all(Color::BLUE);
        assert_eq!(surface.pixel(1, 1), Some(Color::BLUE));
    }

    #[test]
    fn test_translate_offsets_fills() {
        let mut surface = RasterSurface::new(4, 4, ColorType::Rgba8888);
        surface.translate(2.0, 1.0);
        surface.fill_rect_xywh(0.0, 0.0, 1.0, 1.0, Color::GREEN);
        surface.restore();
        surface.fill_rect_xywh(0.0, 0.0, 1.0, 1.0, Color::BLUE);

        assert_eq!(surface.pixel(2, 1), Some(Color::GREEN));
        assert_eq!(surface.pixel(0, 0), Some(Color::BLUE));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut surface = RasterSurface::new(1, 1, ColorType::RgbaF16);
        surface.clear(Color::BLACK);
        surface.fill_all(Color::WHITE.with_alpha(0.5));

        let pixel = surface.pixel(0, 0).unwrap();
        assert!((pixel.r - 0.5).abs() < 1e-6);
        assert!((pixel.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_eight_bit_surface_quantizes() {
        let mut surface = RasterSurface::new(1, 1, ColorType::Rgba8888);
        surface.clear(Color::rgb(0.3, 0.3, 0.3));
        let pixel = surface.pixel(0, 0).unwrap();
        assert_eq!(pixel.r, 77.0 / 255.0);

        let mut wide = RasterSurface::new(1, 1, ColorType::RgbaF16);
        wide.clear(Color::rgb(0.3, 0.3, 0.3));
        assert_eq!(wide.pixel(0, 0).unwrap().r, 0.3);
    }
}
