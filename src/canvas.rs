//! Software canvas backed by a tiny-skia pixmap.
//!
//! Mirrors the 2D canvas operations the animations need: a translucent
//! full-surface fill for trails, source-over or additive ("lighter")
//! compositing, and anti-aliased filled circles.

use std::path::Path;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::color::Rgb;
use crate::error::CanvasError;
use crate::render::{BlendMode, Renderer, Surface};

/// A CPU-rasterized drawing surface.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    blend: BlendMode,
    background: Rgb,
}

impl PixmapCanvas {
    /// Create a canvas filled with opaque black.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::with_background(width, height, Rgb::BLACK)
    }

    /// Create a canvas filled with an opaque `background`.
    pub fn with_background(width: u32, height: u32, background: Rgb) -> Result<Self, CanvasError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(CanvasError::InvalidSize { width, height })?;
        pixmap.fill(skia_color(background, 1.0));
        Ok(Self {
            pixmap,
            blend: BlendMode::Normal,
            background,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA bytes, row-major.
    ///
    /// The canvas starts opaque and every draw keeps it opaque, so these are
    /// also plain RGBA.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// RGB of the pixel at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()]
        })
    }

    /// Convert to an `image` buffer.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width(), self.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    /// Write the current frame as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn paint(&self, color: Rgb, alpha: f32, blend: BlendMode) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(skia_color(color, alpha));
        paint.anti_alias = true;
        paint.blend_mode = match blend {
            BlendMode::Normal => tiny_skia::BlendMode::SourceOver,
            BlendMode::Additive => tiny_skia::BlendMode::Plus,
        };
        paint
    }
}

impl Renderer for PixmapCanvas {
    fn clear_with_trail(&mut self, color: Rgb, alpha: f32) {
        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32) else {
            return;
        };
        let paint = self.paint(color, alpha, self.blend);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.0 || !radius.is_finite() || !x.is_finite() || !y.is_finite() {
            return;
        }
        let Some(path) = PathBuilder::from_circle(x, y, radius) else {
            return;
        };
        let paint = self.paint(color, alpha, self.blend);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

impl Surface for PixmapCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.size() {
            return;
        }
        match Pixmap::new(width, height) {
            Some(mut pixmap) => {
                pixmap.fill(skia_color(self.background, 1.0));
                self.pixmap = pixmap;
            }
            None => log::warn!("ignoring canvas resize to {}x{}", width, height),
        }
    }
}

fn skia_color(color: Rgb, alpha: f32) -> tiny_skia::Color {
    let [r, g, b] = color.to_rgb8();
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            PixmapCanvas::new(0, 10),
            Err(CanvasError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_circle_paints_center() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.draw_circle(10.0, 10.0, 4.0, Rgb::new(255.0, 0.0, 0.0), 1.0);
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_additive_brightens() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.set_blend_mode(BlendMode::Additive);
        let dim = Rgb::new(100.0, 0.0, 0.0);
        canvas.draw_circle(10.0, 10.0, 4.0, dim, 1.0);
        canvas.draw_circle(10.0, 10.0, 4.0, dim, 1.0);
        let [r, _, _] = canvas.pixel(10, 10).unwrap();
        assert!(r >= 199, "expected summed red, got {}", r);
    }

    #[test]
    fn test_trail_darkens_previous_frame() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.draw_circle(10.0, 10.0, 6.0, Rgb::WHITE, 1.0);
        canvas.clear_with_trail(Rgb::BLACK, 0.2);
        let [r, g, b] = canvas.pixel(10, 10).unwrap();
        assert!(r < 255 && r > 150);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_resize_keeps_background() {
        let mut canvas = PixmapCanvas::with_background(8, 8, Rgb::new(2.0, 2.0, 4.0)).unwrap();
        canvas.resize(16, 4);
        assert_eq!(canvas.size(), (16, 4));
        assert_eq!(canvas.pixel(15, 3), Some([2, 2, 4]));
        canvas.resize(0, 4);
        assert_eq!(canvas.size(), (16, 4));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let canvas = PixmapCanvas::new(4, 4).unwrap();
        canvas.save_png(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 4));
    }
}
