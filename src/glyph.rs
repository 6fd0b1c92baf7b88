//! Glyph coverage masks and anchor sampling.
//!
//! A glyph is rasterized off-screen into a [`CoverageMask`] the size of the
//! target canvas, then sampled on a coarse grid. Every sample with enough
//! coverage becomes an anchor a particle settles on.

use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use glam::Vec2;

/// Per-pixel coverage, 0 (empty) to 255 (fully inked).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl CoverageMask {
    /// A mask with no coverage.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F: FnMut(usize, usize) -> u8>(width: usize, height: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coverage at `(x, y)`; zero outside the mask.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            0
        }
    }

    /// Raise coverage at `(x, y)` to at least `alpha`. Out-of-range writes are dropped.
    #[inline]
    pub fn cover(&mut self, x: i64, y: i64, alpha: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.data[idx] = self.data[idx].max(alpha);
    }

    /// Whether no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&a| a == 0)
    }
}

/// Anchor points: every `step`-th pixel in both axes whose coverage exceeds `threshold`.
pub fn sample_anchors(mask: &CoverageMask, step: usize, threshold: u8) -> Vec<Vec2> {
    let step = step.max(1);
    let mut anchors = Vec::new();
    for y in (0..mask.height()).step_by(step) {
        for x in (0..mask.width()).step_by(step) {
            if mask.get(x, y) > threshold {
                anchors.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    anchors
}

/// Turns a glyph into a coverage mask.
pub trait GlyphRasterizer {
    /// Rasterize `glyph` at `font_size` pixels, centered in a `width`×`height` mask.
    fn rasterize(&mut self, glyph: char, font_size: f32, width: usize, height: usize) -> CoverageMask;
}

/// Rasterizer using the system's fonts through cosmic-text.
///
/// Draws bold monospace. If no font provides the glyph the mask comes back
/// blank.
pub struct FontRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl FontRasterizer {
    /// Discover system fonts.
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }
}

impl Default for FontRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&mut self, glyph: char, font_size: f32, width: usize, height: usize) -> CoverageMask {
        let mut mask = CoverageMask::empty(width, height);
        if width == 0 || height == 0 || font_size <= 0.0 {
            return mask;
        }

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let attrs = Attrs::new().family(Family::Monospace).weight(Weight::BOLD);
        let mut text = [0u8; 4];

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(width as f32), Some(height as f32));
        buffer.set_text(&mut self.font_system, glyph.encode_utf8(&mut text), attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Ink first, placement second: the glyph is centered on its own bounds.
        let mut ink: Vec<(i32, i32, u8)> = Vec::new();
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgb(0xff, 0xff, 0xff),
            |x, y, w, h, color| {
                let alpha = color.a();
                if alpha == 0 {
                    return;
                }
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        ink.push((x + dx, y + dy, alpha));
                    }
                }
            },
        );

        let Some(bounds) = ink_bounds(&ink) else {
            log::warn!("no font could render {:?}; glyph mask is blank", glyph);
            return mask;
        };
        let (min_x, min_y, max_x, max_y) = bounds;
        let offset_x = (width as i64 - (max_x - min_x + 1) as i64) / 2 - min_x as i64;
        let offset_y = (height as i64 - (max_y - min_y + 1) as i64) / 2 - min_y as i64;

        for (x, y, alpha) in ink {
            mask.cover(x as i64 + offset_x, y as i64 + offset_y, alpha);
        }
        mask
    }
}

fn ink_bounds(ink: &[(i32, i32, u8)]) -> Option<(i32, i32, i32, i32)> {
    ink.iter().fold(None, |acc, &(x, y, _)| match acc {
        None => Some((x, y, x, y)),
        Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(size: usize, radius: f32) -> CoverageMask {
        let c = size as f32 / 2.0;
        CoverageMask::from_fn(size, size, |x, y| {
            let d = Vec2::new(x as f32 - c, y as f32 - c).length();
            if d <= radius {
                255
            } else {
                0
            }
        })
    }

    #[test]
    fn test_sample_grid_and_threshold() {
        let mask = CoverageMask::from_fn(9, 9, |x, _| if x < 4 { 200 } else { 128 });
        let anchors = sample_anchors(&mask, 3, 128);
        // Columns 0 and 3 pass; 6 sits exactly on the threshold and is rejected.
        assert_eq!(anchors.len(), 6);
        assert!(anchors.iter().all(|a| a.x == 0.0 || a.x == 3.0));
        assert!(anchors.iter().all(|a| a.y % 3.0 == 0.0));
    }

    #[test]
    fn test_blank_mask_has_no_anchors() {
        let mask = CoverageMask::empty(30, 30);
        assert!(mask.is_blank());
        assert!(sample_anchors(&mask, 3, 128).is_empty());
    }

    #[test]
    fn test_disc_anchors_inside() {
        let mask = disc(60, 20.0);
        let anchors = sample_anchors(&mask, 3, 128);
        assert!(!anchors.is_empty());
        for a in anchors {
            assert!((a - Vec2::splat(30.0)).length() <= 20.0);
        }
    }

    #[test]
    fn test_cover_ignores_out_of_range() {
        let mut mask = CoverageMask::empty(4, 4);
        mask.cover(-1, 0, 255);
        mask.cover(4, 0, 255);
        mask.cover(1, 1, 100);
        mask.cover(1, 1, 50);
        assert_eq!(mask.get(1, 1), 100);
        assert_eq!(mask.get(9, 9), 0);
    }

    #[test]
    fn test_ink_bounds() {
        assert_eq!(ink_bounds(&[]), None);
        let ink = [(3, 4, 10), (-1, 9, 10), (7, 2, 10)];
        assert_eq!(ink_bounds(&ink), Some((-1, 2, 7, 9)));
    }
}
