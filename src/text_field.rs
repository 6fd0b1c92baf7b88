//! Particles settling into the shape of a glyph.
//!
//! The glyph is rasterized once, sampled on a coarse grid, and every
//! retained sample becomes the anchor of one particle. Particles start on a
//! ring around the center and spring into place, then keep drifting a little
//! around their anchors for as long as the field is mounted.
//!
//! # Example
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut fonts = FontRasterizer::new();
//! let mut field = GlyphField::rasterized('?', 800, 600, &mut fonts, GlyphFieldConfig::default(), &mut rng);
//! let mut canvas = PixmapCanvas::new(800, 600)?;
//! field.frame(&mut canvas);
//! ```

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;
use crate::config::GlyphFieldConfig;
use crate::glyph::{sample_anchors, CoverageMask, GlyphRasterizer};
use crate::render::{BlendMode, Renderer};
use crate::scheduler::Animation;

/// One particle of a [`GlyphField`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Sampled glyph pixel this particle settles on.
    pub anchor: Vec2,
    pub size: f32,
    pub color: Rgb,
    /// Opacity, fixed per particle.
    pub glow: f32,
}

/// Animated glyph built from a coverage mask.
#[derive(Debug, Clone)]
pub struct GlyphField {
    config: GlyphFieldConfig,
    particles: Vec<GlyphParticle>,
    time: f32,
    size: Vec2,
}

impl GlyphField {
    /// Build a field from an already rasterized mask.
    ///
    /// A blank mask yields a field with no particles that only fades.
    pub fn from_mask<R: Rng + ?Sized>(config: GlyphFieldConfig, mask: &CoverageMask, rng: &mut R) -> Self {
        let size = Vec2::new(mask.width() as f32, mask.height() as f32);
        let center = size * 0.5;

        let particles: Vec<GlyphParticle> = sample_anchors(mask, config.sample_step, config.alpha_threshold)
            .into_iter()
            .map(|anchor| {
                let angle = rng.gen::<f32>() * TAU;
                let radius = lerp(rng, config.ring_radius);
                let hue = lerp(rng, config.hue_range);
                let lightness = lerp(rng, config.lightness_range);
                GlyphParticle {
                    position: center + Vec2::from_angle(angle) * radius,
                    velocity: Vec2::ZERO,
                    anchor,
                    size: lerp(rng, config.size_range),
                    color: Rgb::from_hsl(hue, config.saturation, lightness),
                    glow: lerp(rng, config.glow_range),
                }
            })
            .collect();

        log::debug!(
            "glyph field {}x{} with {} particles",
            mask.width(),
            mask.height(),
            particles.len()
        );

        Self {
            config,
            particles,
            time: 0.0,
            size,
        }
    }

    /// Rasterize `glyph` at `glyph_scale × min(width, height)` and build a field from it.
    pub fn rasterized<R: Rng + ?Sized>(
        glyph: char,
        width: usize,
        height: usize,
        rasterizer: &mut dyn GlyphRasterizer,
        config: GlyphFieldConfig,
        rng: &mut R,
    ) -> Self {
        let font_size = width.min(height) as f32 * config.glyph_scale;
        let mask = rasterizer.rasterize(glyph, font_size, width, height);
        Self::from_mask(config, &mask, rng)
    }

    /// Advance one frame: spring toward the anchor, then drift.
    pub fn step(&mut self) {
        self.time += self.config.time_step;
        let GlyphFieldConfig {
            spring,
            damping,
            drift,
            ..
        } = self.config;

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.velocity += (p.anchor - p.position) * spring;
            p.velocity *= damping;
            p.position += p.velocity;

            let i = i as f32;
            p.position.x += (self.time + i).sin() * drift;
            p.position.y += (self.time + i * 0.5).cos() * drift;
        }
    }

    /// Paint the current state.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.set_blend_mode(BlendMode::Normal);
        renderer.clear_with_trail(self.config.background, self.config.trail_alpha);
        for p in &self.particles {
            renderer.draw_glow_circle(
                p.position.x,
                p.position.y,
                p.size,
                self.config.glow_blur,
                p.color,
                p.glow,
            );
        }
    }

    pub fn frame(&mut self, renderer: &mut dyn Renderer) {
        self.step();
        self.render(renderer);
    }

    pub fn particles(&self) -> &[GlyphParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drift clock.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Surface size the field was laid out for.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn config(&self) -> &GlyphFieldConfig {
        &self.config
    }
}

impl Animation for GlyphField {
    fn frame(&mut self, renderer: &mut dyn Renderer) {
        GlyphField::frame(self, renderer);
    }

    // Anchors stay where the glyph was laid out.
    fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

fn lerp<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn square_mask() -> CoverageMask {
        CoverageMask::from_fn(90, 60, |x, y| {
            if (30..60).contains(&x) && (15..45).contains(&y) {
                255
            } else {
                0
            }
        })
    }

    #[test]
    fn test_one_particle_per_anchor() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mask = square_mask();
        let field = GlyphField::from_mask(GlyphFieldConfig::default(), &mask, &mut rng);
        assert_eq!(field.len(), sample_anchors(&mask, 3, 128).len());
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn test_starts_on_ring() {
        let mut rng = SmallRng::seed_from_u64(2);
        let field = GlyphField::from_mask(GlyphFieldConfig::default(), &square_mask(), &mut rng);
        let center = Vec2::new(45.0, 30.0);
        for p in field.particles() {
            let r = (p.position - center).length();
            assert!((49.99..=150.01).contains(&r), "radius {}", r);
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_colors_and_glow_in_band() {
        let mut rng = SmallRng::seed_from_u64(3);
        let field = GlyphField::from_mask(GlyphFieldConfig::default(), &square_mask(), &mut rng);
        for p in field.particles() {
            assert!(p.color.b > p.color.r, "not blue-ish: {:?}", p.color);
            assert!((0.5..=1.0).contains(&p.glow));
            assert!((1.0..=3.0).contains(&p.size));
        }
    }

    #[test]
    fn test_settles_on_anchors_without_drift() {
        let mut rng = SmallRng::seed_from_u64(4);
        let config = GlyphFieldConfig::default().with_drift(0.0);
        let mut field = GlyphField::from_mask(config, &square_mask(), &mut rng);
        for _ in 0..400 {
            field.step();
        }
        for p in field.particles() {
            assert!((p.position - p.anchor).length() < 0.5);
        }
    }

    #[test]
    fn test_drift_stays_near_anchor() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut field = GlyphField::from_mask(GlyphFieldConfig::default(), &square_mask(), &mut rng);
        for _ in 0..600 {
            field.step();
        }
        for p in field.particles() {
            assert!((p.position - p.anchor).length() < 20.0);
        }
        assert!((field.time() - 12.0).abs() < 1e-2);
    }

    #[test]
    fn test_blank_mask_only_fades() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut field = GlyphField::from_mask(GlyphFieldConfig::default(), &CoverageMask::empty(40, 40), &mut rng);
        assert!(field.is_empty());
        let mut rec = CommandRecorder::new(40, 40);
        field.frame(&mut rec);
        assert_eq!(rec.circles().count(), 0);
        assert_eq!(rec.commands().len(), 2);
    }

    #[test]
    fn test_render_glow_per_particle() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut field = GlyphField::from_mask(GlyphFieldConfig::default(), &square_mask(), &mut rng);
        let mut rec = CommandRecorder::new(90, 60);
        field.frame(&mut rec);
        // Three halo layers plus the core.
        assert_eq!(rec.circles().count(), field.len() * 4);
    }

    #[test]
    fn test_resize_keeps_anchors() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut field = GlyphField::from_mask(GlyphFieldConfig::default(), &square_mask(), &mut rng);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.anchor).collect();
        Animation::resize(&mut field, 200.0, 100.0);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.anchor).collect();
        assert_eq!(before, after);
        assert_eq!(field.size(), Vec2::new(200.0, 100.0));
    }
}
