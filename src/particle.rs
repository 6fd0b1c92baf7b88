//! The per-point record of the field.

use crate::color::Rgb;
use glam::Vec3;

/// One point of the particle field.
///
/// Particles are allocated once and never created or destroyed afterwards;
/// a shape change only rewrites `target` and `target_color` in bulk.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Live position. `x`/`y` are in viewport pixels, `z` is depth.
    pub position: Vec3,
    /// Free-flight velocity, only integrated during scatter.
    pub velocity: Vec3,
    /// Shape-local target before rotation, pulse and centering.
    pub target: Vec3,
    /// Displayed color.
    pub color: Rgb,
    /// Color of the current phase.
    pub target_color: Rgb,
    /// Base radius before perspective scaling.
    pub size: f32,
    /// Phase of this particle's pulse, in `[0, 2π)`.
    pub phase_offset: f32,
}

impl Particle {
    /// A particle at rest at `position`, already showing `color`.
    pub fn new(position: Vec3, color: Rgb, size: f32, phase_offset: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            target: Vec3::ZERO,
            color,
            target_color: color,
            size,
            phase_offset,
        }
    }

    /// Ballistic step: move by the velocity, then decay it.
    #[inline]
    pub fn drift(&mut self, friction: f32) {
        self.position += self.velocity;
        self.velocity *= friction;
    }

    /// Spring step: close `k` of the gap to `goal`.
    #[inline]
    pub fn seek(&mut self, goal: Vec3, k: f32) {
        self.position += (goal - self.position) * k;
    }

    /// Blend the displayed color toward the phase color.
    #[inline]
    pub fn blend_color(&mut self, k: f32) {
        self.color = self.color.approach(self.target_color, k);
    }
}
