//! Tuning constants and configuration builders.
//!
//! Every default here is the reference value the animation was designed
//! around. The builders exist so tests and hosts can shrink the particle
//! count or change the viewport; the animation itself never reads anything
//! at runtime besides its config.
//!
//! # Example
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! let config = FieldConfig::default()
//!     .with_particle_count(600)
//!     .with_shape_cycle(vec![ShapeKind::Globe, ShapeKind::Ecg]);
//! ```

use crate::color::Rgb;
use crate::shapes::ShapeKind;

/// Number of particles in the field.
pub const PARTICLE_COUNT: usize = 1800;
/// Scene rotation about the vertical axis, radians per frame.
pub const ROTATION_SPEED: f32 = 0.003;
/// Base magnitude of the explosion impulse.
pub const SCATTER_FORCE: f32 = 15.0;
/// Fraction of the remaining gap closed per converge frame.
pub const CONVERGE_SPEED: f32 = 0.08;
/// Fraction of the remaining color distance closed per frame.
pub const COLOR_SPEED: f32 = 0.05;
/// Velocity multiplier applied every scatter frame.
pub const FRICTION: f32 = 0.92;
/// Frames spent on one shape, scatter included.
pub const PHASE_DURATION: u32 = 350;
/// Leading frames of each phase spent in free flight.
pub const SCATTER_DURATION: u32 = 60;
/// Camera constant used in the perspective divide.
pub const FOV: f32 = 400.0;
/// Default field height in pixels; the field keeps its construction height across resizes.
pub const VIEWPORT_HEIGHT: f32 = 600.0;

/// Configuration for [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub particle_count: usize,
    /// Radians added to the scene angle every frame.
    pub rotation_speed: f32,
    /// Base explosion impulse; each particle gets `force * (0.5 + u)`.
    pub scatter_force: f32,
    /// Width of the isotropic jitter added to the in-plane impulse.
    pub scatter_jitter: f32,
    /// Spring coefficient of the converge stage, in `(0, 1)`.
    pub converge_speed: f32,
    /// Color blend coefficient, in `(0, 1)`.
    pub color_speed: f32,
    /// Velocity decay per scatter frame, in `(0, 1)`.
    pub friction: f32,
    /// Frames per phase.
    pub phase_duration: u32,
    /// Frames of free flight at the start of each phase.
    pub scatter_duration: u32,
    /// Perspective constant.
    pub fov: f32,
    /// How far outside the viewport a projected point may land and still be drawn.
    pub cull_margin: f32,
    /// Angular speed of the breathing pulse, radians per frame.
    pub pulse_rate: f32,
    /// Relative amplitude of the breathing pulse.
    pub pulse_amplitude: f32,
    /// Depth spread of the initial random positions.
    pub depth_spread: f32,
    /// Opacity of the dark rectangle painted over the previous frame.
    pub trail_alpha: f32,
    /// Color of the trail rectangle.
    pub background: Rgb,
    /// Shapes visited in order, wrapping around at the end.
    pub shape_cycle: Vec<ShapeKind>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            rotation_speed: ROTATION_SPEED,
            scatter_force: SCATTER_FORCE,
            scatter_jitter: 10.0,
            converge_speed: CONVERGE_SPEED,
            color_speed: COLOR_SPEED,
            friction: FRICTION,
            phase_duration: PHASE_DURATION,
            scatter_duration: SCATTER_DURATION,
            fov: FOV,
            cull_margin: 50.0,
            pulse_rate: 0.05,
            pulse_amplitude: 0.03,
            depth_spread: 500.0,
            trail_alpha: 0.2,
            background: Rgb::new(2.0, 2.0, 4.0),
            shape_cycle: ShapeKind::GEOMETRIC.to_vec(),
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set phase and scatter durations in frames.
    ///
    /// The scatter stage is clamped so it never outlasts the phase.
    pub fn with_durations(mut self, phase: u32, scatter: u32) -> Self {
        self.phase_duration = phase.max(1);
        self.scatter_duration = scatter.min(self.phase_duration);
        self
    }

    /// Set the order in which shapes are visited.
    ///
    /// An empty cycle is ignored and the current one is kept.
    pub fn with_shape_cycle(mut self, cycle: Vec<ShapeKind>) -> Self {
        if cycle.is_empty() {
            log::warn!("ignoring empty shape cycle, keeping {:?}", self.shape_cycle);
        } else {
            self.shape_cycle = cycle;
        }
        self
    }

    /// Set the scene rotation speed in radians per frame.
    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    /// First shape of the cycle.
    pub fn initial_shape(&self) -> ShapeKind {
        self.shape_cycle.first().copied().unwrap_or(ShapeKind::Globe)
    }
}

/// Configuration for [`GlyphField`](crate::GlyphField).
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphFieldConfig {
    /// Distance in pixels between sampled mask points, both axes.
    pub sample_step: usize,
    /// Coverage a sample must exceed to become an anchor.
    pub alpha_threshold: u8,
    /// Spring constant pulling particles to their anchors.
    pub spring: f32,
    /// Velocity multiplier applied every frame.
    pub damping: f32,
    /// Amplitude of the per-particle drift.
    pub drift: f32,
    /// Drift clock increment per frame.
    pub time_step: f32,
    /// Scatter ring radius range around the glyph center.
    pub ring_radius: (f32, f32),
    /// Particle radius range.
    pub size_range: (f32, f32),
    /// Hue range in degrees.
    pub hue_range: (f32, f32),
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Lightness range in `[0, 1]`.
    pub lightness_range: (f32, f32),
    /// Per-particle opacity range.
    pub glow_range: (f32, f32),
    /// Halo radius around every particle.
    pub glow_blur: f32,
    /// Opacity of the trail rectangle.
    pub trail_alpha: f32,
    /// Color of the trail rectangle.
    pub background: Rgb,
    /// Glyph size relative to the shorter canvas side.
    pub glyph_scale: f32,
}

impl Default for GlyphFieldConfig {
    fn default() -> Self {
        Self {
            sample_step: 3,
            alpha_threshold: 128,
            spring: 0.05,
            damping: 0.9,
            drift: 0.3,
            time_step: 0.02,
            ring_radius: (50.0, 150.0),
            size_range: (1.0, 3.0),
            hue_range: (200.0, 260.0),
            saturation: 0.7,
            lightness_range: (0.5, 0.8),
            glow_range: (0.5, 1.0),
            glow_blur: 10.0,
            trail_alpha: 0.1,
            background: Rgb::new(2.0, 2.0, 4.0),
            glyph_scale: 0.4,
        }
    }
}

impl GlyphFieldConfig {
    /// Set the sampling grid step (minimum 1).
    pub fn with_sample_step(mut self, step: usize) -> Self {
        self.sample_step = step.max(1);
        self
    }

    /// Set spring and damping coefficients.
    pub fn with_spring(mut self, spring: f32, damping: f32) -> Self {
        self.spring = spring;
        self.damping = damping;
        self
    }

    /// Set the drift amplitude; zero disables the drift.
    pub fn with_drift(mut self, drift: f32) -> Self {
        self.drift = drift;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 1800);
        assert_eq!(config.phase_duration, 350);
        assert_eq!(config.scatter_duration, 60);
        assert_eq!(config.fov, 400.0);
        assert_eq!(config.shape_cycle.len(), 5);
        assert_eq!(config.initial_shape(), ShapeKind::Globe);
    }

    #[test]
    fn test_empty_cycle_is_ignored() {
        let config = FieldConfig::default().with_shape_cycle(Vec::new());
        assert_eq!(config.shape_cycle, ShapeKind::GEOMETRIC.to_vec());
    }

    #[test]
    fn test_scatter_clamped_to_phase() {
        let config = FieldConfig::default().with_durations(10, 40);
        assert_eq!(config.phase_duration, 10);
        assert_eq!(config.scatter_duration, 10);
    }

    #[test]
    fn test_sample_step_minimum() {
        let config = GlyphFieldConfig::default().with_sample_step(0);
        assert_eq!(config.sample_step, 1);
    }
}
