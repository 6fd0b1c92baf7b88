//! The morphing particle field.
//!
//! Every frame the field advances its [`PhaseClock`], possibly explodes into
//! the next shape, integrates every particle, blends colors and paints the
//! result through a [`Renderer`].
//!
//! # Frame anatomy
//!
//! 1. The scene angle grows by `rotation_speed`.
//! 2. The clock ticks. On rollover every particle gets an outward impulse
//!    from the viewport center and is retargeted onto the next shape.
//! 3. [`Stage::Scatter`]: `position += velocity; velocity *= friction`.
//!    [`Stage::Converge`]: `position += (goal - position) * converge_speed`,
//!    where `goal` is the target rotated, pulsed, (for the ECG trace)
//!    scrolled, then centered.
//! 4. Colors move `color_speed` of the way to the phase color.
//! 5. Paint: trail fade, additive circles, blend mode restored.
//!
//! # Example
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! let mut field = ParticleField::seeded(FieldConfig::default(), 1280.0, 600.0, 42);
//! let mut canvas = PixmapCanvas::new(1280, 600)?;
//! for _ in 0..400 {
//!     field.frame(&mut canvas);
//! }
//! canvas.save_png("frame.png")?;
//! ```

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::phase::{PhaseClock, Stage};
use crate::projection::{depth_alpha, Projection};
use crate::render::{BlendMode, Renderer};
use crate::scheduler::Animation;
use crate::shapes::{ecg_trace, ShapeKind};

/// Maps a shape-local target to the point a particle seeks this frame.
///
/// Captures the per-frame scene state so it can be applied while the
/// particle array is borrowed mutably.
#[derive(Debug, Clone, Copy)]
pub struct TargetTransform {
    /// Scene rotation about the vertical axis.
    pub angle: f32,
    /// Frames since the last phase change.
    pub timer: u32,
    /// Active shape.
    pub shape: ShapeKind,
    /// Particle count, for the ECG trace partition.
    pub count: usize,
    /// Viewport center.
    pub center: Vec2,
    /// Angular speed of the breathing pulse.
    pub pulse_rate: f32,
    /// Relative scale amplitude of the breathing pulse.
    pub pulse_amplitude: f32,
}

impl TargetTransform {
    /// Goal of particle `index` with shape-local `target`.
    ///
    /// Rotate about y, pulse, scroll the ECG trace, then center.
    pub fn apply(&self, index: usize, target: Vec3, phase_offset: f32) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        let mut x = target.x * cos - target.z * sin;
        let mut y = target.y;
        let mut z = target.z * cos + target.x * sin;

        let pulse = 1.0 + (self.timer as f32 * self.pulse_rate + phase_offset).sin() * self.pulse_amplitude;
        x *= pulse;
        y *= pulse;
        z *= pulse;

        if self.shape.is_trace_particle(index, self.count) {
            (x, y) = ecg_trace(x, y, self.timer);
        }

        Vec3::new(x + self.center.x, y + self.center.y, z)
    }
}

/// A field of particles morphing through a cycle of shapes.
///
/// Owns all of its state; independent instances never interfere.
#[derive(Debug, Clone)]
pub struct ParticleField<R = SmallRng> {
    config: FieldConfig,
    particles: Vec<Particle>,
    clock: PhaseClock,
    angle: f32,
    viewport: Vec2,
    projection: Projection,
    rng: R,
}

impl ParticleField<SmallRng> {
    /// Create a field seeded from system entropy.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, SmallRng::from_entropy())
    }

    /// Create a reproducible field.
    pub fn seeded(config: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(config, width, height, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create a field drawing all randomness from `rng`.
    ///
    /// Particles start scattered over the viewport with the first shape's
    /// color, and are already targeted at that shape. An empty shape cycle falls back to the five geometric shapes.
    pub fn with_rng(mut config: FieldConfig, width: f32, height: f32, mut rng: R) -> Self {
        if config.shape_cycle.is_empty() {
            log::warn!("empty shape cycle, using the geometric shapes");
            config.shape_cycle = ShapeKind::GEOMETRIC.to_vec();
        }
        let shape = config.initial_shape();
        let color = shape.color();
        let depth = config.depth_spread;

        let mut particles: Vec<Particle> = (0..config.particle_count)
            .map(|_| {
                let position = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * width,
                    (rng.gen::<f32>() - 0.5) * height,
                    (rng.gen::<f32>() - 0.5) * depth,
                );
                let size = rng.gen::<f32>() * 2.0 + 0.5;
                let phase_offset = rng.gen::<f32>() * TAU;
                Particle::new(position, color, size, phase_offset)
            })
            .collect();
        shape.assign(&mut particles, &mut rng);

        let clock = PhaseClock::new(
            config.shape_cycle.len(),
            config.phase_duration,
            config.scatter_duration,
        );
        let projection = Projection::new(config.fov, config.cull_margin);
        log::debug!(
            "particle field: {} particles, {}x{}, starting with {}",
            particles.len(),
            width,
            height,
            shape
        );

        Self {
            config,
            particles,
            clock,
            angle: 0.0,
            viewport: Vec2::new(width, height),
            projection,
            rng,
        }
    }

    /// Advance the simulation one frame without drawing.
    pub fn step(&mut self) {
        self.angle += self.config.rotation_speed;

        if let Some(change) = self.clock.tick() {
            self.explode();
            let shape = self.shape();
            shape.assign(&mut self.particles, &mut self.rng);
            log::debug!("phase {} -> {} ({})", change.from, change.to, shape);
            log::trace!("retargeted {} particles, angle {:.3}", self.particles.len(), self.angle);
        }

        match self.clock.stage() {
            Stage::Scatter => {
                let friction = self.config.friction;
                for p in &mut self.particles {
                    p.drift(friction);
                }
            }
            Stage::Converge => {
                let transform = self.target_transform();
                let k = self.config.converge_speed;
                for (i, p) in self.particles.iter_mut().enumerate() {
                    let goal = transform.apply(i, p.target, p.phase_offset);
                    p.seek(goal, k);
                }
            }
        }

        let k = self.config.color_speed;
        for p in &mut self.particles {
            p.blend_color(k);
        }
    }

    /// Paint the current state.
    ///
    /// Fades the previous frame, draws every visible particle additively and
    /// leaves the renderer in [`BlendMode::Normal`] for the next fade.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear_with_trail(self.config.background, self.config.trail_alpha);
        renderer.set_blend_mode(BlendMode::Additive);

        for p in &self.particles {
            let Some(projected) = self.projection.project(p.position, self.viewport) else {
                continue;
            };
            renderer.draw_circle(
                projected.x,
                projected.y,
                p.size * projected.scale,
                p.color,
                depth_alpha(projected.scale),
            );
        }

        renderer.set_blend_mode(BlendMode::Normal);
    }

    /// Step then render.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) {
        self.step();
        self.render(renderer);
    }

    /// Update the viewport used for centering and culling.
    ///
    /// Particles are left exactly where they are.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Jump to the start of phase `index` and retarget every particle.
    ///
    /// Positions and velocities are kept.
    pub fn set_phase(&mut self, index: usize) {
        self.clock.reset_to(index);
        let shape = self.shape();
        shape.assign(&mut self.particles, &mut self.rng);
        log::debug!("forced phase {} ({})", self.clock.phase(), shape);
    }

    /// The point particle `index` seeks during this frame's converge step.
    pub fn transformed_target(&self, index: usize) -> Option<Vec3> {
        let transform = self.target_transform();
        self.particles
            .get(index)
            .map(|p| transform.apply(index, p.target, p.phase_offset))
    }

    /// Scene state for the current frame.
    pub fn target_transform(&self) -> TargetTransform {
        TargetTransform {
            angle: self.angle,
            timer: self.clock.timer(),
            shape: self.shape(),
            count: self.particles.len(),
            center: self.viewport * 0.5,
            pulse_rate: self.config.pulse_rate,
            pulse_amplitude: self.config.pulse_amplitude,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Index into the shape cycle.
    pub fn phase_index(&self) -> usize {
        self.clock.phase()
    }

    /// Shape of the active phase.
    pub fn shape(&self) -> ShapeKind {
        self.config.shape_cycle[self.clock.phase() % self.config.shape_cycle.len()]
    }

    pub fn stage(&self) -> Stage {
        self.clock.stage()
    }

    /// Frames since the last phase change.
    pub fn timer(&self) -> u32 {
        self.clock.timer()
    }

    /// Accumulated scene rotation in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Give every particle an outward kick from the viewport center.
    fn explode(&mut self) {
        let center = self.viewport * 0.5;
        let force = self.config.scatter_force;
        let jitter = self.config.scatter_jitter;
        let rng = &mut self.rng;

        for p in &mut self.particles {
            let angle = (p.position.y - center.y).atan2(p.position.x - center.x);
            let kick = force * (0.5 + rng.gen::<f32>());
            p.velocity = Vec3::new(
                angle.cos() * kick + (rng.gen::<f32>() - 0.5) * jitter,
                angle.sin() * kick + (rng.gen::<f32>() - 0.5) * jitter,
                (rng.gen::<f32>() - 0.5) * kick * 2.0,
            );
        }
    }
}

impl<R: Rng> Animation for ParticleField<R> {
    fn frame(&mut self, renderer: &mut dyn Renderer) {
        ParticleField::frame(self, renderer);
    }

    /// Only the width follows the host; the field keeps its construction height.
    fn resize(&mut self, width: f32, _height: f32) {
        let height = self.viewport.y;
        self.set_viewport(width, height);
    }
}
