//! # morphfield - Morphing Particle Field
//!
//! A 3D point cloud that explodes and reforms into a cycle of parametric
//! shapes, plus a small converter that settles particles into the outline of
//! a glyph.
//!
//! The animations are plain CPU simulations that paint through a minimal
//! [`Renderer`] interface. They can run headless on a [`CommandRecorder`],
//! be rasterized to PNG on a [`PixmapCanvas`], or be shown in a window with
//! [`window::run`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! fn main() -> Result<(), HostError> {
//!     let field = ParticleField::new(FieldConfig::default(), 1280.0, 600.0);
//!     morphfield::window::run(field, HostOptions::new("morphfield").with_fixed_height(600))
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! Each [`ShapeKind`] maps a particle index to a point in shape-local
//! coordinates and carries a signature color:
//!
//! | Shape | Geometry | Color |
//! |-------|----------|-------|
//! | [`ShapeKind::Globe`] | Fibonacci sphere with a satellite shell | `#00f3ff` |
//! | [`ShapeKind::Blockchain`] | Torus knot | `#fcee0a` |
//! | [`ShapeKind::Ecg`] | Extruded heart plus a scrolling ECG trace | `#ff003c` |
//! | [`ShapeKind::Brain`] | Two squashed hemispheres | `#bc13fe` |
//! | [`ShapeKind::Chip`] | Stacked grid-snapped layers | `#0aff0a` |
//! | [`ShapeKind::Stream`] | Globe geometry in white | `#ffffff` |
//!
//! ### Phases
//!
//! A [`PhaseClock`] splits time into phases of equal length. Every phase
//! opens with a short [`Stage::Scatter`] of free flight after an explosion,
//! followed by [`Stage::Converge`] where particles ease onto the rotating,
//! breathing shape.
//!
//! ### Mounting
//!
//! [`Mount`] binds an [`Animation`] to the [`Surface`] it paints on and
//! implements the run/resize/teardown contract hosts rely on.

pub mod canvas;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod glyph;
mod gpu;
pub mod particle;
pub mod phase;
pub mod projection;
pub mod render;
pub mod scheduler;
pub mod shapes;
pub mod text_field;
pub mod time;
pub mod window;

pub use canvas::PixmapCanvas;
pub use color::Rgb;
pub use config::{FieldConfig, GlyphFieldConfig};
pub use engine::{ParticleField, TargetTransform};
pub use error::{CanvasError, GpuError, HostError};
pub use glam::{Vec2, Vec3};
pub use glyph::{sample_anchors, CoverageMask, FontRasterizer, GlyphRasterizer};
pub use particle::Particle;
pub use phase::{PhaseChange, PhaseClock, Stage};
pub use projection::{Projected, Projection};
pub use render::{BlendMode, CommandRecorder, DrawCommand, Renderer, Surface};
pub use scheduler::{Animation, Mount, MountState};
pub use shapes::ShapeKind;
pub use text_field::{GlyphField, GlyphParticle};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use morphfield::prelude::*;
/// ```
///
/// This imports:
/// - [`ParticleField`] and [`GlyphField`] - the two animations
/// - [`FieldConfig`], [`GlyphFieldConfig`] - their configuration builders
/// - [`PixmapCanvas`], [`CommandRecorder`] - surfaces to paint on
/// - [`Mount`], [`Animation`] - the mounting contract
/// - [`Vec2`], [`Vec3`] - glam vector types
/// - `SmallRng` and `SeedableRng` for reproducible runs
pub mod prelude {
    pub use crate::canvas::PixmapCanvas;
    pub use crate::color::Rgb;
    pub use crate::config::{FieldConfig, GlyphFieldConfig};
    pub use crate::engine::ParticleField;
    pub use crate::error::{CanvasError, HostError};
    pub use crate::glyph::{CoverageMask, FontRasterizer, GlyphRasterizer};
    pub use crate::phase::Stage;
    pub use crate::render::{BlendMode, CommandRecorder, Renderer, Surface};
    pub use crate::scheduler::{Animation, Mount};
    pub use crate::shapes::ShapeKind;
    pub use crate::text_field::GlyphField;
    pub use crate::window::HostOptions;
    pub use crate::{Vec2, Vec3};
    pub use rand::rngs::SmallRng;
    pub use rand::SeedableRng;
}
