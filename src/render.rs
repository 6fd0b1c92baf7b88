//! Drawing capability used by the animations.
//!
//! The animations only ever fade the previous frame, switch blend modes and
//! fill circles, so that is all a backend has to provide. [`PixmapCanvas`]
//! rasterizes in software; [`CommandRecorder`] just keeps the calls.
//!
//! [`PixmapCanvas`]: crate::canvas::PixmapCanvas

use crate::color::Rgb;

/// How a draw combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard source-over alpha blending (default).
    #[default]
    Normal,

    /// Additive blending.
    ///
    /// Overlapping draws sum their colors and brighten instead of
    /// occluding each other, giving the neon glow.
    Additive,
}

/// Minimal 2D drawing interface.
pub trait Renderer {
    /// Paint `color` at `alpha` over the whole surface, leaving a fading trail
    /// of previous frames. Always composited with [`BlendMode::Normal`]
    /// semantics by well-behaved callers, who reset the blend mode first.
    fn clear_with_trail(&mut self, color: Rgb, alpha: f32);

    /// Select the blend mode for subsequent draws.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Fill a circle.
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32);

    /// Fill a circle surrounded by a soft halo `blur` pixels wide.
    ///
    /// The default stacks a few translucent circles under the core.
    fn draw_glow_circle(&mut self, x: f32, y: f32, radius: f32, blur: f32, color: Rgb, alpha: f32) {
        const LAYERS: u32 = 3;
        if blur > 0.0 {
            for layer in (1..=LAYERS).rev() {
                let spread = blur * layer as f32 / LAYERS as f32;
                self.draw_circle(x, y, radius + spread, color, alpha * 0.12);
            }
        }
        self.draw_circle(x, y, radius, color, alpha);
    }
}

/// A renderer with pixel dimensions that an animation can be mounted on.
pub trait Surface: Renderer {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Change the pixel size. Existing content may be discarded.
    fn resize(&mut self, width: u32, height: u32);
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Trail { color: Rgb, alpha: f32 },
    Blend(BlendMode),
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Rgb,
        alpha: f32,
        blend: BlendMode,
    },
}

/// Headless surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    blend: BlendMode,
    width: u32,
    height: u32,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Everything recorded so far, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded circles as `(x, y, radius, alpha)`.
    pub fn circles(&self) -> impl Iterator<Item = (f32, f32, f32, f32)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle { x, y, radius, alpha, .. } => Some((x, y, radius, alpha)),
            _ => None,
        })
    }

    /// Blend mode currently selected.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Forget recorded commands, keeping the blend state.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for CommandRecorder {
    fn clear_with_trail(&mut self, color: Rgb, alpha: f32) {
        self.commands.push(DrawCommand::Trail { color, alpha });
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
        self.commands.push(DrawCommand::Blend(mode));
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            alpha,
            blend: self.blend,
        });
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
