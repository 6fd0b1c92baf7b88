//! Pinhole projection from field space to the viewport.

use glam::{Vec2, Vec3};

/// Projected depth below which a point counts as touching the camera plane.
pub const NEAR_PLANE: f32 = 1.0;

/// A point on screen with its perspective scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// `fov / (fov + z)`; 1 at `z = 0`, larger for nearer points.
    pub scale: f32,
}

/// Pinhole camera looking down +z at the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Distance from the camera to the `z = 0` plane.
    pub fov: f32,
    /// Slack around the viewport before a point is culled.
    pub margin: f32,
}

impl Projection {
    pub fn new(fov: f32, margin: f32) -> Self {
        Self { fov, margin }
    }

    /// Perspective scale at depth `z`.
    #[inline]
    pub fn scale(&self, z: f32) -> f32 {
        self.fov / (self.fov + z)
    }

    /// Project `position` around the viewport center.
    ///
    /// Returns `None` for points behind or at the camera plane and for points
    /// landing more than `margin` outside the viewport.
    pub fn project(&self, position: Vec3, viewport: Vec2) -> Option<Projected> {
        if self.fov + position.z < NEAR_PLANE {
            return None;
        }
        let scale = self.scale(position.z);
        if scale < 0.0 || !scale.is_finite() {
            return None;
        }

        let center = viewport * 0.5;
        let screen = (position.truncate() - center) * scale + center;
        let m = self.margin;
        if screen.x < -m || screen.x > viewport.x + m || screen.y < -m || screen.y > viewport.y + m {
            return None;
        }

        Some(Projected {
            x: screen.x,
            y: screen.y,
            scale,
        })
    }
}

/// Depth cue for a projected point: `scale²` clamped to `[0.1, 1]`.
#[inline]
pub fn depth_alpha(scale: f32) -> f32 {
    (scale * scale).clamp(0.1, 1.0)
}
