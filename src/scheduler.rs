//! Mounting an animation on a surface.
//!
//! A [`Mount`] owns one animation and the surface it paints on. The host
//! calls [`Mount::tick`] once per display refresh and keeps requesting
//! frames while it returns `true`. Teardown is cooperative: after
//! [`Mount::unmount`] every call becomes a no-op, so a frame that was
//! already scheduled runs harmlessly.

use crate::render::{Renderer, Surface};

/// Something that draws one frame at a time.
pub trait Animation {
    /// Advance the simulation one frame and paint it.
    fn frame(&mut self, renderer: &mut dyn Renderer);

    /// The viewport changed size. Must not disturb in-flight state.
    fn resize(&mut self, _width: f32, _height: f32) {}
}

/// Lifecycle of a [`Mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// Frames are being produced.
    Running,
    /// Torn down; nothing more will be drawn.
    Detached,
}

/// An animation bound to the surface it exclusively paints on.
pub struct Mount<A, S> {
    animation: A,
    surface: S,
    state: MountState,
    frames: u64,
}

impl<A: Animation, S: Surface> Mount<A, S> {
    /// Start `animation` on `surface`.
    ///
    /// Without a surface the animation simply does not start.
    pub fn new(animation: A, surface: Option<S>) -> Option<Self> {
        let Some(surface) = surface else {
            log::debug!("no drawing surface available, animation not started");
            return None;
        };
        let (width, height) = surface.size();
        log::debug!("mounted animation on {}x{} surface", width, height);
        Some(Self {
            animation,
            surface,
            state: MountState::Running,
            frames: 0,
        })
    }

    /// Run one frame synchronously.
    ///
    /// Returns whether the host should request another frame.
    pub fn tick(&mut self) -> bool {
        if self.state == MountState::Detached {
            return false;
        }
        self.animation.frame(&mut self.surface);
        self.frames += 1;
        true
    }

    /// Forward a viewport change to the surface and the animation.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state == MountState::Detached {
            return;
        }
        self.surface.resize(width, height);
        self.animation.resize(width as f32, height as f32);
    }

    /// Stop producing frames. Idempotent.
    pub fn unmount(&mut self) {
        if self.state == MountState::Running {
            log::debug!("unmounted after {} frames", self.frames);
            self.state = MountState::Detached;
        }
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MountState::Running
    }

    /// Frames drawn since mounting.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tear down and hand back the parts.
    pub fn into_parts(mut self) -> (A, S) {
        self.unmount();
        (self.animation, self.surface)
    }
}
