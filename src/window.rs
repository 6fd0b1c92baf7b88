//! Desktop host: runs one animation in a window.
//!
//! The animation paints into a [`PixmapCanvas`] through a [`Mount`]; every
//! display refresh the host ticks the mount, uploads the canvas and presents
//! it. Closing the window unmounts before the event loop exits.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::canvas::PixmapCanvas;
use crate::color::Rgb;
use crate::error::HostError;
use crate::gpu::Presenter;
use crate::scheduler::{Animation, Mount};
use crate::time::FrameClock;

/// Window settings for [`run`].
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Canvas height kept across resizes; `None` follows the window.
    pub fixed_height: Option<u32>,
    pub background: Rgb,
}

impl HostOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 1280,
            height: 600,
            fixed_height: None,
            background: Rgb::BLACK,
        }
    }

    /// Initial window size in physical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Only forward width changes to the animation.
    pub fn with_fixed_height(mut self, height: u32) -> Self {
        self.fixed_height = Some(height);
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }
}

/// Canvas size for a window size, or `None` while the window is minimized.
fn canvas_size(window: PhysicalSize<u32>, fixed_height: Option<u32>) -> Option<(u32, u32)> {
    if window.width == 0 || window.height == 0 {
        return None;
    }
    Some((window.width, fixed_height.unwrap_or(window.height)))
}

struct App<A: Animation> {
    options: HostOptions,
    pending: Option<A>,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    mount: Option<Mount<A, PixmapCanvas>>,
    clock: FrameClock,
    error: Option<HostError>,
}

impl<A: Animation> App<A> {
    fn new(animation: A, options: HostOptions) -> Self {
        Self {
            options,
            pending: Some(animation),
            window: None,
            presenter: None,
            mount: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.options.title.as_str())
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());
        self.presenter = Some(pollster::block_on(Presenter::new(window.clone()))?);

        let (width, height) = canvas_size(window.inner_size(), self.options.fixed_height)
            .unwrap_or((self.options.width, self.options.fixed_height.unwrap_or(self.options.height)));
        let canvas = PixmapCanvas::with_background(width, height, self.options.background)?;

        if let Some(animation) = self.pending.take() {
            self.mount = Mount::new(animation, Some(canvas));
            if let Some(mount) = &mut self.mount {
                mount.resize(width, height);
            }
        }
        window.request_redraw();
        Ok(())
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(mount), Some(presenter)) = (&mut self.mount, &mut self.presenter) else {
            return;
        };
        if !mount.tick() {
            return;
        }

        let canvas = mount.surface();
        presenter.upload(canvas.data(), canvas.width(), canvas.height());
        match presenter.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => presenter.resize(presenter.size()),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                mount.unmount();
                event_loop.exit();
                return;
            }
            Err(e) => log::error!("render error: {:?}", e),
        }

        self.clock.tick();
        if let (Some(fps), Some(window)) = (self.clock.take_fps_update(), &self.window) {
            window.set_title(&format!("{} ({:.0} fps)", self.options.title, fps));
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl<A: Animation> ApplicationHandler for App<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(mount) = &mut self.mount {
                    mount.unmount();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size);
                }
                if let (Some(mount), Some((width, height))) =
                    (&mut self.mount, canvas_size(physical_size, self.options.fixed_height))
                {
                    log::debug!("resize to {}x{}", width, height);
                    mount.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.present(event_loop),
            _ => {}
        }
    }
}

/// Open a window and run `animation` until it is closed.
pub fn run<A: Animation>(animation: A, options: HostOptions) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(animation, options);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => {
            if let Some(mount) = &app.mount {
                log::info!("closed after {} frames", mount.frames());
            }
            Ok(())
        }
    }
}
