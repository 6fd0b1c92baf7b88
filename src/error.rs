//! Error types for morphfield.
//!
//! The animations themselves never fail; errors only come from creating
//! surfaces, exporting frames and running the window host.

use thiserror::Error;

/// Errors from the software canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Width or height is zero or too large for a pixmap.
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    /// Failed to encode a frame.
    #[error("failed to encode frame: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for presenting.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a WebGPU/Vulkan/Metal/DX12 capable GPU is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur when running the window host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The window is too small or too large for a canvas.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
