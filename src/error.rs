//! Setup error types.
//!
//! Only two things can fail in this demo, and both fail before the first
//! frame: acquiring the GPU context and building the render pipeline. Once
//! rendering has started there is no recovery path, so there is no runtime
//! error type.

use thiserror::Error;

/// Errors that can occur while setting up the GPU context and render pass.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The window surface could not be created.
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No suitable GPU adapter was found.
    #[error("failed to find a suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The logical device could not be created.
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Shader compilation or pipeline creation failed validation.
    #[error("failed to build render pipeline: {0}")]
    Pipeline(String),
}
