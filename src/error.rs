//! Error types for nodefield.
//!
//! The simulation and rendering paths are total and never fail. Errors only
//! arise at the edges: loading configuration files, bringing up the native
//! window and GPU presenter, and writing snapshots.

use std::fmt;

/// Errors that can occur while reading or writing a [`FieldConfig`](crate::FieldConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Invalid config JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors raised by the native host.
///
/// None of these reach the field itself: when the presenter cannot be
/// created the host logs the error and simply never activates the field.
#[derive(Debug)]
pub enum HostError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// Failed to write a snapshot image.
    Snapshot(image::ImageError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            HostError::Window(e) => write!(f, "Failed to create window: {}", e),
            HostError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            HostError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            HostError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            HostError::Snapshot(e) => write!(f, "Failed to write snapshot: {}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::EventLoop(e) => Some(e),
            HostError::Window(e) => Some(e),
            HostError::SurfaceCreation(e) => Some(e),
            HostError::DeviceCreation(e) => Some(e),
            HostError::Snapshot(e) => Some(e),
            HostError::NoAdapter => None,
        }
    }
}

impl From<winit::error::EventLoopError> for HostError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HostError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for HostError {
    fn from(e: winit::error::OsError) -> Self {
        HostError::Window(e)
    }
}

impl From<wgpu::CreateSurfaceError> for HostError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        HostError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for HostError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        HostError::DeviceCreation(e)
    }
}

impl From<image::ImageError> for HostError {
    fn from(e: image::ImageError) -> Self {
        HostError::Snapshot(e)
    }
}
