//! # nodefield
//!
//! An animated particle network for page and window backgrounds: drifting
//! nodes, faint links between close neighbours, a pointer that pushes nodes
//! away, and an autopilot that keeps the field moving when nobody touches it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use nodefield::prelude::*;
//!
//! fn main() -> Result<(), HostError> {
//!     let config = FieldConfig::default().with_density(0.8);
//!     nodefield::run(config, RunOptions::default())
//! }
//! ```
//!
//! ## Embedding
//!
//! The field does not own a window or a loop. A host provides:
//!
//! - an [`Environment`] describing the viewport, pixel ratio, motion
//!   preference and input model,
//! - a [`Surface`] to draw on ([`Canvas`] rasterises on the CPU),
//! - a [`FrameScheduler`] that calls [`ParticleField::frame`] on the next
//!   display refresh.
//!
//! ```ignore
//! let env = Environment::new(Viewport::new(1280.0, 720.0));
//! let mut field = ParticleField::new(FieldConfig::default(), env);
//! let mut canvas = Canvas::new(SurfaceSize::for_viewport(env.viewport, 1.0));
//! let mut scheduler = RedrawScheduler::new();
//!
//! field.activate(&mut canvas, &mut scheduler, clock.now());
//! while scheduler.take_pending().is_some() {
//!     field.frame(&mut canvas, &mut scheduler, clock.now());
//! }
//! ```
//!
//! ## Per-frame behavior
//!
//! | Stage | Effect |
//! |-------|--------|
//! | Background | Translucent radial gradient over the previous frame |
//! | Autopilot | Orbit a virtual pointer after 1.8 s without input |
//! | Physics | Wander, repulsion, speed clamp, integrate, friction, reflect |
//! | Links | Lines between pairs closer than `link_distance` |
//! | Nodes | Small discs at every particle |

mod app;
pub mod config;
pub mod environment;
mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod particle;
pub mod physics;
pub mod pointer;
pub mod raster;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod time;

pub use app::{run, snapshot, RunOptions};
pub use config::FieldConfig;
pub use environment::{DeviceClass, Environment, InputMode, Viewport};
pub use error::{ConfigError, HostError};
pub use field::{ParticleField, Phase};
pub use glam::Vec2;
pub use input::{Input, PointerEvent};
pub use particle::Particle;
pub use pointer::{Autopilot, PointerState};
pub use raster::Canvas;
pub use scheduler::{FrameHandle, FrameScheduler, RedrawScheduler};
pub use surface::{Color, Surface, SurfaceSize};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use nodefield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{run, snapshot, RunOptions};
    pub use crate::config::FieldConfig;
    pub use crate::environment::{DeviceClass, Environment, InputMode, Viewport};
    pub use crate::error::{ConfigError, HostError};
    pub use crate::field::{ParticleField, Phase};
    pub use crate::input::PointerEvent;
    pub use crate::raster::Canvas;
    pub use crate::scheduler::{FrameScheduler, RedrawScheduler};
    pub use crate::surface::{Surface, SurfaceSize};
    pub use crate::time::Clock;
    pub use crate::Vec2;
}
