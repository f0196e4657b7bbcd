//! The particle field renderer.
//!
//! [`ParticleField`] owns all per-instance state (particles, pointer slot,
//! autopilot, RNG) and exposes the lifecycle the host drives:
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldConfig::default(), env);
//! field.activate(&mut canvas, &mut scheduler, clock.now());
//!
//! // each time the scheduler's request fires:
//! field.frame(&mut canvas, &mut scheduler, clock.now());
//!
//! // on input / resize:
//! field.handle_pointer(event, clock.now());
//! field.resize(viewport, dpr, &mut canvas);
//!
//! // on teardown:
//! field.deactivate(&mut scheduler);
//! ```
//!
//! # Resize policy
//!
//! The particle set, and therefore the particle count, is fixed at activation
//! and kept stable across resizes. Positions are rescaled per axis to the
//! new viewport so the layout keeps its shape and nothing is stranded
//! outside a shrunken window. Velocities are left untouched.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::config::FieldConfig;
use crate::environment::{Environment, Viewport};
use crate::input::PointerEvent;
use crate::particle::{spawn_particles, Particle};
use crate::physics::{self, particle_count, StepParams};
use crate::pointer::{Autopilot, PointerState};
use crate::render;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{Surface, SurfaceSize};

/// Where a field is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, not yet activated.
    Inactive,
    /// Animating; a frame is always pending.
    Running,
    /// Reduced motion: one frame drawn, nothing scheduled.
    Static,
    /// Deactivated. Input is ignored until activated again.
    Stopped,
}

/// A self-contained animated particle network.
pub struct ParticleField {
    config: FieldConfig,
    environment: Environment,
    particles: Vec<Particle>,
    pointer: PointerState,
    autopilot: Autopilot,
    rng: SmallRng,
    phase: Phase,
    pending: Option<FrameHandle>,
}

impl ParticleField {
    pub fn new(config: FieldConfig, environment: Environment) -> Self {
        Self::with_rng(config, environment, SmallRng::from_entropy())
    }

    /// Deterministic field, for tests and reproducible snapshots.
    pub fn with_seed(config: FieldConfig, environment: Environment, seed: u64) -> Self {
        Self::with_rng(config, environment, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, environment: Environment, rng: SmallRng) -> Self {
        Self {
            config,
            environment,
            particles: Vec::new(),
            pointer: PointerState::new(Duration::ZERO),
            autopilot: Autopilot::new(),
            rng,
            phase: Phase::Inactive,
            pending: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn viewport(&self) -> Viewport {
        self.environment.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether input and resize events are currently being listened to.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Static)
    }

    /// Particle count for the current environment and config.
    pub fn target_count(&self) -> u32 {
        particle_count(
            self.environment.viewport.area(),
            self.config.density,
            self.environment.device_class.density_divisor(),
            self.config.max_particles,
        )
    }

    /// Mount the field: size the surface, spawn particles and draw the
    /// first frame.
    ///
    /// With reduced motion the first frame is also the last one. Does
    /// nothing if the field is already active.
    pub fn activate<S, F>(&mut self, surface: &mut S, scheduler: &mut F, now: Duration)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.is_active() {
            return;
        }

        surface.configure(self.surface_size());

        let count = self.target_count() as usize;
        self.particles = spawn_particles(count, self.environment.viewport, &mut self.rng);
        self.pointer = PointerState::new(now);
        self.autopilot = Autopilot::new();

        log::debug!(
            "activating particle field: {} particles, {}x{} viewport, {:?}",
            count,
            self.environment.viewport.width,
            self.environment.viewport.height,
            self.environment.device_class,
        );

        render::draw_frame(surface, &self.particles, self.environment.viewport, &self.config);

        if self.environment.reduced_motion {
            log::debug!("reduced motion requested, drawing a single static frame");
            self.phase = Phase::Static;
        } else {
            self.phase = Phase::Running;
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Run one animation frame and schedule the next.
    ///
    /// Ignored unless the field is running.
    pub fn frame<S, F>(&mut self, surface: &mut S, scheduler: &mut F, now: Duration)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.phase != Phase::Running {
            return;
        }
        self.pending = None;

        let viewport = self.environment.viewport;
        render::draw_background(surface, viewport);
        self.tick(now);
        render::draw_links(surface, &self.particles, self.config.link_distance);
        render::draw_nodes(surface, &self.particles);

        self.pending = Some(scheduler.request_frame());
    }

    /// Advance the simulation one frame without drawing: autopilot, then
    /// physics.
    pub fn tick(&mut self, now: Duration) {
        let viewport = self.environment.viewport;
        if self.config.auto_pilot {
            self.autopilot.steer(&mut self.pointer, viewport, now);
        }

        let params = StepParams::from(&self.config);
        physics::step(
            &mut self.particles,
            self.pointer.position(),
            viewport,
            &params,
            &mut self.rng,
        );
    }

    /// Feed real pointer input.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Duration) {
        if !self.is_active() {
            return;
        }
        match event.position() {
            Some(p) => self.pointer.record_interaction(p, now),
            None => self.pointer.touch(now),
        }
    }

    /// Track a new viewport size and pixel ratio.
    ///
    /// Particle positions are rescaled into the new viewport. A static field
    /// is redrawn at the new size since reconfiguring the surface discards
    /// its content.
    pub fn resize<S: Surface + ?Sized>(&mut self, viewport: Viewport, device_pixel_ratio: f32, surface: &mut S) {
        if !self.is_active() {
            return;
        }
        rescale_positions(&mut self.particles, self.environment.viewport, viewport);
        self.environment.viewport = viewport;
        self.environment.device_pixel_ratio = device_pixel_ratio;
        surface.configure(self.surface_size());

        if self.phase == Phase::Static {
            render::draw_frame(surface, &self.particles, viewport, &self.config);
        }
    }

    /// Unmount: cancel the pending frame and stop listening to input.
    ///
    /// Safe to call any number of times.
    pub fn deactivate<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        if self.is_active() {
            log::debug!("particle field deactivated");
            self.phase = Phase::Stopped;
        }
    }

    fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::for_viewport(self.environment.viewport, self.environment.device_pixel_ratio)
    }
}

/// Map positions from one viewport to another, axis by axis.
///
/// Degenerate viewports (zero or non-finite extent) leave positions as they are.
fn rescale_positions(particles: &mut [Particle], from: Viewport, to: Viewport) {
    if from == to {
        return;
    }
    let scale = Vec2::new(to.width / from.width, to.height / from.height);
    if !scale.is_finite() || scale.cmple(Vec2::ZERO).any() {
        return;
    }
    for p in particles.iter_mut() {
        p.position *= scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCall, Recording};
    use crate::scheduler::RedrawScheduler;

    fn env() -> Environment {
        Environment::new(Viewport::new(1280.0, 720.0))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_activate_spawns_and_schedules() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), env(), 1);
        let mut surface = Recording::new();
        let mut scheduler = RedrawScheduler::new();

        field.activate(&mut surface, &mut scheduler, ms(0));

        // 1280 * 720 / 15000 = 61.44
        assert_eq!(field.particles().len(), 61);
        assert_eq!(field.phase(), Phase::Running);
        assert_eq!(scheduler.requested(), 1);
        assert!(matches!(surface.calls[0], DrawCall::Configure { width: 1280, height: 720, .. }));
        assert_eq!(surface.frames(), 1);
    }

    #[test]
    fn test_activate_twice_is_noop() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), env(), 1);
        let mut surface = Recording::new();
        let mut scheduler = RedrawScheduler::new();

        field.activate(&mut surface, &mut scheduler, ms(0));
        let before = field.particles().to_vec();
        field.activate(&mut surface, &mut scheduler, ms(5));

        assert_eq!(field.particles(), &before[..]);
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_frame_when_inactive_does_nothing() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), env(), 1);
        let mut surface = Recording::new();
        let mut scheduler = RedrawScheduler::new();

        field.frame(&mut surface, &mut scheduler, ms(16));
        assert!(surface.calls.is_empty());
        assert_eq!(scheduler.requested(), 0);
    }

    #[test]
    fn test_input_ignored_after_deactivate() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), env(), 1);
        let mut surface = Recording::new();
        let mut scheduler = RedrawScheduler::new();

        field.activate(&mut surface, &mut scheduler, ms(0));
        field.deactivate(&mut scheduler);
        field.handle_pointer(PointerEvent::Move(Vec2::new(5.0, 5.0)), ms(10));

        assert_ne!(field.pointer().position(), Vec2::new(5.0, 5.0));
        assert_eq!(field.phase(), Phase::Stopped);
    }

    #[test]
    fn test_release_only_refreshes_timestamp() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), env(), 1);
        let mut surface = Recording::new();
        let mut scheduler = RedrawScheduler::new();
        field.activate(&mut surface, &mut scheduler, ms(0));

        field.handle_pointer(PointerEvent::Down(Vec2::new(300.0, 200.0)), ms(100));
        field.handle_pointer(PointerEvent::Up, ms(400));

        assert_eq!(field.pointer().position(), Vec2::new(300.0, 200.0));
        assert_eq!(field.pointer().last_interaction(), ms(400));
    }

    #[test]
    fn test_reactivate_after_stop() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), env(), 1);
        let mut surface = Recording::new();
        let mut scheduler = RedrawScheduler::new();

        field.activate(&mut surface, &mut scheduler, ms(0));
        field.deactivate(&mut scheduler);
        field.activate(&mut surface, &mut scheduler, ms(100));

        assert_eq!(field.phase(), Phase::Running);
        assert!(scheduler.pending().is_some());
    }

    #[test]
    fn test_rescale_positions() {
        let mut particles = [
            Particle::new(Vec2::new(640.0, 360.0), Vec2::new(0.1, 0.2)),
            Particle::new(Vec2::new(1280.0, 0.0), Vec2::ZERO),
        ];
        rescale_positions(&mut particles, Viewport::new(1280.0, 720.0), Viewport::new(640.0, 360.0));

        assert_eq!(particles[0].position, Vec2::new(320.0, 180.0));
        assert_eq!(particles[0].velocity, Vec2::new(0.1, 0.2));
        assert_eq!(particles[1].position, Vec2::new(640.0, 0.0));
    }

    #[test]
    fn test_rescale_from_empty_viewport_is_noop() {
        let mut particles = [Particle::new(Vec2::new(5.0, 5.0), Vec2::ZERO)];
        rescale_positions(&mut particles, Viewport::new(0.0, 0.0), Viewport::new(400.0, 300.0));
        assert_eq!(particles[0].position, Vec2::new(5.0, 5.0));
    }
}
