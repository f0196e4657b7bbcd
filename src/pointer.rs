//! Effective pointer position and the idle autopilot.
//!
//! Real input and the autopilot both write into the same [`PointerState`];
//! the physics step only ever reads its position and cannot tell the two
//! sources apart. Only real input refreshes the interaction timestamp, so
//! the autopilot keeps running until the user actually moves again.
//!
//! Timestamps are durations since the host's clock origin, which keeps the
//! idle check a plain comparison and makes it trivial to drive from tests.

use glam::Vec2;
use std::f32::consts::TAU;
use std::time::Duration;

use crate::environment::Viewport;

/// Time without real input after which the autopilot takes over.
pub const IDLE_THRESHOLD: Duration = Duration::from_millis(1800);

/// Orbit radius as a fraction of the smaller viewport side.
pub const ORBIT_RADIUS_FRACTION: f32 = 0.25;

/// Autopilot angular speed, in radians per frame.
pub const ORBIT_SPEED: f32 = 0.006;

/// Position used before any input arrives. Far enough away that nothing is
/// repelled.
pub const OFF_SURFACE: Vec2 = Vec2::new(-9999.0, -9999.0);

/// The single pointer slot shared by input handlers and the autopilot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Vec2,
    last_interaction: Duration,
}

impl PointerState {
    /// A pointer that has not been seen yet, with the idle clock starting at `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            position: OFF_SURFACE,
            last_interaction: now,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn last_interaction(&self) -> Duration {
        self.last_interaction
    }

    /// Real pointer movement or press.
    pub fn record_interaction(&mut self, position: Vec2, now: Duration) {
        self.position = position;
        self.last_interaction = now;
    }

    /// Real input without a position (release, cancel, leave).
    ///
    /// The position is kept so the field keeps a lingering repulsion point
    /// instead of snapping straight to the autopilot.
    pub fn touch(&mut self, now: Duration) {
        self.last_interaction = now;
    }

    /// Time since the last real interaction. Zero if `now` is earlier.
    pub fn idle_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.last_interaction)
    }

    /// Move the pointer without counting it as user activity.
    pub(crate) fn steer_to(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Virtual pointer orbiting the viewport focus while the user is idle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Autopilot {
    angle: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Point on the orbit for a given angle.
    pub fn orbit_point(viewport: Viewport, angle: f32) -> Vec2 {
        let radius = viewport.min_side() * ORBIT_RADIUS_FRACTION;
        viewport.focus() + Vec2::new(angle.cos(), angle.sin()) * radius
    }

    /// Advance one frame. Returns `true` if the pointer was steered.
    pub fn steer(&mut self, pointer: &mut PointerState, viewport: Viewport, now: Duration) -> bool {
        if pointer.idle_for(now) <= IDLE_THRESHOLD {
            return false;
        }

        self.angle = (self.angle + ORBIT_SPEED) % TAU;
        pointer.steer_to(Self::orbit_point(viewport, self.angle));
        true
    }
}
