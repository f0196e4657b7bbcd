//! One simulation tick.
//!
//! [`step`] advances every particle by one frame and nothing else: no
//! drawing, no scheduling, no clock. Each particle goes through the same
//! fixed sequence:
//!
//! 1. wander: small random kick, the only persistent energy source
//! 2. repulsion: linear-falloff push away from the pointer
//! 3. speed clamp
//! 4. integrate position
//! 5. friction
//! 6. wall reflection
//!
//! Reflection only turns the velocity component inward; the position is not
//! pulled back, so a particle may sit just outside the viewport for a frame
//! or two while it returns.

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::environment::Viewport;
use crate::particle::Particle;

/// Lower bound on the derived particle count.
pub const MIN_PARTICLES: u32 = 40;

/// Scale applied to the repulsion falloff.
pub const REPEL_STRENGTH: f32 = 0.8;

/// Distances below this are treated as this, so a pointer sitting exactly on
/// a particle still yields a finite push.
pub const MIN_REPEL_DISTANCE: f32 = 0.001;

/// Particle count for a viewport: `clamp(floor(area / divisor * density), 40, max)`.
///
/// A cap below the floor wins over the floor.
pub fn particle_count(area: f32, density: f32, divisor: f32, max: u32) -> u32 {
    let raw = (area / divisor * density).floor();
    let raw = if raw.is_finite() && raw > 0.0 { raw as u32 } else { 0 };
    raw.max(MIN_PARTICLES).min(max)
}

/// Per-tick force parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub wander: f32,
    pub repel_radius: f32,
    pub max_speed: f32,
    pub friction: f32,
}

impl From<&FieldConfig> for StepParams {
    fn from(config: &FieldConfig) -> Self {
        Self {
            wander: config.wander,
            repel_radius: config.repel_radius,
            max_speed: config.max_speed,
            friction: config.friction,
        }
    }
}

/// Add an independent random delta in `[-wander, wander]` to each component.
#[inline]
pub fn apply_wander<R: Rng + ?Sized>(velocity: Vec2, wander: f32, rng: &mut R) -> Vec2 {
    if wander <= 0.0 {
        return velocity;
    }
    velocity
        + Vec2::new(
            rng.gen_range(-wander..=wander),
            rng.gen_range(-wander..=wander),
        )
}

/// Push away from `pointer` if inside `radius`.
///
/// The impulse has magnitude `(radius - d) / radius * 0.8`: maximal at the
/// pointer, zero at the edge of the radius.
#[inline]
pub fn apply_repulsion(position: Vec2, velocity: Vec2, pointer: Vec2, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return velocity;
    }
    let offset = position - pointer;
    let d2 = offset.length_squared();
    if d2 >= radius * radius {
        return velocity;
    }

    let d = d2.sqrt().max(MIN_REPEL_DISTANCE);
    let falloff = (radius - d) / radius;
    velocity + offset / d * falloff * REPEL_STRENGTH
}

/// Rescale to exactly `max_speed` if faster, keeping the direction.
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed && speed > 0.0 {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Point the velocity back inside on every axis where the position has
/// reached or crossed a wall.
///
/// The component's sign is set, not toggled, so a particle that needs
/// several frames to get back in is never turned around again on the way.
#[inline]
pub fn reflect(position: Vec2, mut velocity: Vec2, viewport: Viewport) -> Vec2 {
    if position.x <= 0.0 {
        velocity.x = velocity.x.abs();
    } else if position.x >= viewport.width {
        velocity.x = -velocity.x.abs();
    }
    if position.y <= 0.0 {
        velocity.y = velocity.y.abs();
    } else if position.y >= viewport.height {
        velocity.y = -velocity.y.abs();
    }
    velocity
}

/// Advance all particles by one frame.
pub fn step<R: Rng + ?Sized>(
    particles: &mut [Particle],
    pointer: Vec2,
    viewport: Viewport,
    params: &StepParams,
    rng: &mut R,
) {
    for p in particles.iter_mut() {
        let mut v = apply_wander(p.velocity, params.wander, rng);
        v = apply_repulsion(p.position, v, pointer, params.repel_radius);
        v = clamp_speed(v, params.max_speed);

        p.position += v;
        v *= params.friction;

        p.velocity = reflect(p.position, v, viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_particle_count_bounds() {
        // Below the floor
        assert_eq!(particle_count(300.0 * 300.0, 1.0, 15_000.0, 180), 40);
        // Above the cap
        assert_eq!(particle_count(3840.0 * 2160.0, 1.0, 15_000.0, 180), 180);
        // Exactly on the floor
        assert_eq!(particle_count(40.0 * 15_000.0, 1.0, 15_000.0, 180), 40);
        // Exactly on the cap
        assert_eq!(particle_count(180.0 * 15_000.0, 1.0, 15_000.0, 180), 180);
        // In range, floored
        assert_eq!(particle_count(100.5 * 15_000.0, 1.0, 15_000.0, 180), 100);
    }

    #[test]
    fn test_particle_count_density() {
        assert_eq!(particle_count(100.0 * 15_000.0, 0.5, 15_000.0, 180), 50);
        assert_eq!(particle_count(100.0 * 15_000.0, 0.0, 15_000.0, 180), 40);
    }

    #[test]
    fn test_particle_count_cap_below_floor() {
        assert_eq!(particle_count(1920.0 * 1080.0, 1.0, 15_000.0, 10), 10);
    }

    #[test]
    fn test_wander_bounded() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let v = apply_wander(Vec2::ZERO, 0.008, &mut rng);
            assert!(v.x.abs() <= 0.008 && v.y.abs() <= 0.008);
        }
    }

    #[test]
    fn test_repulsion_direction_and_falloff() {
        let pointer = Vec2::new(100.0, 100.0);

        let near = apply_repulsion(Vec2::new(110.0, 100.0), Vec2::ZERO, pointer, 120.0);
        let far = apply_repulsion(Vec2::new(200.0, 100.0), Vec2::ZERO, pointer, 120.0);

        assert!(near.x > far.x && far.x > 0.0);
        assert_eq!(near.y, 0.0);
        assert!((near.x - (110.0 / 120.0) * REPEL_STRENGTH).abs() < 1e-5);
    }

    #[test]
    fn test_repulsion_outside_radius() {
        let v = Vec2::new(0.1, -0.2);
        let out = apply_repulsion(Vec2::new(500.0, 500.0), v, Vec2::ZERO, 120.0);
        assert_eq!(out, v);

        // Exactly on the boundary there is no push
        let edge = apply_repulsion(Vec2::new(120.0, 0.0), v, Vec2::ZERO, 120.0);
        assert_eq!(edge, v);
    }

    #[test]
    fn test_repulsion_at_zero_distance_is_finite() {
        let p = Vec2::new(50.0, 50.0);
        let v = apply_repulsion(p, Vec2::ZERO, p, 120.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_clamp_speed() {
        let v = clamp_speed(Vec2::new(3.0, 4.0), 1.25);
        assert!((v.length() - 1.25).abs() < 1e-6);
        assert!((v.x / v.y - 0.75).abs() < 1e-6);

        assert_eq!(clamp_speed(Vec2::ZERO, 1.25), Vec2::ZERO);
        assert_eq!(clamp_speed(Vec2::new(0.5, 0.0), 1.25), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_reflect_flips_once() {
        let viewport = Viewport::new(100.0, 100.0);
        let v = reflect(Vec2::new(-0.5, 50.0), Vec2::new(-1.0, 0.3), viewport);
        assert_eq!(v, Vec2::new(1.0, 0.3));

        let v = reflect(Vec2::new(50.0, 100.5), Vec2::new(0.2, 1.0), viewport);
        assert_eq!(v, Vec2::new(0.2, -1.0));

        let v = reflect(Vec2::new(50.0, 50.0), Vec2::new(0.2, 1.0), viewport);
        assert_eq!(v, Vec2::new(0.2, 1.0));
    }

    #[test]
    fn test_reflect_keeps_inward_velocity() {
        let viewport = Viewport::new(100.0, 100.0);

        // Still outside but already heading back in: leave it alone
        let v = reflect(Vec2::new(-5.0, 50.0), Vec2::new(0.5, 0.0), viewport);
        assert_eq!(v, Vec2::new(0.5, 0.0));

        let v = reflect(Vec2::new(120.0, 130.0), Vec2::new(-0.4, -0.2), viewport);
        assert_eq!(v, Vec2::new(-0.4, -0.2));
    }

    #[test]
    fn test_particle_far_outside_returns() {
        let viewport = Viewport::new(100.0, 100.0);
        let params = StepParams {
            wander: 0.0,
            repel_radius: 0.0,
            max_speed: 1.25,
            friction: 0.985,
        };
        let mut particles = [Particle::new(Vec2::new(-5.0, 50.0), Vec2::new(0.5, 0.0))];
        let mut rng = SmallRng::seed_from_u64(0);

        for _ in 0..100 {
            step(&mut particles, Vec2::splat(-9999.0), viewport, &params, &mut rng);
            assert!(particles[0].velocity.x > 0.0);
        }

        assert!(particles[0].position.x > 0.0, "{:?}", particles[0]);
    }

    #[test]
    fn test_single_flip_per_crossing() {
        let viewport = Viewport::new(100.0, 100.0);
        let params = StepParams {
            wander: 0.0,
            repel_radius: 0.0,
            max_speed: 10.0,
            friction: 1.0,
        };
        let mut particles = [Particle::new(Vec2::new(97.5, 50.0), Vec2::new(1.0, 0.0))];
        let mut rng = SmallRng::seed_from_u64(0);

        let mut flips = 0;
        let mut previous = particles[0].velocity.x;
        for _ in 0..20 {
            step(&mut particles, Vec2::splat(-9999.0), viewport, &params, &mut rng);
            if particles[0].velocity.x.signum() != previous.signum() {
                flips += 1;
            }
            previous = particles[0].velocity.x;
        }

        assert_eq!(flips, 1);
        assert!(particles[0].position.x < 100.0);
        assert_eq!(particles[0].velocity.x, -1.0);
    }

    #[test]
    fn test_step_order_integrates_before_damping() {
        let viewport = Viewport::new(100.0, 100.0);
        let params = StepParams {
            wander: 0.0,
            repel_radius: 0.0,
            max_speed: 10.0,
            friction: 0.5,
        };
        let mut particles = [Particle::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 0.0))];
        let mut rng = SmallRng::seed_from_u64(0);

        step(&mut particles, Vec2::ZERO, viewport, &params, &mut rng);

        assert_eq!(particles[0].position, Vec2::new(52.0, 50.0));
        assert_eq!(particles[0].velocity, Vec2::new(1.0, 0.0));
    }
}
