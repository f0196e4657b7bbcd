//! Particle data and initial placement.

use glam::Vec2;
use rand::Rng;

use crate::environment::Viewport;

/// Largest initial velocity component, in pixels per frame.
pub const INITIAL_SPEED: f32 = 0.3;

/// A point mass in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per frame.
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Scatter `count` particles uniformly across the viewport with small random
/// velocities.
pub fn spawn_particles<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let position = Vec2::new(
                rng.gen::<f32>() * viewport.width,
                rng.gen::<f32>() * viewport.height,
            );
            let velocity = Vec2::new(
                rng.gen_range(-INITIAL_SPEED..=INITIAL_SPEED),
                rng.gen_range(-INITIAL_SPEED..=INITIAL_SPEED),
            );
            Particle::new(position, velocity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_within_viewport() {
        let mut rng = SmallRng::seed_from_u64(7);
        let viewport = Viewport::new(800.0, 600.0);
        let particles = spawn_particles(500, viewport, &mut rng);

        assert_eq!(particles.len(), 500);
        for p in &particles {
            assert!(viewport.contains(p.position));
            assert!(p.velocity.x.abs() <= INITIAL_SPEED);
            assert!(p.velocity.y.abs() <= INITIAL_SPEED);
        }
    }
}
