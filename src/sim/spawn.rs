//! Initial population generation

use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

use super::collision::resolve_collisions;
use super::epidemic::{Epidemic, Health};
use super::particle::Particle;
use crate::consts::CIRCLE_RADIUS;

/// Scatter `count` circles with random positions and headings
///
/// Initial overlaps are resolved before patient zero (index 0) is infected, so
/// circles that spawn on top of each other don't infect anyone.
pub fn spawn_population<R: Rng + ?Sized>(
    count: usize,
    epidemic: &Epidemic,
    rng: &mut R,
) -> Vec<Particle> {
    let mut particles: Vec<Particle> = (0..count)
        .map(|_| {
            let pos = DVec2::new(rng.random::<f64>() * 2.0 - 1.0, rng.random::<f64>() * 2.0 - 1.0);
            let angle = rng.random::<f64>() * TAU;
            Particle::new(pos, DVec2::from_angle(angle), CIRCLE_RADIUS)
        })
        .collect();

    // Nobody is infected yet, so this pass only separates and clamps
    let mut events = Vec::new();
    resolve_collisions(&mut particles, epidemic, rng, &mut events);

    if let Some(first) = particles.first_mut() {
        first.health = Health::Infected;
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_count_and_patient_zero() {
        let mut rng = Pcg32::seed_from_u64(42);
        let particles = spawn_population(30, &Epidemic::default(), &mut rng);

        assert_eq!(particles.len(), 30);
        assert_eq!(particles[0].health, Health::Infected);
        assert!(particles[1..].iter().all(|p| p.health == Health::Susceptible));
    }

    #[test]
    fn test_spawn_inside_arena_with_unit_headings() {
        let mut rng = Pcg32::seed_from_u64(43);
        let particles = spawn_population(50, &Epidemic::default(), &mut rng);

        for p in &particles {
            assert!(p.is_contained(), "{:?} escaped the arena", p.pos);
            assert!((p.vel.length() - 1.0).abs() < 1e-9);
            assert_eq!(p.radius(), CIRCLE_RADIUS);
        }
    }

    #[test]
    fn test_spawn_empty() {
        let mut rng = Pcg32::seed_from_u64(44);
        assert!(spawn_population(0, &Epidemic::default(), &mut rng).is_empty());
    }
}
