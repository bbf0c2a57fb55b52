//! Fixed timestep simulation tick
//!
//! Collisions (with their positional correction) are resolved before
//! integration, so every particle moves from a non-overlapping configuration.

use super::collision::resolve_collisions;
use super::particle::Particle;
use super::state::SimState;
use crate::consts::CIRCLE_SPEED;

/// Advance the simulation by one tick
pub fn step(state: &mut SimState) {
    state.events.clear();
    state.time_ticks += 1;

    resolve_collisions(
        &mut state.particles,
        &state.epidemic,
        &mut state.rng,
        &mut state.events,
    );
    integrate(&mut state.particles, CIRCLE_SPEED);
}

/// Move every particle along its velocity
pub fn integrate(particles: &mut [Particle], speed: f64) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * speed;
    }
}
