//! Collision detection and response for circles in the square arena
//!
//! Pairs are visited once each (`j > i`). The outer particle is pushed out of
//! the overlap and both velocities are reflected about the contact normal;
//! the inner particle only has its velocity written back. Wall clamping runs
//! last so circles stay inside the arena even if that leaves a slight overlap.

use glam::DVec2;
use rand::Rng;

use super::epidemic::{Epidemic, Exposed};
use super::particle::Particle;
use super::state::SimEvent;
use crate::consts::OVERLAP_EPSILON;

/// Contact between two overlapping circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the second circle toward the first
    pub normal: DVec2,
    /// Penetration depth (for position correction)
    pub overlap: f64,
}

/// Check two circles for overlap beyond `OVERLAP_EPSILON`
///
/// Coincident centers have no defined normal; they are separated along +X.
pub fn circle_contact(pos_a: DVec2, radius_a: f64, pos_b: DVec2, radius_b: f64) -> Option<Contact> {
    let delta = pos_a - pos_b;
    let overlap = radius_a + radius_b - delta.length();

    if overlap <= OVERLAP_EPSILON {
        return None;
    }

    Some(Contact {
        normal: delta.try_normalize().unwrap_or(DVec2::X),
        overlap,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Clamp a circle against the four arena walls, inverting the velocity
/// component of any wall it crossed. Returns true if a wall was hit.
pub fn bounce_walls(pos: &mut DVec2, vel: &mut DVec2, radius: f64) -> bool {
    let lo = -1.0 + radius;
    let hi = 1.0 - radius;
    let mut hit = false;

    if pos.x < lo {
        pos.x = lo;
        vel.x = -vel.x;
        hit = true;
    } else if pos.x > hi {
        pos.x = hi;
        vel.x = -vel.x;
        hit = true;
    }

    if pos.y < lo {
        pos.y = lo;
        vel.y = -vel.y;
        hit = true;
    } else if pos.y > hi {
        pos.y = hi;
        vel.y = -vel.y;
        hit = true;
    }

    hit
}

/// Resolve all circle/circle and circle/wall collisions in place
///
/// Health transitions found along the way are appended to `events`.
pub fn resolve_collisions<R: Rng + ?Sized>(
    particles: &mut [Particle],
    epidemic: &Epidemic,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) {
    for i in 0..particles.len() {
        let (head, tail) = particles.split_at_mut(i + 1);
        let current = &mut head[i];

        let mut pos = current.pos;
        let mut vel = current.vel;
        let radius = current.radius();

        for (offset, other) in tail.iter_mut().enumerate() {
            let Some(contact) = circle_contact(pos, radius, other.pos, other.radius()) else {
                continue;
            };
            let normal = contact.normal;

            // Shift out of the overlap; `other` stays where it is
            pos += normal * contact.overlap;

            vel = reflect_velocity(vel, -normal);
            other.vel = reflect_velocity(other.vel, normal);

            if let Some(side) = epidemic.transmit(&mut current.health, &mut other.health, rng) {
                let index = match side {
                    Exposed::First => i,
                    Exposed::Second => i + 1 + offset,
                };
                log::debug!("particle {} infected", index);
                events.push(SimEvent::Infected { index });
            }
        }

        bounce_walls(&mut pos, &mut vel, radius);

        current.pos = pos;
        current.vel = vel;

        if epidemic.try_recover(&mut current.health, rng) {
            log::debug!("particle {} recovered", i);
            events.push(SimEvent::Recovered { index: i });
        }
    }
}
