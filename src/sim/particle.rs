//! Circle entity

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::epidemic::Health;

/// Non-owning reference to GPU geometry registered with the renderer
///
/// Every circle shares the same mesh; the renderer owns the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

impl MeshHandle {
    /// Handle of the unit circle mesh, always registered first
    pub const CIRCLE: MeshHandle = MeshHandle(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A circle in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    /// Heading; scaled by `CIRCLE_SPEED` when integrating
    pub vel: DVec2,
    radius: f64,
    pub health: Health,
    pub mesh: MeshHandle,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self {
            pos,
            vel,
            radius,
            health: Health::Susceptible,
            mesh: MeshHandle::CIRCLE,
        }
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Lowest coordinate the center may take on either axis
    #[inline]
    pub fn min_coord(&self) -> f64 {
        -1.0 + self.radius
    }

    /// Highest coordinate the center may take on either axis
    #[inline]
    pub fn max_coord(&self) -> f64 {
        1.0 - self.radius
    }

    /// Whether the circle lies inside the arena walls
    pub fn is_contained(&self) -> bool {
        let (lo, hi) = (self.min_coord(), self.max_coord());
        (lo..=hi).contains(&self.pos.x) && (lo..=hi).contains(&self.pos.y)
    }

    /// Signed overlap with another circle (positive when they intersect)
    #[inline]
    pub fn overlap(&self, other: &Particle) -> f64 {
        self.radius + other.radius - self.pos.distance(other.pos)
    }
}
