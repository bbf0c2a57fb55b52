//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod epidemic;
pub mod particle;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, bounce_walls, circle_contact, reflect_velocity, resolve_collisions};
pub use epidemic::{Epidemic, Exposed, Health};
pub use particle::{MeshHandle, Particle};
pub use spawn::spawn_population;
pub use state::{Census, SimEvent, SimState};
pub use tick::{integrate, step};
