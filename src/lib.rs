//! Contact Sim - bouncing circles spreading an infection
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, collisions, infection model)
//! - `renderer`: WebGPU rendering adapter
//! - `platform`: Frame timing and input control

pub mod platform;
pub mod renderer;
pub mod sim;

pub use sim::{Census, Health, Particle, SimState, step};

/// Simulation configuration constants
pub mod consts {
    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;

    /// Ring vertices in the shared circle mesh (fan adds center + closing vertex)
    pub const NUM_CIRCLE_VERTICES: u32 = 100;

    /// Population size
    pub const NUM_CIRCLES: usize = 30;
    /// Circle radius in normalized device coordinates
    pub const CIRCLE_RADIUS: f64 = 0.05;
    /// Distance travelled per tick along a unit velocity
    pub const CIRCLE_SPEED: f64 = 0.01;

    /// Target simulation ticks per second
    pub const FRAMERATE: u32 = 60;

    /// Probability that a contact with an infected circle transmits
    pub const INFECTION_CHANCE: f64 = 1.0;
    /// Mean time (seconds) an infected circle stays infected
    pub const AVG_RECOVERY_SECONDS: f64 = 5.0;
    /// Recovered circles cannot be infected again
    pub const IMMUNITY: bool = true;

    /// Rounding error sits around 1e-17; overlaps below this are ignored
    pub const OVERLAP_EPSILON: f64 = 1e-16;
}
