//! Simulation state and core types
//!
//! `SimState` exclusively owns the particle sequence and the seeded RNG; each
//! stage of a tick borrows them mutably in turn.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::epidemic::{Epidemic, Health};
use super::particle::Particle;
use super::spawn::spawn_population;
use crate::consts::*;

/// Health transitions raised during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    Infected { index: usize },
    Recovered { index: usize },
}

/// Population counts per health state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Census {
    pub susceptible: usize,
    pub infected: usize,
    pub recovered: usize,
}

impl Census {
    pub fn of(particles: &[Particle]) -> Self {
        particles.iter().fold(Census::default(), |mut census, p| {
            match p.health {
                Health::Susceptible => census.susceptible += 1,
                Health::Infected => census.infected += 1,
                Health::Recovered => census.recovered += 1,
            }
            census
        })
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Fixed-size population, mutated in place every tick
    pub particles: Vec<Particle>,
    pub epidemic: Epidemic,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Transitions raised by the last tick
    pub events: Vec<SimEvent>,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Spawn `NUM_CIRCLES` particles from the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_population(seed, NUM_CIRCLES)
    }

    pub fn with_population(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let epidemic = Epidemic::default();
        let particles = spawn_population(count, &epidemic, &mut rng);
        log::info!("Spawned {} particles (seed {})", particles.len(), seed);

        Self {
            seed,
            particles,
            epidemic,
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    /// Wrap an explicit population (scripted scenarios, tests)
    pub fn from_particles(seed: u64, particles: Vec<Particle>, epidemic: Epidemic) -> Self {
        Self {
            seed,
            particles,
            epidemic,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn census(&self) -> Census {
        Census::of(&self.particles)
    }

    /// Simulated time in seconds at the nominal frame rate
    pub fn elapsed_secs(&self) -> f64 {
        self.time_ticks as f64 / FRAMERATE as f64
    }

    /// No infected particle remains; the outbreak is over
    pub fn is_settled(&self) -> bool {
        self.census().infected == 0
    }
}
