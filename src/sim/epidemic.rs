//! Susceptible / Infected / Recovered transitions
//!
//! Transmission is evaluated per colliding pair inside the collision resolver,
//! recovery once per particle per tick. Both draw from the simulation RNG so a
//! seeded run is fully reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Infection state of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Health {
    #[default]
    Susceptible,
    Infected,
    Recovered,
}

impl Health {
    #[inline]
    pub fn is_infected(self) -> bool {
        self == Health::Infected
    }
}

/// Which side of a contact caught the infection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposed {
    First,
    Second,
}

/// Transmission and recovery parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Epidemic {
    /// Per-contact transmission probability
    pub infection_chance: f64,
    /// Per-tick recovery probability for an infected particle
    pub recovery_chance: f64,
    /// Recovered particles are exempt from reinfection
    pub immunity: bool,
}

impl Default for Epidemic {
    fn default() -> Self {
        Self {
            infection_chance: INFECTION_CHANCE,
            recovery_chance: Self::recovery_chance_for(AVG_RECOVERY_SECONDS, FRAMERATE),
            immunity: IMMUNITY,
        }
    }
}

impl Epidemic {
    /// Per-tick probability giving a geometric recovery time with the given mean
    pub fn recovery_chance_for(avg_seconds: f64, tick_rate: u32) -> f64 {
        1.0 / (avg_seconds * tick_rate as f64)
    }

    /// Whether a particle in this state can be infected by contact
    pub fn can_catch(&self, health: Health) -> bool {
        match health {
            Health::Susceptible => true,
            Health::Infected => false,
            Health::Recovered => !self.immunity,
        }
    }

    /// Evaluate transmission for a colliding pair
    ///
    /// Only a contact with exactly one infected side can transmit. Returns the
    /// side that became infected, if any.
    pub fn transmit<R: Rng + ?Sized>(
        &self,
        first: &mut Health,
        second: &mut Health,
        rng: &mut R,
    ) -> Option<Exposed> {
        let (target, side) = match (first.is_infected(), second.is_infected()) {
            (true, false) => (second, Exposed::Second),
            (false, true) => (first, Exposed::First),
            _ => return None,
        };

        if !self.can_catch(*target) || !roll(rng, self.infection_chance) {
            return None;
        }

        *target = Health::Infected;
        Some(side)
    }

    /// Per-tick recovery roll; returns true if the particle just recovered
    pub fn try_recover<R: Rng + ?Sized>(&self, health: &mut Health, rng: &mut R) -> bool {
        if health.is_infected() && roll(rng, self.recovery_chance) {
            *health = Health::Recovered;
            return true;
        }
        false
    }
}

/// Bernoulli draw; a chance of 1.0 or more always succeeds
#[inline]
fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.random::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_recovery_chance() {
        let epidemic = Epidemic::default();
        assert!((epidemic.recovery_chance - 1.0 / 300.0).abs() < 1e-12);
        assert!(epidemic.immunity);
    }

    #[test]
    fn test_transmit_certain() {
        let epidemic = Epidemic::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut a = Health::Infected;
        let mut b = Health::Susceptible;
        assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), Some(Exposed::Second));
        assert_eq!(b, Health::Infected);

        let mut a = Health::Susceptible;
        let mut b = Health::Infected;
        assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), Some(Exposed::First));
        assert_eq!(a, Health::Infected);
    }

    #[test]
    fn test_transmit_requires_exactly_one_infected() {
        let epidemic = Epidemic::default();
        let mut rng = Pcg32::seed_from_u64(2);

        let mut a = Health::Infected;
        let mut b = Health::Infected;
        assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), None);

        let mut a = Health::Susceptible;
        let mut b = Health::Susceptible;
        assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), None);
        assert_eq!((a, b), (Health::Susceptible, Health::Susceptible));
    }

    #[test]
    fn test_immunity_protects_recovered() {
        let epidemic = Epidemic::default();
        let mut rng = Pcg32::seed_from_u64(3);

        let mut a = Health::Infected;
        let mut b = Health::Recovered;
        assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), None);
        assert_eq!(b, Health::Recovered);
    }

    #[test]
    fn test_reinfection_without_immunity() {
        let epidemic = Epidemic {
            immunity: false,
            ..Epidemic::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);

        let mut a = Health::Recovered;
        let mut b = Health::Infected;
        assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), Some(Exposed::First));
        assert_eq!(a, Health::Infected);
    }

    #[test]
    fn test_zero_chance_never_transmits() {
        let epidemic = Epidemic {
            infection_chance: 0.0,
            ..Epidemic::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);

        for _ in 0..1000 {
            let mut a = Health::Infected;
            let mut b = Health::Susceptible;
            assert_eq!(epidemic.transmit(&mut a, &mut b, &mut rng), None);
        }
    }

    #[test]
    fn test_recovery_only_from_infected() {
        let epidemic = Epidemic {
            recovery_chance: 1.0,
            ..Epidemic::default()
        };
        let mut rng = Pcg32::seed_from_u64(6);

        let mut h = Health::Susceptible;
        assert!(!epidemic.try_recover(&mut h, &mut rng));
        assert_eq!(h, Health::Susceptible);

        let mut h = Health::Infected;
        assert!(epidemic.try_recover(&mut h, &mut rng));
        assert_eq!(h, Health::Recovered);

        assert!(!epidemic.try_recover(&mut h, &mut rng));
        assert_eq!(h, Health::Recovered);
    }
}
