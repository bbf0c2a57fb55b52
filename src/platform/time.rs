//! Frame-rate limiting

use crate::consts::FRAMERATE;

/// Gates simulation ticks to a target rate by wall-clock comparison
///
/// A tick requested before a full period has elapsed is skipped, never queued.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Target period in seconds
    period: f64,
    /// Start of the last accepted tick (seconds)
    last_tick: f64,
}

impl FrameClock {
    pub fn new(now: f64) -> Self {
        Self::with_rate(now, FRAMERATE)
    }

    pub fn with_rate(now: f64, rate: u32) -> Self {
        Self {
            period: 1.0 / rate.max(1) as f64,
            last_tick: now,
        }
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Returns true (and restarts the period) if a tick is due at `now`
    pub fn try_tick(&mut self, now: f64) -> bool {
        if now < self.last_tick + self.period {
            return false;
        }
        self.last_tick = now;
        true
    }

    /// Restart the period at `now` (e.g. when resuming from pause)
    pub fn reset(&mut self, now: f64) {
        self.last_tick = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_early_ticks() {
        let mut clock = FrameClock::with_rate(0.0, 60);
        assert!(!clock.try_tick(0.001));
        assert!(!clock.try_tick(0.016));
        assert!(clock.try_tick(1.0 / 60.0));
        // Period restarts from the accepted tick
        assert!(!clock.try_tick(0.02));
        assert!(clock.try_tick(0.034));
    }

    #[test]
    fn test_late_ticks_are_not_queued() {
        let mut clock = FrameClock::with_rate(0.0, 60);
        assert!(clock.try_tick(1.0));
        // A long stall yields one tick, not sixty
        assert!(!clock.try_tick(1.001));
    }

    #[test]
    fn test_default_rate() {
        let clock = FrameClock::new(0.0);
        assert!((clock.period() - 1.0 / FRAMERATE as f64).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::with_rate(0.0, 10);
        clock.reset(5.0);
        assert!(!clock.try_tick(5.05));
        assert!(clock.try_tick(5.2));
    }
}
