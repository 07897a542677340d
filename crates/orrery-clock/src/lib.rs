//! Shared simulation clock: a single monotonic driver value that all
//! time-based motion reads from.
//!
//! Orbits, comet travel, and explosion playback all derive their speed from
//! one scalar accumulator advanced once per frame. Pausing zeroes the per-tick
//! step and restores the previous non-zero step on unpause, so a paused scene
//! resumes at exactly the speed it was left at.

/// The default per-tick increment before any speed-slider scaling.
pub const DEFAULT_BASE_STEP: f64 = 0.005;

/// Process-lifetime simulation clock.
///
/// Invariants:
/// - `driver_value` never decreases.
/// - `step_size == 0.0` exactly while paused (or while the speed slider sits
///   at zero, which halts motion without flipping the paused flag).
#[derive(Debug, Clone)]
pub struct SimulationClock {
    driver_value: f64,
    step_size: f64,
    base_step: f64,
    last_nonzero_step: f64,
    paused: bool,
}

impl SimulationClock {
    /// Creates a running clock with the given base step per tick.
    pub fn new(base_step: f64) -> Self {
        Self {
            driver_value: 0.0,
            step_size: base_step,
            base_step,
            last_nonzero_step: base_step,
            paused: false,
        }
    }

    /// Advances the driver value by the current step. Pure arithmetic,
    /// no failure modes.
    pub fn tick(&mut self) {
        self.driver_value += self.step_size;
    }

    /// The monotonic accumulator driving all animated motion.
    pub fn driver_value(&self) -> f64 {
        self.driver_value
    }

    /// The per-tick increment. Zero while paused.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Zeroes the step (pause) or restores the last non-zero step (unpause).
    pub fn set_paused(&mut self, paused: bool) {
        if paused == self.paused {
            return;
        }
        self.paused = paused;
        if paused {
            if self.step_size > 0.0 {
                self.last_nonzero_step = self.step_size;
            }
            self.step_size = 0.0;
        } else {
            self.step_size = self.last_nonzero_step;
        }
    }

    /// Flips the paused state. Bound to the pause key by the application.
    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Recomputes the step from the base rate with a non-linear response:
    /// factors at or below 1 scale linearly, factors above 1 are raised to
    /// the tenth power so large slider movements accelerate sharply while
    /// the midpoint region stays predictable.
    ///
    /// While paused, the new step is stashed and takes effect on unpause.
    pub fn set_step_scale(&mut self, factor: f64) {
        let factor = factor.max(0.0);
        let response = if factor <= 1.0 {
            factor
        } else {
            factor.powi(10)
        };
        let step = self.base_step * response;
        if self.paused {
            if step > 0.0 {
                self.last_nonzero_step = step;
            }
        } else {
            self.step_size = step;
            if step > 0.0 {
                self.last_nonzero_step = step;
            }
        }
    }

    /// The configured base step, before slider scaling.
    pub fn base_step(&self) -> f64 {
        self.base_step
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_by_step() {
        let mut clock = SimulationClock::new(0.005);
        clock.tick();
        clock.tick();
        assert!((clock.driver_value() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut clock = SimulationClock::new(0.005);
        clock.set_paused(true);
        for _ in 0..100 {
            clock.tick();
        }
        assert_eq!(clock.driver_value(), 0.0);
        assert_eq!(clock.step_size(), 0.0);
    }

    #[test]
    fn test_unpause_restores_previous_step() {
        let mut clock = SimulationClock::new(0.005);
        clock.set_step_scale(0.5);
        clock.set_paused(true);
        clock.set_paused(false);
        assert!((clock.step_size() - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_step_scale_linear_at_or_below_one() {
        let mut clock = SimulationClock::new(0.005);
        clock.set_step_scale(0.25);
        assert!((clock.step_size() - 0.005 * 0.25).abs() < 1e-12);
        clock.set_step_scale(1.0);
        assert!((clock.step_size() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_step_scale_tenth_power_above_one() {
        let mut clock = SimulationClock::new(0.005);
        clock.set_step_scale(1.2);
        let expected = 0.005 * 1.2_f64.powi(10);
        assert!((clock.step_size() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_step_scale_monotone_and_convex_above_one() {
        let base = 0.005;
        let speeds: Vec<f64> = [1.0, 1.5, 2.0, 2.5]
            .iter()
            .map(|f| {
                let mut clock = SimulationClock::new(base);
                clock.set_step_scale(*f);
                clock.step_size()
            })
            .collect();
        assert!(speeds.windows(2).all(|w| w[1] > w[0]));
        // Convexity: successive gaps grow.
        assert!(speeds[2] - speeds[1] > speeds[1] - speeds[0]);
        assert!(speeds[3] - speeds[2] > speeds[2] - speeds[1]);
    }

    #[test]
    fn test_scale_change_while_paused_applies_on_unpause() {
        let mut clock = SimulationClock::new(0.005);
        clock.set_paused(true);
        clock.set_step_scale(0.5);
        assert_eq!(clock.step_size(), 0.0);
        clock.set_paused(false);
        assert!((clock.step_size() - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_redundant_pause_is_a_noop() {
        let mut clock = SimulationClock::new(0.005);
        clock.set_paused(true);
        clock.set_paused(true);
        clock.set_paused(false);
        assert!((clock.step_size() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_driver_value_monotonic_under_scale_changes() {
        let mut clock = SimulationClock::new(0.005);
        let mut last = 0.0;
        for factor in [0.2, 1.0, 1.4, 0.0, 0.7] {
            clock.set_step_scale(factor);
            for _ in 0..10 {
                clock.tick();
                assert!(clock.driver_value() >= last);
                last = clock.driver_value();
            }
        }
    }
}
