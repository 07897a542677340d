//! Slider routing: continuous control values mapped onto configuration
//! changes for the clock, the comet pool, and the lighting collaborator.
//!
//! Each slider has its own response curve so that the interesting region of
//! its range stays finely adjustable:
//! - animation speed: raw value ÷ 100 yields a factor the clock maps through
//!   its own linear-below-1 / tenth-power-above-1 response,
//! - pool target count: `value^1.5 + offset`,
//! - ambient brightness: identity at or below 1, `value^4` above.
//!
//! Consumers pick changes up once per frame through the `take_*` methods, so
//! a burst of slider events within one frame collapses into a single
//! configuration change.

use tracing::debug;

/// Pending slider-driven configuration changes, drained once per frame.
#[derive(Debug, Clone, Default)]
pub struct SliderBank {
    speed_factor: Option<f64>,
    pool_target: Option<usize>,
    ambient_brightness: Option<f32>,
    pool_offset: f64,
}

impl SliderBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bank with a non-zero pool-count offset (the minimum member
    /// count the slider can request).
    #[must_use]
    pub fn with_pool_offset(pool_offset: f64) -> Self {
        Self {
            pool_offset,
            ..Self::default()
        }
    }

    /// Animation-speed slider moved. Raw range is 0–100+; the stored factor
    /// is `raw / 100`, to be fed to the clock's step-scale response.
    pub fn animation_speed(&mut self, raw: f64) {
        let factor = (raw / 100.0).max(0.0);
        debug!(raw, factor, "animation speed slider");
        self.speed_factor = Some(factor);
    }

    /// Pool-count slider moved. Maps through `raw^1.5 + offset` so the low
    /// end of the slider moves in small increments and the high end sweeps
    /// whole screenfuls of comets at once.
    pub fn pool_target(&mut self, raw: f64) {
        let raw = raw.max(0.0);
        let target = (raw.powf(1.5) + self.pool_offset).round().max(0.0) as usize;
        debug!(raw, target, "pool target slider");
        self.pool_target = Some(target);
    }

    /// Ambient-brightness slider moved. Identity at or below 1, `raw^4`
    /// above, so brightness ramps gently through the realistic range and
    /// only blows out at the top of the slider.
    pub fn ambient_brightness(&mut self, raw: f32) {
        let raw = raw.max(0.0);
        let brightness = if raw > 1.0 { raw.powi(4) } else { raw };
        debug!(raw, brightness, "ambient brightness slider");
        self.ambient_brightness = Some(brightness);
    }

    /// Takes the pending speed factor, if the slider moved since last frame.
    pub fn take_speed_factor(&mut self) -> Option<f64> {
        self.speed_factor.take()
    }

    /// Takes the pending pool target count.
    pub fn take_pool_target(&mut self) -> Option<usize> {
        self.pool_target.take()
    }

    /// Takes the pending ambient brightness.
    pub fn take_ambient_brightness(&mut self) -> Option<f32> {
        self.ambient_brightness.take()
    }
}
