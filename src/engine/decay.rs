//! Decay law for the roll interval.
//!
//! The delay before the next tick is a pure function of the step count:
//! `max(floor, initial * rate^step)`. The tick that computes a value at or
//! below the floor is the last one.

use super::RollConfig;

/// Hard cap on roll length for configs whose floor is never reached.
pub const MAX_STEPS: u32 = 10_000;

/// Raw (unclamped) interval for a step, in milliseconds.
pub fn raw_interval(config: &RollConfig, step: u32) -> f64 {
    config.initial_interval_ms * config.deceleration_rate.powi(step as i32)
}

/// Interval computed by the tick at `step`, clamped to the floor.
pub fn interval_at(config: &RollConfig, step: u32) -> f64 {
    raw_interval(config, step).max(config.min_interval_ms)
}

/// Whether the tick at `step` ends the roll.
pub fn is_final_step(config: &RollConfig, step: u32) -> bool {
    interval_at(config, step) <= config.min_interval_ms
}

/// First step whose interval reaches the floor.
///
/// Closed form `ceil(ln(floor / initial) / ln(rate))`, corrected by a
/// walk so float rounding at the boundary never disagrees with
/// [`is_final_step`]. Returns 0 when the roll would finish on its first
/// tick, including degenerate rates (`rate >= 1` or `rate <= 0`) where the
/// interval would never decay. Never exceeds [`MAX_STEPS`].
pub fn steps_to_floor(config: &RollConfig) -> u32 {
    if is_final_step(config, 0) {
        return 0;
    }
    let rate = config.deceleration_rate;
    if !(rate > 0.0 && rate < 1.0) {
        return 0;
    }
    let estimate = ((config.min_interval_ms / config.initial_interval_ms).ln() / rate.ln()).ceil();
    let mut step = if estimate.is_finite() && estimate > 0.0 {
        estimate.min(MAX_STEPS as f64) as u32
    } else {
        0
    };
    while step > 0 && is_final_step(config, step - 1) {
        step -= 1;
    }
    while !is_final_step(config, step) && step < MAX_STEPS {
        step += 1;
    }
    step
}

/// Number of ticks a roll runs when it is not stopped by hand.
pub fn ticks_per_roll(config: &RollConfig) -> u32 {
    steps_to_floor(config) + 1
}
