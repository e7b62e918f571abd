//! Simulated ("fake") temperature series
//!
//! Each channel has a mean-reverting random walk:
//!
//! 1. add a uniform step in `[-step, +step]` on a 0.01 °C grid
//! 2. the first value produced becomes the baseline
//! 3. if the value strays more than `threshold` from the baseline, jump
//!    back to `baseline + uniform[-spread, +spread]`
//!
//! The baseline is captured once and survives `fake off`/`fake on`.

use rand::{Rng, RngCore};

use crate::config::SimulationConfig;

/// Source of uniformly distributed integer offsets
pub trait NoiseSource {
    /// Uniform integer in `[-bound, bound]`
    fn offset(&mut self, bound: i32) -> i32;
}

/// `NoiseSource` backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngNoise<R>(pub R);

impl<R: RngCore> NoiseSource for RngNoise<R> {
    fn offset(&mut self, bound: i32) -> i32 {
        let bound = bound.abs();
        self.0.random_range(-bound..=bound)
    }
}

/// Random-walk parameters in hundredths of a degree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WalkParams {
    /// Largest single step (0.01 °C)
    pub step_centi: i32,
    /// Re-centering threshold (0.01 °C)
    pub threshold_centi: i32,
    /// Re-centering spread (0.01 °C)
    pub spread_centi: i32,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl WalkParams {
    /// Quantise the configured degrees onto the 0.01 °C grid
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            step_centi: to_centi(config.step_c),
            threshold_centi: to_centi(config.recenter_threshold_c),
            spread_centi: to_centi(config.recenter_spread_c),
        }
    }

    /// Re-centering threshold in °C
    pub fn threshold(&self) -> f32 {
        self.threshold_centi as f32 / 100.0
    }
}

/// Degrees to hundredths, rounded to nearest
fn to_centi(celsius: f32) -> i32 {
    let scaled = celsius * 100.0;
    if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    }
}

fn abs_f32(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// One simulated channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimulatedSeries {
    current: f32,
    baseline: f32,
    baseline_initialized: bool,
}

impl SimulatedSeries {
    /// Create a series starting at `start` with no baseline yet
    pub const fn new(start: f32) -> Self {
        Self {
            current: start,
            baseline: start,
            baseline_initialized: false,
        }
    }

    /// Current simulated value (°C)
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Anchor the walk reverts to, once captured
    pub fn baseline(&self) -> Option<f32> {
        self.baseline_initialized.then_some(self.baseline)
    }

    /// Overwrite the current value; the baseline is left alone
    pub fn set_current(&mut self, celsius: f32) {
        self.current = celsius;
    }

    /// Apply one random-walk step and return the new value
    pub fn advance<N: NoiseSource>(&mut self, noise: &mut N, params: &WalkParams) -> f32 {
        self.current += noise.offset(params.step_centi) as f32 / 100.0;

        if !self.baseline_initialized {
            self.baseline = self.current;
            self.baseline_initialized = true;
        }

        if abs_f32(self.current - self.baseline) > params.threshold() {
            self.current = self.baseline + noise.offset(params.spread_centi) as f32 / 100.0;
        }

        self.current
    }
}
