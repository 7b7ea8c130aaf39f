//! Synthetic interval-average profile generation.
//!
//! The pipeline itself never reads data; callers supply averages from
//! wherever they like. For demos and tests this module generates plausible
//! traffic-flow-like profiles: a base level with a rush-hour bump plus
//! Gaussian noise, deterministic for a fixed seed.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::DisaggError;

/// Configuration for a synthetic rush-hour profile.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Number of coarse intervals to generate (>= 2).
    pub intervals: usize,
    /// Off-peak base rate.
    pub base: f64,
    /// Additional rate at the center of the peak.
    pub peak: f64,
    /// Center of the peak as a fraction of the series (0.0 .. 1.0).
    pub peak_at: f64,
    /// Width of the peak as a fraction of the series.
    pub width: f64,
    /// Standard deviation of the additive noise.
    pub noise_sd: f64,
    /// RNG seed; the output is deterministic for a fixed seed.
    pub seed: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            intervals: 24,
            base: 10.0,
            peak: 50.0,
            peak_at: 0.4,
            width: 0.15,
            noise_sd: 1.5,
            seed: 7,
        }
    }
}

/// Generate a synthetic non-negative interval-average profile.
pub fn generate_profile(config: &ProfileConfig) -> Result<Vec<f64>, DisaggError> {
    if config.intervals < 2 {
        return Err(DisaggError::invalid_input(
            "profile needs at least 2 intervals",
        ));
    }
    if !(config.base.is_finite() && config.base >= 0.0 && config.peak.is_finite()) {
        return Err(DisaggError::invalid_input("invalid base/peak levels"));
    }
    if !(config.width.is_finite() && config.width > 0.0) {
        return Err(DisaggError::invalid_input("peak width must be > 0"));
    }
    if !(config.noise_sd.is_finite() && config.noise_sd >= 0.0) {
        return Err(DisaggError::invalid_input("noise sd must be >= 0"));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sd.max(f64::MIN_POSITIVE))
        .map_err(|e| DisaggError::invalid_input(format!("noise distribution error: {e}")))?;

    let n = config.intervals;
    let mut profile = Vec::with_capacity(n);
    for i in 0..n {
        let frac = (i as f64 + 0.5) / n as f64;
        let z = (frac - config.peak_at) / config.width;
        let bump = config.peak * (-0.5 * z * z).exp();
        let noise = if config.noise_sd > 0.0 {
            normal.sample(&mut rng)
        } else {
            0.0
        };
        profile.push((config.base + bump + noise).max(0.0));
    }

    Ok(profile)
}

/// A fixed 6-hour profile of 15-minute mean flows (veh/min), 24 values:
/// quiet start, morning rush, slow afternoon decay. Used by doc examples
/// and end-to-end tests.
pub fn demo_profile() -> Vec<f64> {
    vec![
        8.0, 9.0, 11.0, 13.0, 17.0, 24.0, 33.0, 43.0, 54.0, 63.0, 61.0, 58.0, 55.0, 53.0, 50.0,
        47.0, 46.0, 45.0, 46.0, 44.0, 43.0, 42.0, 42.0, 40.0,
    ]
}
