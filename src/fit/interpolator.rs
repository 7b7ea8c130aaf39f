//! The boundary interpolator: a natural cubic spline over the cumulative
//! series, keyed by boundary time.
//!
//! Why a natural cubic spline and not linear or step interpolation: any
//! interpolant that passes *exactly* through the cumulative boundary values
//! conserves the per-interval means (the mean rate over an interval is
//! `(c(end) - c(start)) / D`, which is the original average by definition),
//! so conservation is free; smoothness is what the spline buys on top,
//! giving the derived fine rates a physically plausible intra-interval
//! shape instead of flat steps.

use crate::error::DisaggError;
use crate::math::CubicSpline;

/// Immutable smooth interpolant of the cumulative quantity.
pub struct CumulativeCurve {
    spline: CubicSpline,
}

impl CumulativeCurve {
    /// Fit the curve through `(times[i], values[i])`.
    ///
    /// `times` must be strictly increasing and the same length as `values`
    /// (at least 2 knots; 4 or more give the natural cubic its full
    /// smoothness, fewer degrade gracefully to lower-order behavior).
    pub fn fit(times: &[f64], values: &[f64]) -> Result<CumulativeCurve, DisaggError> {
        let spline = CubicSpline::natural(times, values)?;
        Ok(CumulativeCurve { spline })
    }

    /// Cumulative quantity at time `t`.
    ///
    /// Queries at or slightly past the domain boundary extend the nearest
    /// segment's cubic rather than failing; the fine grid's last sample may
    /// land past the final knot when the step does not divide the domain.
    pub fn value(&self, t: f64) -> f64 {
        self.spline.value(t)
    }

    /// Cumulative quantity at every time in `ts`.
    pub fn values(&self, ts: &[f64]) -> Vec<f64> {
        self.spline.values(ts)
    }

    /// First boundary time (normally 0).
    pub fn start_time(&self) -> f64 {
        self.spline.min_x()
    }

    /// Last boundary time.
    pub fn end_time(&self) -> f64 {
        self.spline.max_x()
    }
}
