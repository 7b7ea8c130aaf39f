//! Shared domain types.
//!
//! These types are intentionally lightweight and serializable so they can
//! be:
//!
//! - produced in-memory by the pipeline
//! - handed to external renderers/exporters as JSON
//! - reloaded later for comparisons

use serde::{Deserialize, Serialize};

/// Conservation diagnostics for one original coarse interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalCheck {
    /// Index of the original interval.
    pub index: usize,
    /// Original average rate for this interval.
    pub original: f64,
    /// Mean of the fine rates that fall inside this interval.
    pub fine_mean: f64,
    /// Percentage deviation `100 - 100 * fine_mean / original`.
    ///
    /// `None` marks the undefined case: the original average is zero (so a
    /// percentage against it has no meaning) while the fine mean is also
    /// ~zero. Undefined intervals are excluded from the MAPE aggregate.
    pub deviation_pct: Option<f64>,
}

/// Full conservation report: per-interval checks plus the MAPE aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservationReport {
    pub intervals: Vec<IntervalCheck>,
    /// Mean absolute percentage error over the defined intervals
    /// (0.0 when no interval is defined, i.e. an all-zero series).
    pub mape: f64,
    /// How many intervals entered the MAPE aggregate.
    pub defined_intervals: usize,
}

impl ConservationReport {
    /// Largest absolute per-interval deviation, if any interval is defined.
    pub fn max_abs_deviation(&self) -> Option<f64> {
        self.intervals
            .iter()
            .filter_map(|c| c.deviation_pct)
            .map(f64::abs)
            .fold(None, |acc, d| Some(acc.map_or(d, |a: f64| a.max(d))))
    }
}
