//! Conservation validation: re-aggregate the fine rates and compare.
//!
//! This is the acceptance check for the whole pipeline. Because the
//! interpolant passes exactly through the cumulative boundary values, the
//! block sums of the fine rates telescope to the knot differences and the
//! per-interval deviations land near machine precision.

use crate::domain::{ConservationReport, IntervalCheck};
use crate::error::DisaggError;

pub mod format;

/// A block mean at or below this is treated as zero when the original
/// interval average is zero (the deviation is then undefined, not 0/0).
const ZERO_BASELINE_EPS: f64 = 1e-9;

/// Relative tolerance when checking that the step divides the duration.
const DIVISIBILITY_EPS: f64 = 1e-9;

/// Re-aggregate `fine` onto the original intervals and report deviations.
///
/// Requires `duration` to be an integer multiple of `step` (each original
/// interval then owns a block of `duration/step` consecutive fine samples)
/// and `fine.len() == original.len() * duration/step`.
///
/// Zero-baseline policy: an original average of exactly 0 yields
/// `deviation_pct = None` when the block mean is also ~0 (excluded from the
/// aggregate), and an [`DisaggError::UndefinedMetric`] error when the block
/// mean is materially nonzero — that discrepancy has no percentage
/// representation and must not hide behind a NaN.
pub fn validate_conservation(
    original: &[f64],
    fine: &[f64],
    duration: f64,
    step: f64,
) -> Result<ConservationReport, DisaggError> {
    if original.is_empty() {
        return Err(DisaggError::invalid_input("original averages are empty"));
    }
    if !(duration.is_finite() && duration > 0.0 && step.is_finite() && step > 0.0) {
        return Err(DisaggError::invalid_input(
            "duration and step must be finite and > 0",
        ));
    }

    let ratio = duration / step;
    let samples_per_interval = ratio.round();
    if samples_per_interval < 1.0
        || (ratio - samples_per_interval).abs() > DIVISIBILITY_EPS * ratio.max(1.0)
    {
        return Err(DisaggError::invalid_input(format!(
            "interval duration {duration} is not an integer multiple of the fine step {step}"
        )));
    }
    let m = samples_per_interval as usize;

    if fine.len() != original.len() * m {
        return Err(DisaggError::invalid_input(format!(
            "expected {} fine rates ({} intervals x {m} samples), got {}",
            original.len() * m,
            original.len(),
            fine.len()
        )));
    }

    let mut intervals = Vec::with_capacity(original.len());
    let mut abs_sum = 0.0;
    let mut defined = 0usize;

    for (i, &avg) in original.iter().enumerate() {
        let block = &fine[i * m..(i + 1) * m];
        let fine_mean = block.iter().sum::<f64>() / m as f64;

        let deviation_pct = if avg == 0.0 {
            if fine_mean.abs() > ZERO_BASELINE_EPS {
                return Err(DisaggError::undefined_metric(format!(
                    "interval {i} has a zero original average but a fine mean of {fine_mean}; \
                     percentage deviation is undefined"
                )));
            }
            None
        } else {
            let d = 100.0 - 100.0 * fine_mean / avg;
            abs_sum += d.abs();
            defined += 1;
            Some(d)
        };

        intervals.push(IntervalCheck {
            index: i,
            original: avg,
            fine_mean,
            deviation_pct,
        });
    }

    let mape = if defined > 0 { abs_sum / defined as f64 } else { 0.0 };

    Ok(ConservationReport {
        intervals,
        mape,
        defined_intervals: defined,
    })
}
