//! Cumulative transform: interval average rates to cumulative quantity.
//!
//! An average rate over an interval of duration `D` corresponds to a count
//! of `rate * D` units passing during that interval. The running sum of
//! those counts, anchored at zero, is the cumulative quantity at each
//! interval boundary. Everything downstream interpolates this cumulative
//! series rather than the rates themselves, because any curve that passes
//! exactly through the boundary values conserves the per-interval means by
//! construction.

use crate::error::DisaggError;

/// Convert interval averages into `(boundary_times, cumulative)`.
///
/// Both outputs have length `averages.len() + 1`; `boundary_times` is
/// `{0, D, 2D, ...}` and `cumulative[0]` is 0. For non-negative averages
/// the cumulative series is monotonically non-decreasing.
pub fn transform(averages: &[f64], duration: f64) -> Result<(Vec<f64>, Vec<f64>), DisaggError> {
    if averages.is_empty() {
        return Err(DisaggError::invalid_input("averages must not be empty"));
    }
    if averages.len() < 2 {
        return Err(DisaggError::invalid_input(
            "at least 2 intervals are required for disaggregation",
        ));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(DisaggError::invalid_input(format!(
            "interval duration must be finite and > 0, got {duration}"
        )));
    }
    if let Some(bad) = averages.iter().find(|v| !v.is_finite()) {
        return Err(DisaggError::invalid_input(format!(
            "non-finite average rate: {bad}"
        )));
    }

    let boundary_times: Vec<f64> = (0..=averages.len()).map(|i| i as f64 * duration).collect();

    let mut cumulative = Vec::with_capacity(averages.len() + 1);
    let mut total = 0.0;
    cumulative.push(total);
    for &rate in averages {
        total += rate * duration;
        cumulative.push(total);
    }

    Ok((boundary_times, cumulative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_at_zero_and_sums_counts() {
        let (times, cum) = transform(&[10.0, 20.0, 10.0], 15.0).unwrap();
        assert_eq!(times, vec![0.0, 15.0, 30.0, 45.0]);
        assert_eq!(cum, vec![0.0, 150.0, 450.0, 600.0]);
    }

    #[test]
    fn length_is_input_plus_one() {
        let (times, cum) = transform(&[1.0; 24], 15.0).unwrap();
        assert_eq!(times.len(), 25);
        assert_eq!(cum.len(), 25);
    }

    #[test]
    fn non_negative_input_gives_non_decreasing_cumulative() {
        let (_, cum) = transform(&[0.0, 3.5, 0.0, 7.25, 1.0], 5.0).unwrap();
        assert!(cum.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(transform(&[], 15.0).is_err());
        assert!(transform(&[1.0], 15.0).is_err());
        assert!(transform(&[1.0, 2.0], 0.0).is_err());
        assert!(transform(&[1.0, 2.0], -1.0).is_err());
        assert!(transform(&[1.0, 2.0], f64::NAN).is_err());
        assert!(transform(&[1.0, f64::INFINITY], 15.0).is_err());
    }
}
