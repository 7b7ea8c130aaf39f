//! Fine-rate extraction: sample the cumulative curve on a fine grid and
//! differentiate.
//!
//! Grid convention (pinned): the fine grid is `{0, S, 2S, ..., M*S}` with
//! `M = ceil(T_end / S)`, so when the step divides the domain the last grid
//! point is exactly the final boundary and every fine rate lies inside the
//! original domain. When the step does not divide the domain the last grid
//! point overshoots the final boundary and the curve's bounded
//! extrapolation covers it. `len(rates) == len(grid) - 1 == M`.

use crate::error::DisaggError;
use crate::fit::CumulativeCurve;

/// Relative slack when deciding how many steps cover the domain, so that
/// e.g. `45.000000000001 / 1.0` still counts as 45 steps.
const GRID_EPS: f64 = 1e-9;

/// Build the fine time grid `{0, S, ..., M*S}`, `M = ceil(domain_end / S)`.
pub fn fine_time_grid(step: f64, domain_end: f64) -> Result<Vec<f64>, DisaggError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(DisaggError::invalid_input(format!(
            "fine step must be finite and > 0, got {step}"
        )));
    }
    if !(domain_end.is_finite() && domain_end > 0.0) {
        return Err(DisaggError::invalid_input(format!(
            "domain end must be finite and > 0, got {domain_end}"
        )));
    }
    if step > domain_end {
        return Err(DisaggError::invalid_input(format!(
            "fine step {step} exceeds the domain end {domain_end}"
        )));
    }

    let ratio = domain_end / step;
    let m = (ratio - GRID_EPS * ratio.max(1.0)).ceil().max(1.0) as usize;

    Ok((0..=m).map(|k| k as f64 * step).collect())
}

/// Sample `curve` on the fine grid and return first differences divided by
/// the step: `rate[k] = (c(t[k+1]) - c(t[k])) / S`.
pub fn fine_rates(
    curve: &CumulativeCurve,
    step: f64,
    domain_end: f64,
) -> Result<Vec<f64>, DisaggError> {
    let grid = fine_time_grid(step, domain_end)?;
    let sampled = curve.values(&grid);

    Ok(sampled.windows(2).map(|w| (w[1] - w[0]) / step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulative;

    fn curve_for(averages: &[f64], duration: f64) -> (CumulativeCurve, f64) {
        let (times, cum) = cumulative::transform(averages, duration).unwrap();
        let end = *times.last().unwrap();
        (CumulativeCurve::fit(&times, &cum).unwrap(), end)
    }

    #[test]
    fn grid_ends_at_the_final_boundary_for_dividing_steps() {
        let grid = fine_time_grid(1.0, 45.0).unwrap();
        assert_eq!(grid.len(), 46);
        assert_eq!(grid[0], 0.0);
        assert_eq!(*grid.last().unwrap(), 45.0);
    }

    #[test]
    fn grid_overshoots_for_non_dividing_steps() {
        let grid = fine_time_grid(2.0, 45.0).unwrap();
        assert_eq!(grid.len(), 24);
        assert_eq!(*grid.last().unwrap(), 46.0);
    }

    #[test]
    fn rate_count_is_grid_length_minus_one() {
        let (curve, end) = curve_for(&[10.0, 20.0, 10.0], 15.0);
        let rates = fine_rates(&curve, 1.0, end).unwrap();
        assert_eq!(rates.len(), 45);
    }

    #[test]
    fn constant_rate_stays_constant() {
        let (curve, end) = curve_for(&[5.0, 5.0, 5.0, 5.0], 15.0);
        let rates = fine_rates(&curve, 1.0, end).unwrap();
        assert_eq!(rates.len(), 60);
        for r in &rates {
            assert!((r - 5.0).abs() < 1e-9, "expected ~5, got {r}");
        }
    }

    #[test]
    fn divides_by_the_step_to_keep_rate_semantics() {
        let (curve, end) = curve_for(&[6.0, 6.0, 6.0, 6.0], 10.0);
        let rates = fine_rates(&curve, 5.0, end).unwrap();
        assert_eq!(rates.len(), 8);
        for r in &rates {
            assert!((r - 6.0).abs() < 1e-9, "expected ~6, got {r}");
        }
    }

    #[test]
    fn rejects_bad_grid_parameters() {
        assert!(fine_time_grid(0.0, 45.0).is_err());
        assert!(fine_time_grid(-1.0, 45.0).is_err());
        assert!(fine_time_grid(1.0, 0.0).is_err());
        assert!(fine_time_grid(60.0, 45.0).is_err());
        assert!(fine_time_grid(f64::NAN, 45.0).is_err());
    }
}
