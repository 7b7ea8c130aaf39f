//! Natural cubic spline interpolation.
//!
//! Given knots `(x_i, y_i)` we solve for the second derivatives ("moments")
//! `m_0..=m_n` at the knots. Interior rows come from C² continuity:
//!
//! ```text
//! h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1]
//!     = 6*( (y[i+1]-y[i])/h[i] - (y[i]-y[i-1])/h[i-1] )
//! ```
//!
//! and the natural boundary condition pins `m_0 = m_n = 0`, which makes the
//! interpolant the smoothest curve passing exactly through every knot.
//!
//! Implementation choices:
//! - The (n+1)×(n+1) system is solved with nalgebra's LU decomposition. The
//!   system is tridiagonal and strictly diagonally dominant, so a dense LU
//!   is overkill asymptotically but robust and plenty fast at the sizes this
//!   crate sees (tens to low thousands of knots).
//! - Each segment stores its coefficients in Horner order `[d, c, b, a]`
//!   for `S_i(x) = a + b*dx + c*dx² + d*dx³`, `dx = x - x_i`.
//! - Queries outside the knot range evaluate the nearest segment's cubic.
//!   This is a deliberate, bounded extrapolation policy: fine-resolution
//!   sampling may legitimately query at (or, for non-dividing step sizes,
//!   slightly past) the final knot.

use nalgebra::{DMatrix, DVector};

use crate::error::DisaggError;

/// One cubic segment, valid from `lhs_x` to the next segment's `lhs_x`.
struct Segment {
    /// Horner coefficients `[d, c, b, a]`.
    coefs: [f64; 4],
    lhs_x: f64,
}

impl Segment {
    fn value(&self, x: f64) -> f64 {
        let dx = x - self.lhs_x;
        let mut acc = self.coefs[0];
        for &c in &self.coefs[1..] {
            acc = f64::mul_add(acc, dx, c);
        }
        acc
    }
}

/// An immutable natural cubic spline through a set of knots.
pub struct CubicSpline {
    segments: Vec<Segment>,
    min_x: f64,
    max_x: f64,
}

impl CubicSpline {
    /// Fit a natural cubic spline through `(xs[i], ys[i])`.
    ///
    /// Requires `xs.len() == ys.len() >= 2`, all values finite, and `xs`
    /// strictly increasing. Two knots degrade gracefully to a straight
    /// line (both end moments are zero, so the cubic terms vanish).
    pub fn natural(xs: &[f64], ys: &[f64]) -> Result<CubicSpline, DisaggError> {
        if xs.len() != ys.len() {
            return Err(DisaggError::invalid_input(format!(
                "knot count mismatch: {} x-values vs {} y-values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(DisaggError::invalid_input(
                "at least 2 knots are required for spline interpolation",
            ));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(DisaggError::invalid_input("non-finite knot value"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DisaggError::invalid_input(
                "knot x-values must be strictly increasing",
            ));
        }

        let n = xs.len() - 1;
        let h: Vec<f64> = (0..n).map(|i| xs[i + 1] - xs[i]).collect();

        let moments = solve_natural_moments(ys, &h)?;

        let segments = (0..n)
            .map(|i| {
                let d = (moments[i + 1] - moments[i]) / (6.0 * h[i]);
                let c = moments[i] / 2.0;
                let b = (ys[i + 1] - ys[i]) / h[i]
                    - h[i] * (2.0 * moments[i] + moments[i + 1]) / 6.0;
                let a = ys[i];
                Segment {
                    coefs: [d, c, b, a],
                    lhs_x: xs[i],
                }
            })
            .collect();

        Ok(CubicSpline {
            segments,
            min_x: xs[0],
            max_x: xs[n],
        })
    }

    /// Evaluate the spline at `x`.
    ///
    /// Outside `[min_x, max_x]` the nearest segment's cubic is extended.
    pub fn value(&self, x: f64) -> f64 {
        self.segments[self.find_segment(x)].value(x)
    }

    /// Evaluate the spline at every point of `xs`.
    pub fn values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.value(x)).collect()
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    fn find_segment(&self, x: f64) -> usize {
        if x <= self.min_x {
            0
        } else if x >= self.max_x {
            self.segments.len() - 1
        } else {
            self.segments
                .partition_point(|s| s.lhs_x <= x)
                .saturating_sub(1)
        }
    }
}

/// Solve the natural-boundary moment system.
fn solve_natural_moments(ys: &[f64], h: &[f64]) -> Result<Vec<f64>, DisaggError> {
    let n = h.len();
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut rhs = DVector::<f64>::zeros(n + 1);

    // Natural boundary: m[0] = m[n] = 0.
    mat[(0, 0)] = 1.0;
    mat[(n, n)] = 1.0;

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    let moments = mat
        .lu()
        .solve(&rhs)
        .ok_or_else(|| DisaggError::numerical("natural spline moment system is singular"))?;

    if moments.iter().any(|m| !m.is_finite()) {
        return Err(DisaggError::numerical(
            "natural spline moments are non-finite",
        ));
    }

    Ok(moments.iter().copied().collect())
}
