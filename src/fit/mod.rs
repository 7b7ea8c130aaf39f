//! Fitting the smooth cumulative curve through interval boundaries.

pub mod interpolator;

pub use interpolator::CumulativeCurve;
