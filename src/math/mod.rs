//! Mathematical utilities: the natural cubic spline primitive.

pub mod spline;

pub use spline::*;
