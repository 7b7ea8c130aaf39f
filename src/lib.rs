//! `flow-disagg` library crate.
//!
//! Disaggregates coarse-interval average rates (e.g. 15-minute mean vehicle
//! flows) into fine-resolution per-unit-time rates that conserve the
//! original averages:
//!
//! averages -> cumulative quantity -> natural cubic spline through the
//! interval boundaries -> fine sampling -> first differences -> conservation
//! check.
//!
//! The crate is a pure library: callers supply the averages (from file, API,
//! or the synthetic generator in [`data`]) and consume the fine rates and
//! the conservation report; rendering and I/O live outside.

pub mod cumulative;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fit;
pub mod math;
pub mod pipeline;
pub mod report;
