//! Synthetic interval-average data for demos and tests.

pub mod sample;

pub use sample::*;
