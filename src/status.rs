//! Status aggregation and selector validation.

pub mod aggregator;
pub mod selector;
