//! Evaluation utilities for grouped, ranked predictions.
//!
//! - [`slicing::group_slices`]: runs of equal group ids as index ranges.
//! - [`slicing::split_n_by_ratios`]: contiguous ranges sized by integer ratios.
//! - [`intersect::intersect_sorted`]: lazy k-way intersection of sorted slices.
//! - [`metrics::TopKGroupAccuracy`]: per-group top-K hit rate.

pub mod error;
pub mod eval;
pub mod intersect;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod slicing;

pub use error::{EvalError, EvalResult};
pub use intersect::{IntersectSorted, intersect_sorted};
pub use metrics::{AccuracyReport, TopKGroupAccuracy, accuracy_curve};
pub use slicing::{group_slices, split_n_by_ratios};
