//! Prefix processing logic.
//!
//! This module contains the aggregation engine:
//! - [`normalize`] - Canonical ordering of raw prefix strings
//! - [`aggregate`] - Single pass reduction to a minimal covering set

mod aggregate;
mod normalize;

// Re-export public functions
pub use aggregate::{aggregate_prefixes, aggregate_sorted, summarize, AggregationMode};
pub use normalize::{sort_canonical, sort_numeric};
