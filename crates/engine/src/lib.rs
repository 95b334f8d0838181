//! Deal Analytics Engine — aggregation over the pitch-outcome dataset
//!
//! Pure, synchronous reductions over in-memory record slices:
//! - Deal aggregator: dataset-wide and filtered statistics
//! - Shark analyzer: per-investor statistics via the name-based deal index
//! - Comparator: side-by-side comparison of two investors
//! - Predictor: closed-form heuristic scores per industry
//!
//! Every ratio is zero-guarded: an empty matching set yields 0, never a
//! division error or a non-finite value. The only propagating failure is
//! [`AnalyticsError::SharkNotFound`].

pub mod aggregator;
pub mod analyzer;
pub mod comparator;
pub mod index;
pub mod predictor;
pub mod types;

use thiserror::Error;

// Re-exports for convenience
pub use aggregator::deal_statistics;
pub use analyzer::investor_statistics;
pub use comparator::{common_industries, compare};
pub use index::DealIndex;
pub use predictor::predict_by_industry;
pub use types::*;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("shark not found: {0}")]
    SharkNotFound(String),
}

/// Mean of a sequence sum, defined as 0 for an empty set
pub(crate) fn guarded_mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Funded share of a set as a percentage in [0, 100]; 0 for an empty set
pub(crate) fn success_rate_pct(funded: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        funded as f64 / total as f64 * 100.0
    }
}
