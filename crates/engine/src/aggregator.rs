//! Deal aggregator — dataset-wide and filtered deal statistics

use crate::types::{DealStatistics, IndustryStats};
use crate::{guarded_mean, success_rate_pct};
use persistence::repository::DealRecord;
use std::collections::BTreeMap;

#[derive(Default)]
struct IndustryAccumulator {
    count: u32,
    total_investment: f64,
    valuation_sum: f64,
}

/// Reduce an already-filtered snapshot of the deal collection to its
/// aggregate statistics.
///
/// Pure function of the input slice; an empty slice yields all-zero
/// statistics and an empty breakdown. Breakdown entries are sorted by
/// industry name for deterministic output.
pub fn deal_statistics(deals: &[DealRecord]) -> DealStatistics {
    let total_deals = deals.len();
    let total_investment: f64 = deals.iter().map(|d| d.deal_amount).sum();
    let valuation_sum: f64 = deals.iter().map(|d| d.valuation).sum();
    let funded = deals.iter().filter(|d| d.is_funded()).count();

    let mut by_industry: BTreeMap<&str, IndustryAccumulator> = BTreeMap::new();
    for deal in deals {
        let acc = by_industry.entry(deal.industry.as_str()).or_default();
        acc.count += 1;
        acc.total_investment += deal.deal_amount;
        acc.valuation_sum += deal.valuation;
    }

    let industry_breakdown = by_industry
        .into_iter()
        .map(|(industry, acc)| IndustryStats {
            industry: industry.to_string(),
            count: acc.count,
            total_investment: acc.total_investment,
            avg_valuation: guarded_mean(acc.valuation_sum, acc.count as usize),
        })
        .collect();

    DealStatistics {
        total_deals: total_deals as u32,
        total_investment,
        avg_valuation: guarded_mean(valuation_sum, total_deals),
        success_rate: success_rate_pct(funded, total_deals),
        industry_breakdown,
    }
}
