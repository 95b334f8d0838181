//! Shark analyzer — per-investor statistics from the deal index

use crate::index::DealIndex;
use crate::types::InvestorStatistics;
use crate::{guarded_mean, success_rate_pct};
use persistence::repository::SharkRecord;
use std::collections::BTreeMap;

/// Compute an investor's statistics from the deals their name appears on.
///
/// The roster's cached lifetime stats are deliberately ignored; everything
/// is recomputed from the deal snapshot behind `index`. An investor with no
/// matching deals yields all-zero statistics (`avg_deal_size` included, not
/// a division error).
pub fn investor_statistics(shark: &SharkRecord, index: &DealIndex) -> InvestorStatistics {
    let deals = index.deals_for(&shark.name);

    let total_deals = deals.len();
    let total_investment: f64 = deals.iter().map(|d| d.deal_amount).sum();
    let funded = deals.iter().filter(|d| d.is_funded()).count();

    let mut industry_breakdown: BTreeMap<String, u32> = BTreeMap::new();
    let mut season_breakdown: BTreeMap<i64, u32> = BTreeMap::new();
    for deal in &deals {
        *industry_breakdown.entry(deal.industry.clone()).or_default() += 1;
        *season_breakdown.entry(deal.season).or_default() += 1;
    }

    InvestorStatistics {
        total_deals: total_deals as u32,
        total_investment,
        success_rate: success_rate_pct(funded, total_deals),
        avg_deal_size: guarded_mean(total_investment, total_deals),
        industry_breakdown,
        season_breakdown,
        season_appearances: shark.season_appearances.clone(),
        appearance_count: shark.season_appearances.len() as u32,
    }
}
