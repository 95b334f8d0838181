//! Predictor — closed-form heuristic scores per industry
//!
//! Formula per industry, from its deal subset:
//!   growth_potential = (success_rate × avg_valuation) / avg_deal
//!   risk_score       = 1 − success_rate
//! where success_rate is the 0-1 funded fraction. This is fixed arithmetic
//! over historical aggregates, not a trained model.

use crate::guarded_mean;
use crate::types::{IndustryPrediction, MarketData};
use persistence::repository::DealRecord;
use std::collections::BTreeMap;

#[derive(Default)]
struct IndustryHistory {
    deal_count: usize,
    funded: usize,
    deal_amount_sum: f64,
    valuation_sum: f64,
}

/// Derive one prediction per distinct industry in the snapshot, sorted by
/// industry name.
///
/// `avg_deal` can legitimately be zero (no deal closed in that industry);
/// `growth_potential` is defined as 0 in that case rather than dividing.
pub fn predict_by_industry(deals: &[DealRecord]) -> Vec<IndustryPrediction> {
    let mut by_industry: BTreeMap<&str, IndustryHistory> = BTreeMap::new();
    for deal in deals {
        let hist = by_industry.entry(deal.industry.as_str()).or_default();
        hist.deal_count += 1;
        if deal.is_funded() {
            hist.funded += 1;
        }
        hist.deal_amount_sum += deal.deal_amount;
        hist.valuation_sum += deal.valuation;
    }

    by_industry
        .into_iter()
        .map(|(industry, hist)| {
            let avg_deal = guarded_mean(hist.deal_amount_sum, hist.deal_count);
            let avg_valuation = guarded_mean(hist.valuation_sum, hist.deal_count);
            let success_rate = if hist.deal_count == 0 {
                0.0
            } else {
                hist.funded as f64 / hist.deal_count as f64
            };

            let growth_potential = if avg_deal == 0.0 {
                0.0
            } else {
                (success_rate * avg_valuation) / avg_deal
            };

            IndustryPrediction {
                industry: industry.to_string(),
                success_probability: success_rate,
                growth_potential,
                risk_score: 1.0 - success_rate,
                market_data: MarketData {
                    avg_deal,
                    avg_valuation,
                    total_deals: hist.deal_count as u32,
                },
            }
        })
        .collect()
}
