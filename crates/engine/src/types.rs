//! Derived aggregate shapes (ephemeral, computed per request)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-industry slice of the deal statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryStats {
    pub industry: String,
    pub count: u32,
    pub total_investment: f64,
    pub avg_valuation: f64,
}

/// Dataset-wide (or filtered) deal statistics.
///
/// `success_rate` is a percentage in [0, 100]; the breakdown carries one
/// entry per distinct industry present, sorted by industry name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealStatistics {
    pub total_deals: u32,
    pub total_investment: f64,
    pub avg_valuation: f64,
    pub success_rate: f64,
    pub industry_breakdown: Vec<IndustryStats>,
}

/// Per-investor statistics over the deals they invested in.
///
/// Breakdowns are sorted maps for deterministic output. Season appearance
/// data is passed through from the roster unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorStatistics {
    pub total_deals: u32,
    pub total_investment: f64,
    pub success_rate: f64,
    pub avg_deal_size: f64,
    pub industry_breakdown: BTreeMap<String, u32>,
    pub season_breakdown: BTreeMap<i64, u32>,
    pub season_appearances: Vec<i64>,
    pub appearance_count: u32,
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorSummary {
    pub id: String,
    pub name: String,
    pub stats: InvestorStatistics,
}

/// Side-by-side comparison of two investors.
///
/// `common_industries` preserves the first investor's preference order;
/// `investment_styles` is keyed by display name, not id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub shark_a: InvestorSummary,
    pub shark_b: InvestorSummary,
    pub common_industries: Vec<String>,
    pub investment_styles: BTreeMap<String, Vec<String>>,
}

/// Historical averages backing a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub avg_deal: f64,
    pub avg_valuation: f64,
    pub total_deals: u32,
}

/// Heuristic per-industry scores derived from historical aggregates.
///
/// `success_probability` is a 0-1 fraction (unlike the percentage rates
/// elsewhere) so that `risk_score = 1 - success_probability` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryPrediction {
    pub industry: String,
    pub success_probability: f64,
    pub growth_potential: f64,
    pub risk_score: f64,
    pub market_data: MarketData,
}
