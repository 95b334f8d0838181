//! Investor-name deal index
//!
//! The shark/deal relation is a weak, name-based back reference: a deal only
//! records the display names of the sharks who invested. Rather than
//! re-scanning the collection per lookup, the index is built once per
//! request from the retrieved snapshot.

use persistence::repository::DealRecord;
use std::collections::HashMap;
use tracing::debug;

/// Lookup index from investor display name to the deals they invested in.
///
/// Matching is case-sensitive exact equality against each deal's
/// `invested_sharks` list.
pub struct DealIndex<'a> {
    deals: &'a [DealRecord],
    by_investor: HashMap<&'a str, Vec<usize>>,
}

impl<'a> DealIndex<'a> {
    /// Build the index from a retrieved snapshot
    pub fn build(deals: &'a [DealRecord]) -> Self {
        let mut by_investor: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (i, deal) in deals.iter().enumerate() {
            for name in &deal.invested_sharks {
                by_investor.entry(name.as_str()).or_default().push(i);
            }
        }
        debug!(
            deals = deals.len(),
            investors = by_investor.len(),
            "deal index built"
        );
        Self { deals, by_investor }
    }

    /// Deals whose invested-shark list contains `name` (snapshot order)
    pub fn deals_for(&self, name: &str) -> Vec<&'a DealRecord> {
        self.by_investor
            .get(name)
            .map(|ids| ids.iter().map(|&i| &self.deals[i]).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(industry: &str, sharks: &[&str]) -> DealRecord {
        DealRecord {
            id: None,
            season: 1,
            episode: 1,
            startup_name: "Acme".to_string(),
            industry: industry.to_string(),
            ask_amount: 0.0,
            ask_equity: 0.0,
            valuation: 0.0,
            deal_amount: 0.0,
            deal_equity: 0.0,
            deal_debt: 0.0,
            multiple_sharks: sharks.len() > 1,
            interested_sharks: vec![],
            invested_sharks: sharks.iter().map(|s| s.to_string()).collect(),
            success_status: "funded".to_string(),
        }
    }

    #[test]
    fn test_index_groups_by_name() {
        let deals = vec![
            deal("Food", &["Alice", "Bob"]),
            deal("Tech", &["Alice"]),
            deal("Retail", &[]),
        ];
        let index = DealIndex::build(&deals);

        assert_eq!(index.deals_for("Alice").len(), 2);
        assert_eq!(index.deals_for("Bob").len(), 1);
        assert!(index.deals_for("Charlie").is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let deals = vec![deal("Food", &["Alice"])];
        let index = DealIndex::build(&deals);

        assert!(index.deals_for("alice").is_empty());
        assert_eq!(index.deals_for("Alice").len(), 1);
    }
}
