//! Comparator — side-by-side comparison of two investors

use crate::analyzer::investor_statistics;
use crate::index::DealIndex;
use crate::types::{ComparisonResult, InvestorSummary};
use persistence::repository::SharkRecord;
use std::collections::{BTreeMap, HashSet};

/// Industries both investors declare a preference for, preserving the first
/// investor's order. Self-comparison returns the full preference set.
pub fn common_industries(a: &SharkRecord, b: &SharkRecord) -> Vec<String> {
    let theirs: HashSet<&str> = b.industry_preference.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    a.industry_preference
        .iter()
        .filter(|ind| theirs.contains(ind.as_str()) && seen.insert(ind.as_str()))
        .cloned()
        .collect()
}

/// Compare two investors over the same deal snapshot.
///
/// Both sides are recomputed from `index` so the juxtaposition is
/// consistent; `investment_styles` is keyed by display name.
pub fn compare(a: &SharkRecord, b: &SharkRecord, index: &DealIndex) -> ComparisonResult {
    let mut investment_styles = BTreeMap::new();
    investment_styles.insert(a.name.clone(), a.investment_style.clone());
    investment_styles.insert(b.name.clone(), b.investment_style.clone());

    ComparisonResult {
        shark_a: InvestorSummary {
            id: a.id.clone(),
            name: a.name.clone(),
            stats: investor_statistics(a, index),
        },
        shark_b: InvestorSummary {
            id: b.id.clone(),
            name: b.name.clone(),
            stats: investor_statistics(b, index),
        },
        common_industries: common_industries(a, b),
        investment_styles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::repository::DealRecord;
    use std::collections::HashSet;

    fn shark(name: &str, prefs: &[&str], styles: &[&str]) -> SharkRecord {
        SharkRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            title: String::new(),
            company: String::new(),
            total_deals: 0,
            total_investment: 0.0,
            average_equity: 0.0,
            successful_exits: 0,
            industry_preference: prefs.iter().map(|s| s.to_string()).collect(),
            investment_style: styles.iter().map(|s| s.to_string()).collect(),
            season_appearances: vec![],
        }
    }

    fn funded_deal(amount: f64, sharks: &[&str]) -> DealRecord {
        DealRecord {
            id: None,
            season: 1,
            episode: 1,
            startup_name: "Acme".to_string(),
            industry: "Food".to_string(),
            ask_amount: amount,
            ask_equity: 10.0,
            valuation: amount * 10.0,
            deal_amount: amount,
            deal_equity: 10.0,
            deal_debt: 0.0,
            multiple_sharks: sharks.len() > 1,
            interested_sharks: vec![],
            invested_sharks: sharks.iter().map(|s| s.to_string()).collect(),
            success_status: "funded".to_string(),
        }
    }

    #[test]
    fn test_common_industries_preserves_first_order() {
        let a = shark("Alice", &["Tech", "Food", "Retail"], &[]);
        let b = shark("Bob", &["Retail", "Tech"], &[]);

        assert_eq!(common_industries(&a, &b), vec!["Tech", "Retail"]);
    }

    #[test]
    fn test_common_industries_symmetric_as_sets() {
        let a = shark("Alice", &["Tech", "Food"], &[]);
        let b = shark("Bob", &["Food", "Health", "Tech"], &[]);

        let ab: HashSet<String> = common_industries(&a, &b).into_iter().collect();
        let ba: HashSet<String> = common_industries(&b, &a).into_iter().collect();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_self_comparison_yields_full_preference_set() {
        let a = shark("Alice", &["Tech", "Food"], &["Aggressive"]);

        assert_eq!(common_industries(&a, &a), vec!["Tech", "Food"]);

        let deals = vec![funded_deal(100.0, &["Alice"])];
        let index = DealIndex::build(&deals);
        let result = compare(&a, &a, &index);
        assert_eq!(result.common_industries, vec!["Tech", "Food"]);
        assert_eq!(result.shark_a.stats, result.shark_b.stats);
    }

    #[test]
    fn test_styles_keyed_by_display_name() {
        let a = shark("Alice", &["Tech"], &["Aggressive", "Hands-on"]);
        let b = shark("Bob", &["Food"], &["Cautious"]);
        let deals = vec![funded_deal(100.0, &["Alice"]), funded_deal(50.0, &["Bob"])];
        let index = DealIndex::build(&deals);

        let result = compare(&a, &b, &index);
        assert_eq!(
            result.investment_styles.get("Alice"),
            Some(&vec!["Aggressive".to_string(), "Hands-on".to_string()])
        );
        assert_eq!(
            result.investment_styles.get("Bob"),
            Some(&vec!["Cautious".to_string()])
        );
        assert!(result.common_industries.is_empty());
        assert_eq!(result.shark_a.stats.total_investment, 100.0);
        assert_eq!(result.shark_b.stats.total_investment, 50.0);
    }
}
