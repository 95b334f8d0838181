//! Bulk data import — one-time ETL feeding the store
//!
//! Deals come from a CSV export of the dataset spreadsheet (shark name
//! cells comma-joined, as in the source sheet); the shark roster is a JSON
//! array of roster entries.

use anyhow::Context;
use persistence::repository::{split_names, DealRecord, DealRepository, SharkRecord, SharkRepository};
use persistence::SqlitePool;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// One spreadsheet row. Numeric cells may be blank (the unfunded-pitch
/// columns usually are); blank or missing cells default to 0. The Option
/// wrappers are what make that work: csv hands an empty cell to serde as
/// `None`, whereas a bare `f64` field would fail to parse and drop the row.
#[derive(Debug, Deserialize)]
struct DealCsvRow {
    season: i64,
    episode: i64,
    #[serde(default)]
    startup_name: String,
    #[serde(default)]
    industry: String,
    #[serde(default)]
    ask_amount: Option<f64>,
    #[serde(default)]
    ask_equity: Option<f64>,
    #[serde(default)]
    valuation: Option<f64>,
    #[serde(default)]
    deal_amount: Option<f64>,
    #[serde(default)]
    deal_equity: Option<f64>,
    #[serde(default)]
    deal_debt: Option<f64>,
    #[serde(default)]
    multiple_sharks: Option<bool>,
    #[serde(default)]
    interested_sharks: String,
    #[serde(default)]
    invested_sharks: String,
    #[serde(default)]
    success_status: String,
}

impl From<DealCsvRow> for DealRecord {
    fn from(row: DealCsvRow) -> Self {
        Self {
            id: None,
            season: row.season,
            episode: row.episode,
            startup_name: row.startup_name,
            industry: row.industry,
            ask_amount: row.ask_amount.unwrap_or_default(),
            ask_equity: row.ask_equity.unwrap_or_default(),
            valuation: row.valuation.unwrap_or_default(),
            deal_amount: row.deal_amount.unwrap_or_default(),
            deal_equity: row.deal_equity.unwrap_or_default(),
            deal_debt: row.deal_debt.unwrap_or_default(),
            multiple_sharks: row.multiple_sharks.unwrap_or_default(),
            interested_sharks: split_names(&row.interested_sharks),
            invested_sharks: split_names(&row.invested_sharks),
            success_status: row.success_status,
        }
    }
}

/// Import deals from a CSV file; returns the number of rows inserted.
/// Rows that fail to parse are logged and skipped rather than aborting the
/// whole import.
pub async fn import_deals_csv(pool: &SqlitePool, path: &Path) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open deals CSV: {}", path.display()))?;
    let repo = DealRepository::new(pool);

    let mut inserted = 0usize;
    for (line, result) in reader.deserialize::<DealCsvRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line = line + 2, "skipping malformed deal row: {e}");
                continue;
            }
        };
        repo.insert(&DealRecord::from(row)).await?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Seed the shark roster from a JSON array; returns the number of entries.
/// Existing ids are replaced (the roster is static per dataset).
pub async fn seed_sharks_json(pool: &SqlitePool, path: &Path) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shark roster: {}", path.display()))?;
    let roster: Vec<SharkRecord> =
        serde_json::from_str(&raw).context("shark roster is not a JSON array of sharks")?;

    let repo = SharkRepository::new(pool);
    for shark in &roster {
        repo.upsert(shark).await?;
    }

    Ok(roster.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::repository::DealFilter;
    use persistence::Database;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_import_deals_csv() {
        let csv = "\
season,episode,startup_name,industry,ask_amount,ask_equity,valuation,deal_amount,deal_equity,deal_debt,multiple_sharks,interested_sharks,invested_sharks,success_status
1,1,Acme,Food,100000,10,1000000,100000,10,0,true,\"Alice,Bob\",\"Alice,Bob\",funded
1,2,Widgets,Tech,50000,5,1000000,0,0,0,false,Alice,,not funded
";
        let path = temp_file("deals.csv", csv);

        let db = Database::in_memory().await.unwrap();
        let count = import_deals_csv(db.pool(), &path).await.unwrap();
        assert_eq!(count, 2);

        let repo = DealRepository::new(db.pool());
        let deals = repo.get_filtered(&DealFilter::default()).await.unwrap();
        assert_eq!(deals[0].invested_sharks, vec!["Alice", "Bob"]);
        assert!(deals[1].invested_sharks.is_empty());
        assert_eq!(deals[1].success_status, "not funded");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_import_keeps_rows_with_blank_numeric_cells() {
        // Unfunded pitches arrive with the deal columns left blank; they
        // must import as zeros, not be dropped (dropping them would inflate
        // every success rate downstream).
        let csv = "\
season,episode,startup_name,industry,ask_amount,ask_equity,valuation,deal_amount,deal_equity,deal_debt,multiple_sharks,interested_sharks,invested_sharks,success_status
1,1,Acme,Food,100000,10,1000000,100000,10,0,false,Alice,Alice,funded
1,2,Widgets,Tech,50000,5,,,,,,,,not funded
";
        let path = temp_file("blank-cells.csv", csv);

        let db = Database::in_memory().await.unwrap();
        let count = import_deals_csv(db.pool(), &path).await.unwrap();
        assert_eq!(count, 2);

        let repo = DealRepository::new(db.pool());
        let deals = repo.get_filtered(&DealFilter::default()).await.unwrap();
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[1].valuation, 0.0);
        assert_eq!(deals[1].deal_amount, 0.0);
        assert_eq!(deals[1].deal_debt, 0.0);
        assert!(!deals[1].multiple_sharks);
        assert_eq!(deals[1].success_status, "not funded");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_seed_sharks_json_minimal_entries() {
        // Roster entries may omit the cached lifetime stats
        let json = r#"[
            {"id": "alice", "name": "Alice", "industry_preference": ["Food"], "season_appearances": [1, 2]},
            {"id": "bob", "name": "Bob", "investment_style": ["Cautious"]}
        ]"#;
        let path = temp_file("sharks.json", json);

        let db = Database::in_memory().await.unwrap();
        let count = seed_sharks_json(db.pool(), &path).await.unwrap();
        assert_eq!(count, 2);

        let repo = SharkRepository::new(db.pool());
        let alice = repo.get_by_id("alice").await.unwrap().unwrap();
        assert_eq!(alice.industry_preference, vec!["Food"]);
        assert_eq!(alice.total_deals, 0);

        std::fs::remove_file(path).ok();
    }
}
