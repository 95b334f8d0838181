//! Deal repository — filtered retrieval over the pitch-outcome collection

use crate::DbResult;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;

/// Success status value that counts a deal as closed
pub const STATUS_FUNDED: &str = "funded";

/// A single televised pitch outcome.
///
/// Shark name lists are parsed from the comma-joined TEXT columns; the
/// relation to the shark roster is by display name, not a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealRecord {
    pub id: Option<i64>,
    pub season: i64,
    pub episode: i64,
    pub startup_name: String,
    pub industry: String,
    pub ask_amount: f64,
    pub ask_equity: f64,
    pub valuation: f64,
    pub deal_amount: f64,
    pub deal_equity: f64,
    pub deal_debt: f64,
    pub multiple_sharks: bool,
    pub interested_sharks: Vec<String>,
    pub invested_sharks: Vec<String>,
    pub success_status: String,
}

impl DealRecord {
    pub fn is_funded(&self) -> bool {
        self.success_status == STATUS_FUNDED
    }
}

/// Raw row as stored (name lists comma-joined)
#[derive(Debug, FromRow)]
struct DealRow {
    id: i64,
    season: i64,
    episode: i64,
    startup_name: String,
    industry: String,
    ask_amount: f64,
    ask_equity: f64,
    valuation: f64,
    deal_amount: f64,
    deal_equity: f64,
    deal_debt: f64,
    multiple_sharks: bool,
    interested_sharks: String,
    invested_sharks: String,
    success_status: String,
}

impl From<DealRow> for DealRecord {
    fn from(row: DealRow) -> Self {
        Self {
            id: Some(row.id),
            season: row.season,
            episode: row.episode,
            startup_name: row.startup_name,
            industry: row.industry,
            ask_amount: row.ask_amount,
            ask_equity: row.ask_equity,
            valuation: row.valuation,
            deal_amount: row.deal_amount,
            deal_equity: row.deal_equity,
            deal_debt: row.deal_debt,
            multiple_sharks: row.multiple_sharks,
            interested_sharks: split_names(&row.interested_sharks),
            invested_sharks: split_names(&row.invested_sharks),
            success_status: row.success_status,
        }
    }
}

/// Split a comma-joined name list cell, dropping empty entries
pub fn split_names(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_names(names: &[String]) -> String {
    names.join(",")
}

/// Optional exact-match constraints for deal retrieval.
///
/// An absent field means no constraint on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFilter {
    pub season: Option<i64>,
    pub industry: Option<String>,
    pub status: Option<String>,
}

impl DealFilter {
    /// Build a filter from string-encoded query parameters.
    ///
    /// A `season` value that does not parse as an integer is silently
    /// dropped rather than failing the request.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            season: params.get("season").and_then(|s| s.parse().ok()),
            industry: params.get("industry").cloned(),
            status: params.get("status").cloned(),
        }
    }
}

const DEAL_COLUMNS: &str = r#"
    id, season, episode, startup_name, industry,
    ask_amount, ask_equity, valuation, deal_amount, deal_equity, deal_debt,
    multiple_sharks, interested_sharks, invested_sharks, success_status
"#;

/// Repository for the deal collection
pub struct DealRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DealRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a deal (import path); returns the assigned rowid
    pub async fn insert(&self, deal: &DealRecord) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO deals (
                season, episode, startup_name, industry,
                ask_amount, ask_equity, valuation, deal_amount, deal_equity, deal_debt,
                multiple_sharks, interested_sharks, invested_sharks, success_status
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(deal.season)
        .bind(deal.episode)
        .bind(&deal.startup_name)
        .bind(&deal.industry)
        .bind(deal.ask_amount)
        .bind(deal.ask_equity)
        .bind(deal.valuation)
        .bind(deal.deal_amount)
        .bind(deal.deal_equity)
        .bind(deal.deal_debt)
        .bind(deal.multiple_sharks)
        .bind(join_names(&deal.interested_sharks))
        .bind(join_names(&deal.invested_sharks))
        .bind(&deal.success_status)
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get deals matching the filter (empty filter returns the whole
    /// collection), ordered by season/episode for stable output
    pub async fn get_filtered(&self, filter: &DealFilter) -> DbResult<Vec<DealRecord>> {
        let mut sql = format!("SELECT {DEAL_COLUMNS} FROM deals WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(season) = filter.season {
            sql.push_str(" AND season = ?");
            binds.push(season.to_string());
        }
        if let Some(industry) = &filter.industry {
            sql.push_str(" AND industry = ?");
            binds.push(industry.clone());
        }
        if let Some(status) = &filter.status {
            sql.push_str(" AND success_status = ?");
            binds.push(status.clone());
        }

        sql.push_str(" ORDER BY season, episode, id");

        let mut query = sqlx::query_as::<_, DealRow>(&sql);
        for b in &binds {
            query = query.bind(b);
        }

        let rows = query.fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(DealRecord::from).collect())
    }

    /// Get the entire collection
    pub async fn get_all(&self) -> DbResult<Vec<DealRecord>> {
        self.get_filtered(&DealFilter::default()).await
    }

    /// Count all deals
    pub async fn count(&self) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM deals")
            .fetch_one(self.pool)
            .await?;

        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn deal(season: i64, industry: &str, amount: f64, status: &str, sharks: &[&str]) -> DealRecord {
        DealRecord {
            id: None,
            season,
            episode: 1,
            startup_name: "Acme".to_string(),
            industry: industry.to_string(),
            ask_amount: amount,
            ask_equity: 10.0,
            valuation: amount * 10.0,
            deal_amount: amount,
            deal_equity: 10.0,
            deal_debt: 0.0,
            multiple_sharks: sharks.len() > 1,
            interested_sharks: vec![],
            invested_sharks: sharks.iter().map(|s| s.to_string()).collect(),
            success_status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_filter_roundtrip() {
        let db = Database::in_memory().await.unwrap();
        let repo = DealRepository::new(db.pool());

        repo.insert(&deal(1, "Food", 100.0, "funded", &["Alice", "Bob"]))
            .await
            .unwrap();
        repo.insert(&deal(2, "Tech", 200.0, "not funded", &[]))
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].invested_sharks, vec!["Alice", "Bob"]);
        assert!(all[1].invested_sharks.is_empty());

        let food = repo
            .get_filtered(&DealFilter {
                industry: Some("Food".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].season, 1);

        let season2 = repo
            .get_filtered(&DealFilter {
                season: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(season2.len(), 1);
        assert_eq!(season2[0].industry, "Tech");

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[test]
    fn test_filter_from_params_drops_malformed_season() {
        let mut params = HashMap::new();
        params.insert("season".to_string(), "abc".to_string());
        params.insert("industry".to_string(), "Food".to_string());

        let filter = DealFilter::from_params(&params);
        assert_eq!(filter.season, None);
        assert_eq!(filter.industry.as_deref(), Some("Food"));
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_split_names_trims_and_drops_empties() {
        assert_eq!(split_names("Alice, Bob ,,"), vec!["Alice", "Bob"]);
        assert!(split_names("").is_empty());
    }
}
