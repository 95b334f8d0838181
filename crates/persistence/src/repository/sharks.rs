//! Shark repository — the static investor roster

use crate::DbResult;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A recurring investor persona.
///
/// The lifetime stat columns (`total_deals`, `total_investment`, ...) are a
/// cache seeded with the roster; the analytics engine recomputes them from
/// the deal collection rather than trusting them as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharkRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub total_deals: i64,
    #[serde(default)]
    pub total_investment: f64,
    #[serde(default)]
    pub average_equity: f64,
    #[serde(default)]
    pub successful_exits: i64,
    #[serde(default)]
    pub industry_preference: Vec<String>,
    #[serde(default)]
    pub investment_style: Vec<String>,
    #[serde(default)]
    pub season_appearances: Vec<i64>,
}

/// Raw row as stored (list columns are JSON arrays)
#[derive(Debug, FromRow)]
struct SharkRow {
    id: String,
    name: String,
    title: String,
    company: String,
    total_deals: i64,
    total_investment: f64,
    average_equity: f64,
    successful_exits: i64,
    industry_preference: String,
    investment_style: String,
    season_appearances: String,
}

impl From<SharkRow> for SharkRecord {
    fn from(row: SharkRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            title: row.title,
            company: row.company,
            total_deals: row.total_deals,
            total_investment: row.total_investment,
            average_equity: row.average_equity,
            successful_exits: row.successful_exits,
            industry_preference: serde_json::from_str(&row.industry_preference)
                .unwrap_or_default(),
            investment_style: serde_json::from_str(&row.investment_style).unwrap_or_default(),
            season_appearances: serde_json::from_str(&row.season_appearances).unwrap_or_default(),
        }
    }
}

const SHARK_COLUMNS: &str = r#"
    id, name, title, company,
    total_deals, total_investment, average_equity, successful_exits,
    industry_preference, investment_style, season_appearances
"#;

/// Repository for the shark roster
pub struct SharkRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SharkRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a roster entry (seed path)
    pub async fn upsert(&self, shark: &SharkRecord) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO sharks (
                id, name, title, company,
                total_deals, total_investment, average_equity, successful_exits,
                industry_preference, investment_style, season_appearances
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&shark.id)
        .bind(&shark.name)
        .bind(&shark.title)
        .bind(&shark.company)
        .bind(shark.total_deals)
        .bind(shark.total_investment)
        .bind(shark.average_equity)
        .bind(shark.successful_exits)
        .bind(serde_json::to_string(&shark.industry_preference).unwrap_or_default())
        .bind(serde_json::to_string(&shark.investment_style).unwrap_or_default())
        .bind(serde_json::to_string(&shark.season_appearances).unwrap_or_default())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Look up a shark by its stable string id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SharkRecord>> {
        let sql = format!("SELECT {SHARK_COLUMNS} FROM sharks WHERE id = ?");
        let row = sqlx::query_as::<_, SharkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(SharkRecord::from))
    }

    /// Full roster, ordered by name
    pub async fn get_all(&self) -> DbResult<Vec<SharkRecord>> {
        let sql = format!("SELECT {SHARK_COLUMNS} FROM sharks ORDER BY name");
        let rows = sqlx::query_as::<_, SharkRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(SharkRecord::from).collect())
    }
}
