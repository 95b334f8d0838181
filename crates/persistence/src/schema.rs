//! Database schema definitions

/// SQL to create all tables
/// NOTE: Shark name lists on deals are stored comma-joined (matching the
/// spreadsheet export cells); list columns on sharks are JSON arrays.
pub const CREATE_TABLES: &str = r#"
-- Televised pitch outcomes
CREATE TABLE IF NOT EXISTS deals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    season INTEGER NOT NULL,
    episode INTEGER NOT NULL,
    startup_name TEXT NOT NULL DEFAULT '',
    industry TEXT NOT NULL DEFAULT '',
    ask_amount REAL NOT NULL DEFAULT 0,
    ask_equity REAL NOT NULL DEFAULT 0,
    valuation REAL NOT NULL DEFAULT 0,
    deal_amount REAL NOT NULL DEFAULT 0,
    deal_equity REAL NOT NULL DEFAULT 0,
    deal_debt REAL NOT NULL DEFAULT 0,
    multiple_sharks INTEGER NOT NULL DEFAULT 0,
    interested_sharks TEXT NOT NULL DEFAULT '',
    invested_sharks TEXT NOT NULL DEFAULT '',
    success_status TEXT NOT NULL DEFAULT ''
);

-- Recurring investor roster (seeded once per dataset)
CREATE TABLE IF NOT EXISTS sharks (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    title TEXT NOT NULL DEFAULT '',
    company TEXT NOT NULL DEFAULT '',
    total_deals INTEGER NOT NULL DEFAULT 0,
    total_investment REAL NOT NULL DEFAULT 0,
    average_equity REAL NOT NULL DEFAULT 0,
    successful_exits INTEGER NOT NULL DEFAULT 0,
    industry_preference TEXT NOT NULL DEFAULT '[]',
    investment_style TEXT NOT NULL DEFAULT '[]',
    season_appearances TEXT NOT NULL DEFAULT '[]'
);

-- ========== INDEXES ==========

CREATE INDEX IF NOT EXISTS idx_deals_season ON deals(season);
CREATE INDEX IF NOT EXISTS idx_deals_industry ON deals(industry);
CREATE INDEX IF NOT EXISTS idx_deals_status ON deals(success_status);
CREATE INDEX IF NOT EXISTS idx_sharks_name ON sharks(name)
"#;

/// Additive ALTER TABLE migrations for databases created before the column
/// existed (tolerate "duplicate column name" on reruns)
pub const MIGRATIONS: &[&str] = &[
    "ALTER TABLE deals ADD COLUMN deal_debt REAL NOT NULL DEFAULT 0",
    "ALTER TABLE sharks ADD COLUMN successful_exits INTEGER NOT NULL DEFAULT 0",
];
