//! Shark-Analytics — analytics backend over the televised-deal dataset
//!
//! Usage:
//!   shark-analytics serve --port 8080            — Launch the API server
//!   shark-analytics import --deals data.csv      — Bulk-import the dataset
//!   shark-analytics stats                        — Print a dataset summary

mod import;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use engine::{
    compare, deal_statistics, investor_statistics, predict_by_industry, AnalyticsError, DealIndex,
};
use persistence::repository::{DealFilter, DealRepository, SharkRepository};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};

const APP_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

#[derive(Parser)]
#[command(name = "shark-analytics")]
#[command(about = "Analytics backend for the televised-deal dataset", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the analytics API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Bulk-import the dataset (deals CSV, optional shark roster JSON)
    Import {
        /// Path to the deals CSV export
        #[arg(long)]
        deals: PathBuf,
        /// Path to the shark roster JSON
        #[arg(long)]
        sharks: Option<PathBuf>,
    },
    /// Print a dataset summary to the terminal
    Stats,
}

#[derive(Clone)]
struct AppState {
    db: Arc<persistence::Database>,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug,engine=debug,shark_analytics=debug")
    } else {
        EnvFilter::new("info,engine=info,shark_analytics=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

fn db_path() -> String {
    std::env::var("SHARK_ANALYTICS_DB_PATH").unwrap_or_else(|_| "data/deals.db".to_string())
}

async fn open_database() -> anyhow::Result<persistence::Database> {
    let path = db_path();
    let db = persistence::Database::new(&path).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        anyhow::anyhow!("Database initialization failed: {}", e)
    })?;
    info!("Database initialized: {}", path);
    Ok(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(&host, port).await?;
        }
        Commands::Import { deals, sharks } => {
            cmd_import(&deals, sharks.as_deref()).await?;
        }
        Commands::Stats => {
            cmd_stats().await?;
        }
    }

    Ok(())
}

// ============================================================================
// Serve command — Axum web server
// ============================================================================

async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    info!("Shark-Analytics v{} starting...", APP_VERSION);

    let db = open_database().await?;
    let state = AppState { db: Arc::new(db) };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Determine static files directory (SPA frontend build)
    let exe_path = std::env::current_exe().unwrap_or_default();
    let exe_dir = exe_path.parent().unwrap_or(std::path::Path::new("."));
    let dist_dir = exe_dir.join("dist");
    let static_dir = if dist_dir.exists() {
        dist_dir
    } else {
        std::path::PathBuf::from("dist")
    };

    let api_routes = Router::new()
        .route("/health", get(api_health))
        .route("/deals", get(api_deals))
        .route("/deals/analytics", get(api_deal_analytics))
        .route("/analytics", get(api_deal_analytics))
        .route("/sharks", get(api_sharks))
        .route("/sharks/compare", get(api_compare))
        .route("/sharks/:id", get(api_shark_by_id))
        .route("/sharks/:id/analytics", get(api_shark_analytics))
        .route("/predictions", get(api_predictions))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&static_dir))
        .layer(cors);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    println!("\n=== Shark-Analytics v{} ===", APP_VERSION);
    println!("Deal Analytics Server");
    println!("Listening on http://{}", addr);
    println!("\nEndpoints:");
    println!("  GET  /api/health                 - Health check");
    println!("  GET  /api/deals                  - Deals (filters: season, industry, status)");
    println!("  GET  /api/analytics              - Deal statistics (same filters)");
    println!("  GET  /api/deals/analytics        - Alias of /api/analytics");
    println!("  GET  /api/sharks                 - Shark roster");
    println!("  GET  /api/sharks/:id             - Single shark");
    println!("  GET  /api/sharks/:id/analytics   - Per-shark statistics");
    println!("  GET  /api/sharks/compare         - Compare two sharks (shark1, shark2)");
    println!("  GET  /api/predictions            - Per-industry predictions (industry)");
    println!("\n  Database: {}", db_path());
    println!("\nPress Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Import command — bulk ETL
// ============================================================================

async fn cmd_import(deals: &std::path::Path, sharks: Option<&std::path::Path>) -> anyhow::Result<()> {
    println!("\n=== Shark-Analytics v{} ===", APP_VERSION);

    let db = open_database().await?;

    let inserted = import::import_deals_csv(db.pool(), deals).await?;
    println!("Imported {} deals from {}", inserted, deals.display());

    if let Some(roster) = sharks {
        let seeded = import::seed_sharks_json(db.pool(), roster).await?;
        println!("Seeded {} sharks from {}", seeded, roster.display());
    }

    let total = DealRepository::new(db.pool()).count().await?;
    println!("Database: {} ({} deals total)", db_path(), total);

    Ok(())
}

// ============================================================================
// Stats command — CLI dataset summary
// ============================================================================

async fn cmd_stats() -> anyhow::Result<()> {
    let db = open_database().await?;
    let deals = DealRepository::new(db.pool()).get_all().await?;
    let stats = deal_statistics(&deals);

    println!("\n=== Dataset Summary ===");
    println!("Total deals:      {}", stats.total_deals);
    println!("Total investment: {:.2}", stats.total_investment);
    println!("Avg valuation:    {:.2}", stats.avg_valuation);
    println!("Success rate:     {:.1}%", stats.success_rate);

    println!("\nBy industry:");
    println!(
        "  {:<24} {:>6} {:>14} {:>14}",
        "Industry", "Deals", "Invested", "Avg Valuation"
    );
    println!("  {}", "-".repeat(62));
    for entry in &stats.industry_breakdown {
        println!(
            "  {:<24} {:>6} {:>14.2} {:>14.2}",
            entry.industry, entry.count, entry.total_investment, entry.avg_valuation
        );
    }

    Ok(())
}

// ============================================================================
// API Handlers
// ============================================================================

type ApiError = (StatusCode, Json<Value>);

fn db_error(e: persistence::DbError) -> ApiError {
    error!("Database error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("database error: {e}") })),
    )
}

fn not_found(e: AnalyticsError) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": e.to_string() })),
    )
}

fn bad_request(msg: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
}

/// GET /api/health
async fn api_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "shark-analytics",
        "version": APP_VERSION,
    }))
}

/// GET /api/deals — filtered deal listing
async fn api_deals(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let filter = DealFilter::from_params(&params);
    let deals = DealRepository::new(state.db.pool())
        .get_filtered(&filter)
        .await
        .map_err(db_error)?;

    Ok(Json(json!({
        "total": deals.len(),
        "deals": deals,
    })))
}

/// GET /api/analytics (and /api/deals/analytics) — deal aggregator
async fn api_deal_analytics(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let filter = DealFilter::from_params(&params);
    let deals = DealRepository::new(state.db.pool())
        .get_filtered(&filter)
        .await
        .map_err(db_error)?;

    let stats = deal_statistics(&deals);
    let mut body = serde_json::to_value(&stats).unwrap_or_default();
    if let Some(obj) = body.as_object_mut() {
        obj.insert("generated_at".to_string(), json!(Utc::now().to_rfc3339()));
    }

    Ok(Json(body))
}

/// GET /api/sharks — full roster
async fn api_sharks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let sharks = SharkRepository::new(state.db.pool())
        .get_all()
        .await
        .map_err(db_error)?;

    Ok(Json(json!({
        "total": sharks.len(),
        "sharks": sharks,
    })))
}

/// GET /api/sharks/:id — single roster entry
async fn api_shark_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let shark = SharkRepository::new(state.db.pool())
        .get_by_id(&id)
        .await
        .map_err(db_error)?
        .ok_or(AnalyticsError::SharkNotFound(id))
        .map_err(not_found)?;

    Ok(Json(json!(shark)))
}

/// GET /api/sharks/:id/analytics — shark analyzer
async fn api_shark_analytics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let shark = SharkRepository::new(state.db.pool())
        .get_by_id(&id)
        .await
        .map_err(db_error)?
        .ok_or(AnalyticsError::SharkNotFound(id))
        .map_err(not_found)?;

    let deals = DealRepository::new(state.db.pool())
        .get_all()
        .await
        .map_err(db_error)?;
    let index = DealIndex::build(&deals);
    let stats = investor_statistics(&shark, &index);

    Ok(Json(json!({
        "id": shark.id,
        "name": shark.name,
        "stats": stats,
        "generated_at": Utc::now().to_rfc3339(),
    })))
}

/// Query params for the comparison endpoint
#[derive(Deserialize)]
struct CompareParams {
    shark1: Option<String>,
    shark2: Option<String>,
}

/// GET /api/sharks/compare?shark1=&shark2= — comparator
///
/// Resolves shark1 before shark2; the first unresolved id is the one
/// reported as 404.
async fn api_compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Value>, ApiError> {
    let id_a = params
        .shark1
        .ok_or_else(|| bad_request("missing query parameter: shark1"))?;
    let id_b = params
        .shark2
        .ok_or_else(|| bad_request("missing query parameter: shark2"))?;

    let repo = SharkRepository::new(state.db.pool());
    let shark_a = repo
        .get_by_id(&id_a)
        .await
        .map_err(db_error)?
        .ok_or(AnalyticsError::SharkNotFound(id_a))
        .map_err(not_found)?;
    let shark_b = repo
        .get_by_id(&id_b)
        .await
        .map_err(db_error)?
        .ok_or(AnalyticsError::SharkNotFound(id_b))
        .map_err(not_found)?;

    let deals = DealRepository::new(state.db.pool())
        .get_all()
        .await
        .map_err(db_error)?;
    let index = DealIndex::build(&deals);
    let result = compare(&shark_a, &shark_b, &index);

    Ok(Json(json!(result)))
}

/// GET /api/predictions?industry= — predictor
///
/// Without the `industry` param the full per-industry sequence is returned;
/// with it, the sequence is narrowed to the matching entry.
async fn api_predictions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let deals = DealRepository::new(state.db.pool())
        .get_all()
        .await
        .map_err(db_error)?;

    let mut predictions = predict_by_industry(&deals);
    if let Some(industry) = params.get("industry") {
        predictions.retain(|p| &p.industry == industry);
    }

    Ok(Json(json!({
        "total": predictions.len(),
        "predictions": predictions,
        "generated_at": Utc::now().to_rfc3339(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::repository::SharkRecord;

    async fn state_with_roster(entries: &[(&str, &str)]) -> AppState {
        let db = persistence::Database::in_memory().await.unwrap();
        let repo = SharkRepository::new(db.pool());
        for (id, name) in entries {
            repo.upsert(&SharkRecord {
                id: id.to_string(),
                name: name.to_string(),
                title: String::new(),
                company: String::new(),
                total_deals: 0,
                total_investment: 0.0,
                average_equity: 0.0,
                successful_exits: 0,
                industry_preference: vec![],
                investment_style: vec![],
                season_appearances: vec![],
            })
            .await
            .unwrap();
        }
        AppState { db: Arc::new(db) }
    }

    fn compare_params(shark1: Option<&str>, shark2: Option<&str>) -> CompareParams {
        CompareParams {
            shark1: shark1.map(str::to_string),
            shark2: shark2.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_compare_reports_first_unresolved_id() {
        let state = state_with_roster(&[("alice", "Alice")]).await;

        // Both ids unknown: shark1 is resolved first, so it is the one
        // named in the 404 body
        let (status, Json(body)) = api_compare(
            State(state.clone()),
            Query(compare_params(Some("ghost1"), Some("ghost2"))),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("ghost1"));

        // Known first id, unknown second: shark2 is the one reported
        let (status, Json(body)) = api_compare(
            State(state),
            Query(compare_params(Some("alice"), Some("ghost2"))),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("ghost2"));
    }

    #[tokio::test]
    async fn test_compare_missing_param_is_bad_request() {
        let state = state_with_roster(&[]).await;

        let (status, Json(body)) = api_compare(State(state), Query(compare_params(None, Some("x"))))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("shark1"));
    }
}
