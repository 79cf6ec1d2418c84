//! invest-advisor HTTP Server
//!
//! Axum-based JSON API over the recommendation engine. The presentation
//! layer posts questionnaire answers, an amount, a horizon and market flags
//! and gets back an allocation with its explanation.

mod config;
mod handlers;
mod state;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::handlers::{
    decision_network, evaluate_profile, health_check, list_instruments,
    list_market_conditions, questionnaire, recommend,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Knowledge base is built once and shared read-only
    let knowledge = config.load_knowledge()?;
    match &config.catalog_path {
        Some(path) => tracing::info!("✓ Loaded catalog from {}", path.display()),
        None => tracing::info!("✓ Using standard catalog"),
    }
    for instrument in knowledge.instruments() {
        tracing::info!(
            "  • {} (min {}y, {})",
            instrument.name,
            instrument.min_horizon_years,
            instrument.recommended_profile
        );
    }
    tracing::info!(
        "  Market conditions: {}",
        knowledge.conditions().collect::<Vec<_>>().join(", ")
    );

    let app = build_router(AppState::new(knowledge));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 invest-advisor server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  GET  /api/instruments        - Instrument catalog");
    tracing::info!("  GET  /api/market-conditions  - Market rule table");
    tracing::info!("  GET  /api/questionnaire      - Investor questions");
    tracing::info!("  GET  /api/network            - Decision network");
    tracing::info!("  POST /api/profile            - Evaluate risk profile");
    tracing::info!("  POST /api/recommend          - Allocation + explanation");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes, CORS and request tracing
fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & catalog
        .route("/health", get(health_check))
        .route("/api/instruments", get(list_instruments))
        .route("/api/market-conditions", get(list_market_conditions))
        .route("/api/questionnaire", get(questionnaire))
        .route("/api/network", get(decision_network))

        // Advisory
        .route("/api/profile", post(evaluate_profile))
        .route("/api/recommend", post(recommend))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
