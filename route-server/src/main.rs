use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use route_server::backend::{Aggregator, build_backends};
use route_server::cache::CacheConfig;
use route_server::config::ServerConfig;
use route_server::history::HistoryStore;
use route_server::planner::{PlannerConfig, RankWeights};
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let (geo, directions) = match build_backends(&config.backend, &CacheConfig::default()) {
        Ok(backends) => backends,
        Err(e) => {
            error!(error = %e, "Failed to set up routing backend");
            return ExitCode::FAILURE;
        }
    };
    info!(backend = geo.describe(), "Routing backend ready");

    let aggregator = Aggregator::new(geo, directions, PlannerConfig::default());
    let history = HistoryStore::new(&config.history_path);
    info!(path = %history.path().display(), "Recording history");

    let state = AppState::new(aggregator, history, RankWeights::default());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "Route planner listening");
    info!("  GET /health       - Health check");
    info!("  GET /api/plan     - Plan a trip (origin, destination, w_time, w_price, w_comfort)");
    info!("  GET /api/history  - Recent ranked results (limit)");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
