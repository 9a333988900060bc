//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::history::RouteSink;
use crate::planner::{PlanError, RouteQuery};

use super::dto::*;
use super::state::AppState;

/// Default number of history records returned.
const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Upper bound on history records per request.
const MAX_HISTORY_LIMIT: usize = 500;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/plan", get(plan_trip))
        .route("/api/history", get(list_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build, rank and record routes between two places.
async fn plan_trip(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let weights = req
        .weights(state.weights)
        .map_err(|message| AppError::BadRequest { message })?;

    let query = RouteQuery::new(&req.origin, &req.destination)?;
    let plan = state.aggregator.plan(&query, weights).await?;

    info!(
        origin = query.origin(),
        destination = query.destination(),
        routes = plan.routes.len(),
        unavailable = plan.unavailable.len(),
        "Planned trip"
    );

    // History is best-effort; a failed write never fails the request
    let history = state.history.clone();
    let origin = query.origin().to_string();
    let destination = query.destination().to_string();
    let routes = plan.routes.clone();
    match tokio::task::spawn_blocking(move || history.record(&origin, &destination, &routes)).await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Failed to record history"),
        Err(e) => warn!(error = %e, "History task failed"),
    }

    Ok(Json(PlanResponse::from_plan(&plan, weights)))
}

/// List recent ranked results, newest first.
async fn list_history(
    State(state): State<AppState>,
    Query(req): Query<HistoryRequest>,
) -> Result<Json<HistoryResponse>, AppError> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);

    let history = state.history.clone();
    let records = tokio::task::spawn_blocking(move || history.load_recent(limit))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("History task failed: {e}"),
        })?
        .map_err(|e| AppError::Internal {
            message: e.to_string(),
        })?;

    Ok(Json(HistoryResponse { records }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidQuery(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::EndpointsUnresolved { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
