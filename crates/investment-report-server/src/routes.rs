use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use investment_report::report::ReportService;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::error::ApiResult;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportService>,
}

impl AppState {
    pub fn new(reports: ReportService) -> Self {
        Self {
            reports: Arc::new(reports),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/investments/report", get(investments_report))
        .route("/investments/{id}", get(investment_by_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Render the holdings report and start forwarding it to the export endpoint.
async fn investments_report(State(state): State<AppState>) -> ApiResult<Response> {
    let report = state.reports.run().await?;

    // Dropping the handle detaches the export; the response never waits on it.
    drop(report.export);

    Ok(([(header::CONTENT_TYPE, CSV_CONTENT_TYPE)], report.csv).into_response())
}

/// Relay a single investment from the investments service unchanged.
async fn investment_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let upstream = state
        .reports
        .investments()
        .fetch_investment_raw(&id)
        .await
        .inspect_err(|err| tracing::warn!(investment_id = %id, error = %err, "Investment lookup failed"))?;

    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, upstream.body).into_response();

    let content_type = upstream
        .content_type
        .and_then(|value| HeaderValue::from_str(&value).ok());
    match content_type {
        Some(value) => {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }

    Ok(response)
}
