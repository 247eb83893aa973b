use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use cfl_ledger::{
    ChainValidator, ChainView, CumulativeSeries, LedgerReader, ProjectionBuilder, Record,
    ReplayEngine, ReplayResult, ValidationReport,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::calculator::{parse_integer, CalculatorForm, FootprintEstimate};
use crate::error::ServerResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub data: String,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Records newest first.
pub async fn chain_handler(State(state): State<AppState>) -> ServerResult<Json<ChainView>> {
    Ok(Json(ProjectionBuilder::chain_view(state.ledger.as_ref())?))
}

/// Parse the submitted value and append it as one atomic transaction.
pub async fn transaction_handler(
    State(state): State<AppState>,
    request: Result<Json<TransactionRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Record>)> {
    let Json(request) = request?;
    let value = parse_integer("data", &request.data)?;
    let record = state.ledger.submit(value)?;
    tracing::info!(index = record.index(), value, "transaction recorded");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn series_handler(State(state): State<AppState>) -> ServerResult<Json<CumulativeSeries>> {
    let measurements = state.ledger.read_measurements()?;
    Ok(Json(CumulativeSeries::from_measurements(
        &measurements,
        state.threshold,
    )))
}

pub async fn verify_handler(State(state): State<AppState>) -> ServerResult<Json<ValidationReport>> {
    Ok(Json(ChainValidator::validate(state.ledger.as_ref())?))
}

pub async fn replay_handler(State(state): State<AppState>) -> ServerResult<Json<ReplayResult>> {
    Ok(Json(ReplayEngine::replay(state.ledger.as_ref())?))
}

pub async fn calculator_handler(
    form: Result<Json<CalculatorForm>, JsonRejection>,
) -> ServerResult<Json<FootprintEstimate>> {
    let Json(form) = form?;
    Ok(Json(FootprintEstimate::from(form.parse()?)))
}

pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
