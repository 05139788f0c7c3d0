use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AdminIdentity,
    db,
    error::{AppError, AppResult},
    models::{ReturnStatus, UpdateReturnStatus},
    AppState,
};

// ── GET /api/admin/returns ────────────────────────────────────────────────────

pub async fn list_all_returns(
    State(state): State<AppState>,
    _admin: AdminIdentity,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let returns = db::fetch_all_returns(&state.db).await?;
    let elapsed = start.elapsed();

    info!(count = returns.len(), "Listed all returns");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": returns,
            "count": returns.len(),
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── GET /api/admin/returns/:id ────────────────────────────────────────────────

pub async fn get_return(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let record = db::fetch_return_by_id(&state.db, id).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "data": record })),
    ))
}

// ── PUT /api/admin/returns/:id/status ─────────────────────────────────────────

pub async fn update_return_status(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReturnStatus>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    // Reject out-of-enum values before touching the store.
    let status: ReturnStatus = payload
        .status
        .parse()
        .map_err(AppError::Validation)?;

    let db_start = Instant::now();
    let record = db::update_return_status(&state.db, id, status).await?;
    let db_elapsed = db_start.elapsed();

    info!(id = %id, status = %status, "Updated return status");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": record,
            "db_time_ms": db_elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}
