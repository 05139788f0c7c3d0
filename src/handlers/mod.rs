pub mod admin;
pub mod returns;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::{db, error::AppResult, AppState};

pub async fn health(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let total = db::count_returns(&state.db).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "returns-service",
            "returns": total,
            "notifier_enabled": state.notifier.is_enabled(),
        })),
    ))
}
