use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use crate::{
    auth::CustomerIdentity,
    db,
    error::{AppError, AppResult},
    models::SubmitReturn,
    AppState,
};

/// Flattens validator output into one message naming every offending field.
fn validation_error(errs: &validator::ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errs
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let detail = errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "invalid".to_string());
            format!("{}: {}", field, detail)
        })
        .collect();
    fields.sort();
    AppError::Validation(fields.join("; "))
}

// ── GET /api/returns ──────────────────────────────────────────────────────────

pub async fn list_my_returns(
    State(state): State<AppState>,
    customer: CustomerIdentity,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let start = Instant::now();
    let returns = db::fetch_returns_by_customer(&state.db, customer.0).await?;
    let elapsed = start.elapsed();

    info!(customer_id = %customer.0, count = returns.len(), "Listed customer returns");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "data": returns,
            "count": returns.len(),
            "query_time_ms": elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}

// ── POST /api/returns ─────────────────────────────────────────────────────────

pub async fn submit_return(
    State(state): State<AppState>,
    customer: CustomerIdentity,
    Json(payload): Json<SubmitReturn>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    // Server-side revalidation: nothing is written unless every field passes.
    let payload = payload.normalized();
    payload.validate().map_err(|e| validation_error(&e))?;
    let purchase_date = payload
        .parse_purchase_date()
        .map_err(AppError::Validation)?;

    let db_start = Instant::now();
    let record = db::insert_return(&state.db, customer.0, &payload, purchase_date).await?;
    let db_elapsed = db_start.elapsed();

    info!(
        id = %record.id,
        customer_id = %record.customer_id,
        order_id = %record.order_id,
        "Created return request"
    );

    // Fire-and-forget: the record already exists, delivery failure only
    // concerns the operator.
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        notifier
            .send(
                "New Return Request",
                "A new return request has been submitted.",
            )
            .await;
    });

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "data": record,
            "db_time_ms": db_elapsed.as_secs_f64() * 1000.0,
        })),
    ))
}
