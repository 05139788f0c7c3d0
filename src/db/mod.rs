use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::*;

const RETURN_COLUMNS: &str = "id, customer_id, order_id, name, products, purchase_date, \
                              store_name, email, phone, status, created_at";

pub async fn insert_return(
    pool: &PgPool,
    customer_id: Uuid,
    payload: &SubmitReturn,
    purchase_date: chrono::NaiveDate,
) -> AppResult<ReturnRequest> {
    let record = sqlx::query_as::<_, ReturnRequest>(&format!(
        r#"
        INSERT INTO returns (customer_id, order_id, name, products, purchase_date,
                             store_name, email, phone, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
        RETURNING {RETURN_COLUMNS}
        "#
    ))
    .bind(customer_id)
    .bind(&payload.order_id)
    .bind(&payload.name)
    .bind(&payload.products)
    .bind(purchase_date)
    .bind(&payload.store_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// All returns owned by one customer, in creation order.
pub async fn fetch_returns_by_customer(
    pool: &PgPool,
    customer_id: Uuid,
) -> AppResult<Vec<ReturnRequest>> {
    let records = sqlx::query_as::<_, ReturnRequest>(&format!(
        "SELECT {RETURN_COLUMNS} FROM returns WHERE customer_id = $1 ORDER BY created_at ASC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Every return in the store, for admin consumption.
pub async fn fetch_all_returns(pool: &PgPool) -> AppResult<Vec<ReturnRequest>> {
    let records = sqlx::query_as::<_, ReturnRequest>(&format!(
        "SELECT {RETURN_COLUMNS} FROM returns ORDER BY created_at ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn fetch_return_by_id(pool: &PgPool, id: Uuid) -> AppResult<ReturnRequest> {
    sqlx::query_as::<_, ReturnRequest>(&format!(
        "SELECT {RETURN_COLUMNS} FROM returns WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Return {} not found", id)))
}

/// Overwrites `status`, the only mutable column. The RETURNING clause
/// doubles as the existence check: an unknown id yields NotFound instead
/// of a blind no-op write.
pub async fn update_return_status(
    pool: &PgPool,
    id: Uuid,
    status: ReturnStatus,
) -> AppResult<ReturnRequest> {
    sqlx::query_as::<_, ReturnRequest>(&format!(
        "UPDATE returns SET status = $1 WHERE id = $2 RETURNING {RETURN_COLUMNS}"
    ))
    .bind(status)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Return {} not found", id)))
}

pub async fn count_returns(pool: &PgPool) -> AppResult<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM returns")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
