use axum::{
    routing::{get, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod notify;

use crate::config::Config;
use crate::notify::Notifier;

/// Shared application state — cheap to clone (pool and client are handles).
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub notifier: Notifier,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,returns_service=debug".parse().unwrap()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Returns Service — Rust + Axum");

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established.");

    // Run pending migrations
    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations complete.");

    let state = AppState {
        db: pool,
        notifier: Notifier::new(config.notify_webhook_url.clone(), config.admin_email.clone()),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Customer returns ────────────────────────────────────────────────
        .route(
            "/api/returns",
            get(handlers::returns::list_my_returns).post(handlers::returns::submit_return),
        )

        // ── Admin review ────────────────────────────────────────────────────
        .route("/api/admin/returns", get(handlers::admin::list_all_returns))
        .route("/api/admin/returns/:id", get(handlers::admin::get_return))
        .route(
            "/api/admin/returns/:id/status",
            put(handlers::admin::update_return_status),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
