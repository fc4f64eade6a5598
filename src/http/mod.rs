mod errors;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::engine::ForecastEngine;
use crate::storage::Storage;

pub use errors::ApiError;

pub const USER_HEADER: &str = "x-user-id";
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub engine: Arc<ForecastEngine>
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, engine: Arc<ForecastEngine>) -> Self {
        Self { storage, engine }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .route("/dashboard", get(handlers::dashboard))
        .route("/reports", get(handlers::reports))
        .route("/account", delete(handlers::delete_account))
        .route("/categories", get(handlers::list_categories).post(handlers::create_category))
        .route("/categories/:id", get(handlers::get_category).put(handlers::update_category).delete(handlers::delete_category))
        .route("/incomes", get(handlers::list_incomes).post(handlers::create_income))
        .route("/incomes/:id", get(handlers::get_income).put(handlers::update_income).delete(handlers::delete_income))
        .route("/expenses", get(handlers::list_expenses).post(handlers::create_expense))
        .route("/expenses/:id", get(handlers::get_expense).put(handlers::update_expense).delete(handlers::delete_expense))
        .route("/forecast", get(handlers::forecast))
        .route("/forecast/download", get(handlers::download_forecast))
        .with_state(state)
}

/// Serves the router on `bind` until Ctrl-C is received.
pub async fn run_server(state: AppState, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind).await?;

    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {error}");
        std::future::pending::<()>().await;
    }
}
