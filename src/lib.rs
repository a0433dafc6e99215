pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::config::RelayConfig;
use crate::infrastructure::bunny::CdnApi;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub cdn: Arc<dyn CdnApi>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/purge-full-cache",
            post(api::handlers::purge::purge_full_cache),
        )
        .route("/health", get(api::handlers::health::health_check))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not Found") })
        .with_state(state)
}
