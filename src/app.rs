use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/kpis", get(handlers::get_kpis))
        .route("/api/campaigns", get(handlers::get_campaigns))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
