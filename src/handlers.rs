use crate::cache::CacheEntry;
use crate::errors::AppError;
use crate::models::{CachedPayload, CampaignRow, FetchOutcome, KpiSnapshot};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let page = state.dashboard.render_page().await;
    Html(render_index(&page))
}

pub async fn get_kpis(
    State(state): State<AppState>,
) -> Result<Json<CachedPayload<KpiSnapshot>>, AppError> {
    to_payload(state.dashboard.kpi_snapshot().await)
}

pub async fn get_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CachedPayload<Vec<CampaignRow>>>, AppError> {
    to_payload(state.dashboard.campaign_table().await)
}

pub async fn healthz() -> &'static str {
    "ok"
}

fn to_payload<T>(entry: CacheEntry<FetchOutcome<T>>) -> Result<Json<CachedPayload<T>>, AppError> {
    let data = entry.value?;
    Ok(Json(CachedPayload {
        fetched_at: entry.fetched_at,
        data,
    }))
}
