#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: Value::Null,
        }
    }
}

struct BackendState {
    kpis: Reply,
    campaigns: Reply,
    kpi_hits: AtomicUsize,
    campaign_hits: AtomicUsize,
}

/// In-process stand-in for the attribution service.
pub struct FakeBackend {
    pub base_url: String,
    state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn spawn(kpis: Reply, campaigns: Reply) -> Self {
        let state = Arc::new(BackendState {
            kpis,
            campaigns,
            kpi_hits: AtomicUsize::new(0),
            campaign_hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/attribution-metrics", get(kpis_handler))
            .route("/api/campaign-performance", get(campaigns_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn kpi_hits(&self) -> usize {
        self.state.kpi_hits.load(Ordering::SeqCst)
    }

    pub fn campaign_hits(&self) -> usize {
        self.state.campaign_hits.load(Ordering::SeqCst)
    }
}

async fn kpis_handler(State(state): State<Arc<BackendState>>) -> (StatusCode, Json<Value>) {
    state.kpi_hits.fetch_add(1, Ordering::SeqCst);
    (state.kpis.status, Json(state.kpis.body.clone()))
}

async fn campaigns_handler(State(state): State<Arc<BackendState>>) -> (StatusCode, Json<Value>) {
    state.campaign_hits.fetch_add(1, Ordering::SeqCst);
    (state.campaigns.status, Json(state.campaigns.body.clone()))
}

pub fn pick_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Base URL on which nothing is listening.
pub fn unreachable_base_url() -> String {
    format!("http://127.0.0.1:{}/api", pick_free_port())
}

pub fn scenario_kpis() -> Value {
    serde_json::json!({
        "daily_impressions": 12000,
        "avg_cpa": 4.5,
        "cpa_change": -2.1,
        "roi_accuracy": 91.2,
        "hashed_users": 8000
    })
}

pub fn scenario_campaigns() -> Value {
    serde_json::json!([
        {"campaign_id": "A", "impressions": 100, "cpa": 2.0, "time_decay_roi": 1.5, "last_touch_roi": 1.2},
        {"campaign_id": "B", "impressions": 50, "cpa": 3.0, "time_decay_roi": 2.0, "last_touch_roi": 1.0}
    ])
}
