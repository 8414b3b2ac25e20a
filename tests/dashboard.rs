mod common;

use attribution_dashboard::dashboard::{NoticeLevel, PageView, WAITING_NOTICE};
use attribution_dashboard::presenter::CampaignSection;
use attribution_dashboard::{BackendClient, Dashboard};
use axum::http::StatusCode;
use common::{FakeBackend, Reply, scenario_campaigns, scenario_kpis, unreachable_base_url};
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(3600);

fn dashboard(base_url: &str, ttl: Duration) -> Dashboard {
    Dashboard::new(BackendClient::new(base_url).unwrap(), ttl)
}

fn tile_values(page: &PageView) -> Vec<String> {
    page.kpis
        .as_ref()
        .expect("kpis rendered")
        .iter()
        .map(|tile| tile.value.clone())
        .collect()
}

#[tokio::test]
async fn kpis_with_empty_campaigns_show_no_data() {
    let backend = FakeBackend::spawn(
        Reply::ok(scenario_kpis()),
        Reply::ok(serde_json::json!([])),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert_eq!(tile_values(&page), vec!["12,000", "$4.50", "91.20%", "8,000"]);
    let tiles = page.kpis.as_ref().unwrap();
    assert_eq!(tiles[1].delta.as_deref(), Some("-2.10%"));
    assert_eq!(page.campaigns, Some(CampaignSection::NoData));
    assert!(page.notices.is_empty());
}

#[tokio::test]
async fn unreachable_backend_shows_waiting_notice_only() {
    let page = dashboard(&unreachable_base_url(), HOUR).render_page().await;

    assert!(page.kpis.is_none());
    assert!(page.campaigns.is_none());
    assert!(page.notices[0].message.starts_with("Error fetching data:"));
    assert_eq!(page.notices[0].level, NoticeLevel::Error);
    let last = page.notices.last().unwrap();
    assert_eq!(last.message, WAITING_NOTICE);
    assert_eq!(last.level, NoticeLevel::Warning);
}

#[tokio::test]
async fn kpi_error_status_skips_campaign_fetch() {
    let backend = FakeBackend::spawn(
        Reply::status(StatusCode::SERVICE_UNAVAILABLE),
        Reply::ok(scenario_campaigns()),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert!(page.kpis.is_none());
    assert!(page.notices[0].message.contains("HTTP 503"));
    assert_eq!(backend.kpi_hits(), 1);
    assert_eq!(backend.campaign_hits(), 0);
}

#[tokio::test]
async fn campaign_table_sorted_by_time_decay_roi() {
    let backend = FakeBackend::spawn(
        Reply::ok(scenario_kpis()),
        Reply::ok(scenario_campaigns()),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    let Some(CampaignSection::Visuals { bar, table, .. }) = page.campaigns else {
        panic!("expected campaign visuals");
    };
    let order: Vec<&str> = table.rows.iter().map(|row| row[0].display.as_str()).collect();
    assert_eq!(order, vec!["B", "A"]);
    assert_eq!(bar.categories, vec!["A", "B"]);
    assert_eq!(bar.series.len(), 2);
}

#[tokio::test]
async fn malformed_campaign_payload_reports_and_shows_no_data() {
    let backend = FakeBackend::spawn(
        Reply::ok(scenario_kpis()),
        Reply::ok(serde_json::json!({"campaigns": "not a list"})),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert!(page.kpis.is_some());
    assert_eq!(page.campaigns, Some(CampaignSection::NoData));
    assert_eq!(page.notices.len(), 1);
    assert!(page.notices[0].message.starts_with("Error loading campaign data:"));
}

#[tokio::test]
async fn partial_kpi_payload_renders_zeros() {
    let backend = FakeBackend::spawn(
        Reply::ok(serde_json::json!({"daily_impressions": 1500})),
        Reply::ok(serde_json::json!([])),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert_eq!(tile_values(&page), vec!["1,500", "$0.00", "0.00%", "0"]);
}

#[tokio::test]
async fn renders_within_ttl_hit_backend_once() {
    let backend = FakeBackend::spawn(
        Reply::ok(scenario_kpis()),
        Reply::ok(scenario_campaigns()),
    )
    .await;
    let dashboard = dashboard(&backend.base_url, HOUR);

    let first = dashboard.render_page().await;
    let second = dashboard.render_page().await;

    assert_eq!(first, second);
    assert_eq!(backend.kpi_hits(), 1);
    assert_eq!(backend.campaign_hits(), 1);
}

#[tokio::test]
async fn expired_entries_refetch_once_per_render() {
    let backend = FakeBackend::spawn(
        Reply::ok(scenario_kpis()),
        Reply::ok(scenario_campaigns()),
    )
    .await;
    let dashboard = dashboard(&backend.base_url, Duration::from_millis(500));

    dashboard.render_page().await;
    dashboard.render_page().await;
    assert_eq!(backend.kpi_hits(), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;
    dashboard.render_page().await;

    assert_eq!(backend.kpi_hits(), 2);
    assert_eq!(backend.campaign_hits(), 2);
}

#[tokio::test]
async fn float_counts_and_null_fields_still_render() {
    let backend = FakeBackend::spawn(
        Reply::ok(serde_json::json!({
            "daily_impressions": 12000.0,
            "avg_cpa": null,
            "cpa_change": -2.1,
            "roi_accuracy": 91.2,
            "hashed_users": 8000.0
        })),
        Reply::ok(serde_json::json!([
            {"campaign_id": "A", "impressions": 100.0, "cpa": 2.0, "time_decay_roi": 1.5, "last_touch_roi": null}
        ])),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert!(page.notices.is_empty(), "{:?}", page.notices);
    assert_eq!(tile_values(&page), vec!["12,000", "$0.00", "91.20%", "8,000"]);
    let Some(CampaignSection::Visuals { table, .. }) = page.campaigns else {
        panic!("expected campaign visuals");
    };
    assert_eq!(table.rows[0][1].display, "100");
}

#[tokio::test]
async fn non_object_kpi_body_is_unavailable() {
    let backend = FakeBackend::spawn(
        Reply::ok(serde_json::json!([1, 2, 3])),
        Reply::ok(serde_json::json!([])),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert!(page.kpis.is_none());
    assert!(page.notices[0].message.contains("expected a JSON object"));
    assert_eq!(backend.campaign_hits(), 0);
}

#[tokio::test]
async fn campaign_error_status_reports_and_shows_no_data() {
    let backend = FakeBackend::spawn(
        Reply::ok(scenario_kpis()),
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .await;

    let page = dashboard(&backend.base_url, HOUR).render_page().await;

    assert!(page.kpis.is_some());
    assert_eq!(page.campaigns, Some(CampaignSection::NoData));
    assert_eq!(page.notices.len(), 1);
    assert_eq!(page.notices[0].level, NoticeLevel::Error);
    assert!(page.notices[0].message.starts_with("Error loading campaign data:"));
    assert!(page.notices[0].message.contains("HTTP 500"));
}
