use crate::cache::{CacheEntry, ResultCache};
use crate::fetcher::BackendClient;
use crate::models::{CampaignRow, FetchOutcome, KpiSnapshot};
use crate::presenter::{render_campaigns, render_kpis, CampaignSection, KpiTile};
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const PAGE_TITLE: &str = "CTV Ad Attribution Dashboard";
pub const PAGE_SUBTITLE: &str = "Privacy-Safe Campaign Analytics";
pub const WAITING_NOTICE: &str = "Waiting for backend connection...";
pub const NO_CAMPAIGN_DATA_NOTICE: &str = "No campaign data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub notices: Vec<Notice>,
    /// `None` when the KPI fetch failed; the campaign section is skipped too.
    pub kpis: Option<[KpiTile; 4]>,
    pub campaigns: Option<CampaignSection>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct Dashboard {
    client: BackendClient,
    cache: ResultCache,
}

impl Dashboard {
    pub fn new(client: BackendClient, ttl: Duration) -> Self {
        Self {
            client,
            cache: ResultCache::new(ttl),
        }
    }

    pub async fn kpi_snapshot(&self) -> CacheEntry<FetchOutcome<KpiSnapshot>> {
        self.cache
            .kpis
            .get_or_fetch(|| self.client.fetch_kpi_snapshot())
            .await
    }

    pub async fn campaign_table(&self) -> CacheEntry<FetchOutcome<Vec<CampaignRow>>> {
        self.cache
            .campaigns
            .get_or_fetch(|| self.client.fetch_campaign_table())
            .await
    }

    pub async fn render_page(&self) -> PageView {
        let mut page = PageView {
            title: PAGE_TITLE,
            subtitle: PAGE_SUBTITLE,
            notices: Vec::new(),
            kpis: None,
            campaigns: None,
            fetched_at: None,
        };

        let kpis = self.kpi_snapshot().await;
        page.fetched_at = Some(kpis.fetched_at);
        let snapshot = match kpis.value {
            Ok(snapshot) => snapshot,
            Err(err) => {
                page.notices.push(Notice::error(format!("Error fetching data: {err}")));
                page.notices.push(Notice::warning(WAITING_NOTICE));
                return page;
            }
        };
        page.kpis = Some(render_kpis(&snapshot));

        let rows = match self.campaign_table().await.value {
            Ok(rows) => rows,
            Err(err) => {
                page.notices
                    .push(Notice::error(format!("Error loading campaign data: {err}")));
                Vec::new()
            }
        };
        page.campaigns = Some(render_campaigns(&rows));
        page
    }
}
