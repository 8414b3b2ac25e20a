use crate::errors::FetchError;
use crate::models::{CampaignRow, KpiSnapshot};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

pub const KPI_PATH: &str = "attribution-metrics";
pub const CAMPAIGN_PATH: &str = "campaign-performance";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let client = Client::builder()
            .user_agent(concat!("attribution-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FetchError::from_reqwest(&base_url, err))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_kpi_snapshot(&self) -> Result<KpiSnapshot, FetchError> {
        let url = self.url(KPI_PATH);
        let body: Value = self.get_json(&url).await?;
        if !body.is_object() {
            return Err(decode_failure(&url, "expected a JSON object"));
        }
        serde_json::from_value(body).map_err(|err| decode_failure(&url, &err.to_string()))
    }

    pub async fn fetch_campaign_table(&self) -> Result<Vec<CampaignRow>, FetchError> {
        let url = self.url(CAMPAIGN_PATH);
        self.get_json(&url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        info!(%url, "fetching from backend");

        let result = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            response.json::<T>().await
        }
        .await;

        result.map_err(|err| {
            let err = FetchError::from_reqwest(url, err);
            warn!(%url, error = %err, "backend fetch failed");
            err
        })
    }
}

fn decode_failure(url: &str, detail: &str) -> FetchError {
    let err = FetchError::Decode {
        url: url.to_string(),
        detail: detail.to_string(),
    };
    warn!(%url, error = %err, "backend fetch failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised() {
        let client = BackendClient::with_client(Client::new(), "http://backend:8081/api/");
        assert_eq!(client.url(KPI_PATH), "http://backend:8081/api/attribution-metrics");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = BackendClient::new(format!("http://127.0.0.1:{port}/api")).unwrap();
        let err = client.fetch_kpi_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "{err:?}");
    }
}
