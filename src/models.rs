use crate::errors::FetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Aggregate attribution metrics. Missing, null or non-numeric keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiSnapshot {
    #[serde(deserialize_with = "count_or_zero")]
    pub daily_impressions: i64,
    #[serde(deserialize_with = "number_or_zero")]
    pub avg_cpa: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub cpa_change: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub roi_accuracy: f64,
    #[serde(deserialize_with = "count_or_zero")]
    pub hashed_users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CampaignId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignId::Text(text) => f.write_str(text),
            CampaignId::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Every field must be present; a present but null or non-numeric value reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRow {
    pub campaign_id: CampaignId,
    #[serde(deserialize_with = "count_or_zero")]
    pub impressions: i64,
    #[serde(deserialize_with = "number_or_zero")]
    pub cpa: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub time_decay_roi: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub last_touch_roi: f64,
}

/// Integer counts; pandas-style float counts such as `12000.0` are rounded.
fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|number| number.is_finite())
                .map(|number| number.round() as i64)
        })
        .unwrap_or(0))
}

fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

pub type FetchOutcome<T> = Result<T, FetchError>;

#[derive(Debug, Serialize)]
pub struct CachedPayload<T> {
    pub fetched_at: DateTime<Utc>,
    pub data: T,
}
