use crate::models::{CampaignRow, KpiSnapshot};
use std::cmp::Ordering;

pub const ROI_ACCURACY_DELTA: &str = "25% vs previous model";

#[derive(Debug, Clone, PartialEq)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
    pub delta: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Currency,
    Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: &'static str,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub display: String,
    /// Raw value used for client-side sorting.
    pub sort_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CampaignSection {
    NoData,
    Visuals {
        bar: BarChart,
        pie: PieChart,
        table: CampaignTable,
    },
}

pub fn render_kpis(snapshot: &KpiSnapshot) -> [KpiTile; 4] {
    [
        KpiTile {
            label: "Daily Impressions",
            value: format_thousands(snapshot.daily_impressions),
            delta: None,
        },
        KpiTile {
            label: "Avg. CPA",
            value: format_currency(snapshot.avg_cpa),
            delta: Some(format_percent(snapshot.cpa_change)),
        },
        KpiTile {
            label: "ROI Accuracy",
            value: format_percent(snapshot.roi_accuracy),
            delta: Some(ROI_ACCURACY_DELTA.to_string()),
        },
        KpiTile {
            label: "Anonymized Users",
            value: format_thousands(snapshot.hashed_users),
            delta: None,
        },
    ]
}

pub fn render_campaigns(rows: &[CampaignRow]) -> CampaignSection {
    if rows.is_empty() {
        return CampaignSection::NoData;
    }

    CampaignSection::Visuals {
        bar: roi_bar_chart(rows),
        pie: cpa_pie_chart(rows),
        table: campaign_table(rows),
    }
}

fn roi_bar_chart(rows: &[CampaignRow]) -> BarChart {
    BarChart {
        title: "ROI by Attribution Model",
        categories: rows.iter().map(|row| row.campaign_id.to_string()).collect(),
        series: vec![
            BarSeries {
                name: "time_decay_roi",
                values: rows.iter().map(|row| row.time_decay_roi).collect(),
            },
            BarSeries {
                name: "last_touch_roi",
                values: rows.iter().map(|row| row.last_touch_roi).collect(),
            },
        ],
    }
}

fn cpa_pie_chart(rows: &[CampaignRow]) -> PieChart {
    let total: f64 = rows
        .iter()
        .map(|row| row.cpa)
        .filter(|cpa| cpa.is_finite() && *cpa > 0.0)
        .sum();

    let slices = rows
        .iter()
        .map(|row| {
            let share = if total > 0.0 && row.cpa.is_finite() && row.cpa > 0.0 {
                row.cpa / total
            } else {
                0.0
            };
            PieSlice {
                label: row.campaign_id.to_string(),
                value: row.cpa,
                share,
            }
        })
        .collect();

    PieChart {
        title: "Cost Per Acquisition Distribution",
        slices,
    }
}

fn campaign_table(rows: &[CampaignRow]) -> CampaignTable {
    let columns = vec![
        Column { label: "Campaign ID", kind: ColumnKind::Text },
        Column { label: "Impressions", kind: ColumnKind::Integer },
        Column { label: "CPA", kind: ColumnKind::Currency },
        Column { label: "Time-Decay ROI", kind: ColumnKind::Decimal },
        Column { label: "Last-Touch ROI", kind: ColumnKind::Decimal },
    ];

    let rows = sort_by_time_decay_roi(rows)
        .into_iter()
        .map(|row| {
            vec![
                text_cell(row.campaign_id.to_string()),
                TableCell {
                    display: row.impressions.to_string(),
                    sort_key: row.impressions.to_string(),
                },
                TableCell {
                    display: format_currency(row.cpa),
                    sort_key: row.cpa.to_string(),
                },
                decimal_cell(row.time_decay_roi),
                decimal_cell(row.last_touch_roi),
            ]
        })
        .collect();

    CampaignTable { columns, rows }
}

/// Descending by time-decay ROI; equal keys keep payload order, NaN sorts last.
pub fn sort_by_time_decay_roi(rows: &[CampaignRow]) -> Vec<&CampaignRow> {
    let mut sorted: Vec<&CampaignRow> = rows.iter().collect();
    sorted.sort_by(|a, b| match (a.time_decay_roi.is_nan(), b.time_decay_roi.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b
            .time_decay_roi
            .partial_cmp(&a.time_decay_roi)
            .unwrap_or(Ordering::Equal),
    });
    sorted
}

fn text_cell(value: String) -> TableCell {
    TableCell {
        display: value.clone(),
        sort_key: value,
    }
}

fn decimal_cell(value: f64) -> TableCell {
    TableCell {
        display: format_decimal(value),
        sort_key: value.to_string(),
    }
}

pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${value:.2}")
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn format_decimal(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0');
    match text.strip_suffix('.') {
        Some(whole) => format!("{whole}.0"),
        None => text.to_string(),
    }
}
