//! Backend Wire Types
//!
//! Shapes returned by the equipment analytics backend. Everything here is
//! produced by the backend and treated as an immutable value by the rest of
//! the client; normalization of tolerant wire shapes happens at the decode
//! boundary so no ambiguity leaks past this module.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// Aggregate snapshot of current equipment state.
///
/// Replaced atomically on each successful fetch; never partially mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    pub total_equipment: u64,

    #[serde(default)]
    pub avg_flowrate: Option<f64>,

    #[serde(default)]
    pub avg_pressure: Option<f64>,

    #[serde(default)]
    pub avg_temperature: Option<f64>,

    /// Backend-derived condition indicator; numeric or categorical.
    #[serde(default)]
    pub health_score: Option<HealthScore>,

    /// Detected anomalies, in backend order. The length of this sequence is
    /// the sole source of the dashboard's alert count.
    #[serde(default)]
    pub alerts: Vec<Alert>,

    /// Equipment-type label -> count
    #[serde(default)]
    pub type_distribution: HashMap<String, u64>,

    /// Severity tier (Good/Moderate/Critical) -> equipment count
    #[serde(default)]
    pub risk_buckets: HashMap<String, u64>,
}

/// Health score as sent on the wire: a number for current backends, a
/// categorical label for older ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HealthScore {
    Number(f64),
    Label(String),
}

/// One detected anomaly, tied to one equipment item and metric.
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub equipment: String,

    /// Equipment category
    #[serde(rename = "type", default)]
    pub equipment_type: String,

    pub metric: String,

    /// Free-text classification ("low", "high", "missing", ...)
    pub issue: String,

    #[serde(default)]
    pub value: Option<f64>,

    #[serde(default)]
    pub limit: Option<f64>,
}

/// Record of one past upload.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryItem {
    /// Absent for legacy records; see [`HistoryItem::key`].
    #[serde(default)]
    pub id: Option<i64>,

    pub filename: String,

    pub uploaded_at: DateTime<Utc>,
}

impl HistoryItem {
    /// Stable display key. Legacy records carry no id, so filename plus
    /// timestamp stands in as an ad hoc key.
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => format!("{}@{}", self.filename, self.uploaded_at.timestamp()),
        }
    }
}

/// Canonical form of the history endpoint response.
#[derive(Debug, Clone, Default)]
pub struct HistoryEnvelope {
    pub items: Vec<HistoryItem>,
    /// Categorical health-direction label; `None` when the backend sends a
    /// bare item list.
    pub trend: Option<String>,
}

/// The two wire shapes the history endpoint has historically used: a bare
/// ordered sequence, or an envelope with a trend label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum HistoryResponse {
    Envelope {
        history: Vec<HistoryItem>,
        #[serde(default)]
        trend: Option<String>,
    },
    Items(Vec<HistoryItem>),
}

impl From<HistoryResponse> for HistoryEnvelope {
    fn from(response: HistoryResponse) -> Self {
        match response {
            HistoryResponse::Envelope { history, trend } => Self {
                items: history,
                trend,
            },
            HistoryResponse::Items(items) => Self { items, trend: None },
        }
    }
}

/// Summary endpoint response. A backend with no uploaded dataset answers
/// HTTP 200 with a `{"message": ...}` body instead of a Summary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SummaryResponse {
    Data(Box<Summary>),
    Empty { message: String },
}

/// Backend acknowledgement of a received file. Opaque to the controller
/// beyond the optional human-readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A file selected for upload: name plus raw content, POSTed as the
/// multipart field `file`.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
