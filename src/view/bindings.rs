//! View-Model Bindings
//!
//! Pure, total functions from dashboard state to display values. Every
//! optional backend field is pattern-matched into a display string here, so
//! renderers never see a partial value and the controller stays free of
//! presentation concerns.

use chrono::TimeZone;

use crate::api::{Alert, HealthScore, HistoryItem, Summary};

/// Placeholder for absent values
pub const PLACEHOLDER: &str = "-";

/// Format a continuous metric with two-decimal precision, or the placeholder
/// when the backend omitted it.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Health score display: numbers get two decimals, categorical labels pass
/// through verbatim.
pub fn format_health(score: Option<&HealthScore>) -> String {
    match score {
        Some(HealthScore::Number(n)) => format!("{:.2}", n),
        Some(HealthScore::Label(label)) => label.clone(),
        None => PLACEHOLDER.to_string(),
    }
}

/// One dashboard card
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

/// The five summary cards; empty when no summary has been loaded yet.
pub fn summary_cards(summary: Option<&Summary>) -> Vec<SummaryCard> {
    let Some(summary) = summary else {
        return Vec::new();
    };

    vec![
        SummaryCard {
            title: "Total Equipment",
            value: summary.total_equipment.to_string(),
        },
        SummaryCard {
            title: "Avg Flowrate",
            value: format_metric(summary.avg_flowrate),
        },
        SummaryCard {
            title: "Avg Pressure",
            value: format_metric(summary.avg_pressure),
        },
        SummaryCard {
            title: "Avg Temperature",
            value: format_metric(summary.avg_temperature),
        },
        SummaryCard {
            title: "Health Score",
            value: format_health(summary.health_score.as_ref()),
        },
    ]
}

/// Alert count: length of the summary's alert sequence, 0 without a summary.
pub fn alert_count(summary: Option<&Summary>) -> usize {
    summary.map_or(0, |s| s.alerts.len())
}

/// Banner text for the alert indicator
pub fn alert_banner(count: usize) -> String {
    if count == 0 {
        "No alerts".to_string()
    } else {
        format!("Alerts: {}", count)
    }
}

/// One alert as a display line, with value/limit suffixes only when present.
pub fn alert_line(alert: &Alert) -> String {
    let mut line = format!("{} - {} - {}", alert.equipment, alert.metric, alert.issue);
    if let Some(value) = alert.value {
        line.push_str(&format!(" (value: {})", value));
    }
    if let Some(limit) = alert.limit {
        line.push_str(&format!(" (limit: {})", limit));
    }
    line
}

/// One history row: filename plus display-local upload time.
pub fn history_line(item: &HistoryItem) -> String {
    history_line_in(item, &chrono::Local)
}

/// Timezone-parameterized form of [`history_line`]
pub fn history_line_in<Tz: TimeZone>(item: &HistoryItem, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} - {}",
        item.filename,
        item.uploaded_at.with_timezone(tz).format("%Y-%m-%d %H:%M:%S")
    )
}

/// Severity tier for grouping equipment by condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBucket {
    Good,
    Moderate,
    Critical,
    Other,
}

impl RiskBucket {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Good" => Self::Good,
            "Moderate" => Self::Moderate,
            "Critical" => Self::Critical,
            _ => Self::Other,
        }
    }

    /// Display color for the bucket
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Moderate => "orange",
            Self::Critical => "red",
            Self::Other => "black",
        }
    }

    fn severity_rank(&self) -> u8 {
        match self {
            Self::Good => 0,
            Self::Moderate => 1,
            Self::Critical => 2,
            Self::Other => 3,
        }
    }
}

/// One row of the risk map
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRow {
    pub label: String,
    pub count: u64,
    pub color: &'static str,
}

/// Risk-bucket rows in severity order (Good, Moderate, Critical, then any
/// unrecognized tiers alphabetically).
pub fn risk_rows(summary: &Summary) -> Vec<RiskRow> {
    let mut rows: Vec<RiskRow> = summary
        .risk_buckets
        .iter()
        .map(|(label, count)| RiskRow {
            label: label.clone(),
            count: *count,
            color: RiskBucket::from_label(label).color(),
        })
        .collect();

    rows.sort_by(|a, b| {
        RiskBucket::from_label(&a.label)
            .severity_rank()
            .cmp(&RiskBucket::from_label(&b.label).severity_rank())
            .then_with(|| a.label.cmp(&b.label))
    });

    rows
}

/// Equipment-type distribution as label/count pairs, count-descending with
/// ties broken by label for a stable chart order.
pub fn type_distribution_rows(summary: &Summary) -> Vec<(String, u64)> {
    let mut rows: Vec<(String, u64)> = summary
        .type_distribution
        .iter()
        .map(|(label, count)| (label.clone(), *count))
        .collect();

    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn summary_fixture() -> Summary {
        serde_json::from_value(json!({
            "total_equipment": 12,
            "avg_flowrate": 3.456,
            "alerts": [],
            "type_distribution": {"Pump": 5, "Valve": 7, "Compressor": 5},
            "risk_buckets": {"Critical": 3, "Good": 9, "Aging": 1}
        }))
        .unwrap()
    }

    #[test]
    fn test_format_metric_rounds_to_two_decimals() {
        assert_eq!(format_metric(Some(3.456)), "3.46");
        assert_eq!(format_metric(Some(41.0)), "41.00");
        assert_eq!(format_metric(None), "-");
    }

    #[test]
    fn test_format_health_variants() {
        assert_eq!(format_health(Some(&HealthScore::Number(72.456))), "72.46");
        assert_eq!(
            format_health(Some(&HealthScore::Label("Good".to_string()))),
            "Good"
        );
        assert_eq!(format_health(None), "-");
    }

    #[test]
    fn test_summary_cards() {
        let summary = summary_fixture();
        let cards = summary_cards(Some(&summary));

        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].title, "Total Equipment");
        assert_eq!(cards[0].value, "12");
        assert_eq!(cards[1].value, "3.46");
        // Absent pressure and health score render as the placeholder
        assert_eq!(cards[2].value, "-");
        assert_eq!(cards[4].value, "-");

        assert!(summary_cards(None).is_empty());
    }

    #[test]
    fn test_alert_count_without_summary_is_zero() {
        assert_eq!(alert_count(None), 0);
        assert_eq!(alert_count(Some(&summary_fixture())), 0);
        assert_eq!(alert_banner(0), "No alerts");
        assert_eq!(alert_banner(3), "Alerts: 3");
    }

    #[test]
    fn test_alert_line_with_optional_fields() {
        let full: Alert = serde_json::from_value(json!({
            "equipment": "P-101", "type": "Pump", "metric": "Pressure",
            "issue": "high", "value": 80.0, "limit": 60.0
        }))
        .unwrap();
        assert_eq!(
            alert_line(&full),
            "P-101 - Pressure - high (value: 80) (limit: 60)"
        );

        let missing: Alert = serde_json::from_value(json!({
            "equipment": "V-7", "type": "Valve", "metric": "Flowrate",
            "issue": "missing"
        }))
        .unwrap();
        assert_eq!(alert_line(&missing), "V-7 - Flowrate - missing");
    }

    #[test]
    fn test_history_line() {
        let item: HistoryItem = serde_json::from_value(json!({
            "id": 1, "filename": "a.csv", "uploaded_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let line = history_line_in(&item, &Utc);
        assert_eq!(line, "a.csv - 2024-01-01 00:00:00");
    }

    #[test]
    fn test_risk_rows_severity_order_and_colors() {
        let rows = risk_rows(&summary_fixture());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "Good");
        assert_eq!(rows[0].color, "green");
        assert_eq!(rows[0].count, 9);
        assert_eq!(rows[1].label, "Critical");
        assert_eq!(rows[1].color, "red");
        // Unrecognized tiers trail the known ones
        assert_eq!(rows[2].label, "Aging");
        assert_eq!(rows[2].color, "black");
    }

    #[test]
    fn test_type_distribution_rows_ordering() {
        let rows = type_distribution_rows(&summary_fixture());
        assert_eq!(
            rows,
            vec![
                ("Valve".to_string(), 7),
                ("Compressor".to_string(), 5),
                ("Pump".to_string(), 5),
            ]
        );
    }
}
