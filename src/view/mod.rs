//! Presentation Layer
//!
//! Stateless view-model derivation; renderers consume these values as-is.

mod bindings;

pub use bindings::{
    alert_banner, alert_count, alert_line, format_health, format_metric, history_line,
    history_line_in, risk_rows, summary_cards, type_distribution_rows, RiskBucket, RiskRow,
    SummaryCard, PLACEHOLDER,
};
