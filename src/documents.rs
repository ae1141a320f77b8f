use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Light-mode color palette keyed by semantic role. Field order is the
/// serialized key order; every color referenced by the other documents
/// must resolve to one of these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub primary_blue: String,
    pub secondary_orange: String,
    pub border: String,
    pub card_bg: String,
    pub table_header_bg: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceiptFilters {
    pub model_id: String,
    pub start_time: String,
    pub end_time: String,
}

/// One audit-log entry. The hashes are placeholders shaped like Merkle
/// leaf/root digests; no tree backs them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRow {
    pub leaf_hash: String,
    pub index: usize,
    pub root_hash: String,
    pub timestamp: String,
    pub action: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceiptExplorer {
    pub filters: ReceiptFilters,
    pub rows: Vec<ReceiptRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YAxis {
    pub min: u32,
    pub max: u32,
    pub ticks: Vec<u32>,
}

/// Bar-chart descriptor for per-model usage. Keys of `values` and
/// `colors` are always a subset of `x_axis`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelLineage {
    pub title: String,
    pub date_range: DateRange,
    pub x_axis: Vec<String>,
    pub y_axis: YAxis,
    pub values: BTreeMap<String, u32>,
    pub colors: BTreeMap<String, String>,
}

/// One differential-privacy metric: how much budget is left against the
/// total, plus the consumed fraction for the dashboard's progress bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetMetric {
    pub remaining: f64,
    pub total: f64,
    pub progress: f64,
}

impl BudgetMetric {
    /// Derives `progress` from the remaining/total pair so the fraction
    /// can never drift from the figures it summarizes.
    pub fn from_remaining(remaining: f64, total: f64) -> Self {
        Self {
            remaining,
            total,
            progress: (total - remaining) / total,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrivacyBudgetEntry {
    pub model: String,
    pub epsilon: BudgetMetric,
    pub delta: BudgetMetric,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelChoice {
    pub name: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonState {
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardButtons {
    pub back: ButtonState,
    pub next: ButtonState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditExportWizard {
    pub stepper: Vec<String>,
    pub active_step: usize,
    pub models: Vec<ModelChoice>,
    pub buttons: WizardButtons,
    pub hint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_metric_derives_progress() {
        let metric = BudgetMetric::from_remaining(8.2, 10.0);
        assert!((metric.progress - 0.18).abs() < 1e-9);

        let metric = BudgetMetric::from_remaining(9.5e-6, 1e-5);
        assert!((metric.progress - 0.05).abs() < 1e-9);
    }

    #[test]
    fn budget_metric_serializes_all_fields() {
        let metric = BudgetMetric::from_remaining(6.5, 10.0);
        let value = serde_json::to_value(&metric).unwrap();

        assert_eq!(value["remaining"], 6.5);
        assert_eq!(value["total"], 10.0);
        assert!((value["progress"].as_f64().unwrap() - 0.35).abs() < 1e-9);
    }
}
