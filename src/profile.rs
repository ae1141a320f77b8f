use chrono::NaiveDateTime;

use crate::documents::{DateRange, ModelChoice, Theme, YAxis};

/// Per-model constants feeding the lineage chart and the privacy-budget
/// table.
#[derive(Clone, Debug)]
pub struct ModelFixture {
    pub name: String,
    pub usage: u32,
    pub epsilon_remaining: f64,
    pub delta_remaining: f64,
}

/// Every domain constant the generator draws from, in one place. The
/// `Default` profile reproduces the canonical dashboard snapshot; swap
/// fields to produce variants without touching the builders.
#[derive(Clone, Debug)]
pub struct FixtureProfile {
    pub theme: Theme,
    pub models: Vec<ModelFixture>,
    pub epsilon_total: f64,
    pub delta_total: f64,
    pub window: DateRange,
    pub filter_model: String,
    pub receipt_base_time: NaiveDateTime,
    pub receipt_count: usize,
    pub receipt_action: String,
    pub hash_len: usize,
    pub chart_title: String,
    pub y_axis: YAxis,
    pub wizard_steps: Vec<String>,
    pub active_step: usize,
    pub export_models: Vec<ModelChoice>,
    pub hint: String,
}

impl FixtureProfile {
    /// The two accent colors the lineage chart alternates between.
    pub fn accents(&self) -> [&str; 2] {
        [&self.theme.primary_blue, &self.theme.secondary_orange]
    }
}

fn model(name: &str, usage: u32, epsilon_remaining: f64, delta_remaining: f64) -> ModelFixture {
    ModelFixture {
        name: name.to_string(),
        usage,
        epsilon_remaining,
        delta_remaining,
    }
}

fn choice(name: &str, checked: bool) -> ModelChoice {
    ModelChoice {
        name: name.to_string(),
        checked,
    }
}

impl Default for FixtureProfile {
    fn default() -> Self {
        let base_time = NaiveDateTime::parse_from_str("2026-02-14 10:30:00", "%Y-%m-%d %H:%M:%S")
            .expect("canonical receipt base time parses");

        Self {
            theme: Theme {
                background: "#ffffff".to_string(),
                text: "#000000".to_string(),
                primary_blue: "#64b5f6".to_string(),
                secondary_orange: "#ffb74d".to_string(),
                border: "#e0e0e0".to_string(),
                card_bg: "#fafafa".to_string(),
                table_header_bg: "#f5f5f5".to_string(),
            },
            models: vec![
                model("gpt-3.5-turbo", 75, 8.2, 9.5e-6),
                model("llama-2-7b", 45, 6.5, 8.0e-6),
                model("claude-v2", 90, 9.1, 9.8e-6),
            ],
            epsilon_total: 10.0,
            delta_total: 1e-5,
            window: DateRange {
                start_time: "2026-02-01".to_string(),
                end_time: "2026-02-14".to_string(),
            },
            filter_model: "gpt-3.5-turbo".to_string(),
            receipt_base_time: base_time,
            receipt_count: 12,
            receipt_action: "View".to_string(),
            hash_len: 20,
            chart_title: "Model Usage".to_string(),
            y_axis: YAxis {
                min: 0,
                max: 100,
                ticks: vec![0, 25, 50, 75, 100],
            },
            wizard_steps: vec![
                "Select Models".to_string(),
                "Select Date Range".to_string(),
                "Confirm and Export".to_string(),
            ],
            active_step: 1,
            export_models: vec![
                choice("gpt-3.5-turbo", true),
                choice("llama-2-7b", false),
                choice("claude-v2", true),
                choice("mistral-7b", false),
            ],
            hint: "Choose one or more models to include in the export.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_internally_consistent() {
        let profile = FixtureProfile::default();

        assert_eq!(profile.models.len(), 3);
        assert!(profile.active_step < profile.wizard_steps.len());
        assert!(profile
            .models
            .iter()
            .all(|m| m.usage >= profile.y_axis.min && m.usage <= profile.y_axis.max));
        assert!(profile
            .models
            .iter()
            .all(|m| m.epsilon_remaining >= 0.0 && m.epsilon_remaining <= profile.epsilon_total));
        assert!(profile
            .models
            .iter()
            .all(|m| m.delta_remaining >= 0.0 && m.delta_remaining <= profile.delta_total));
    }

    #[test]
    fn chart_models_are_a_subset_of_export_models() {
        let profile = FixtureProfile::default();

        for model in &profile.models {
            assert!(profile.export_models.iter().any(|c| c.name == model.name));
        }
    }
}
