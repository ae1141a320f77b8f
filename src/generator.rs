use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::documents::{
    AuditExportWizard, BudgetMetric, ButtonState, ModelLineage, PrivacyBudgetEntry,
    ReceiptExplorer, ReceiptFilters, ReceiptRow, Theme, WizardButtons,
};
use crate::profile::FixtureProfile;

/// Conventional output directory for the dashboard fixtures.
pub const DEFAULT_OUTPUT_DIR: &str = "verillm_mock_data";

/// File names written by [`FixtureGenerator::generate`], in write order.
pub const FIXTURE_FILES: [&str; 5] = [
    "theme.json",
    "receipt_explorer.json",
    "model_lineage.json",
    "privacy_budget.json",
    "audit_export.json",
];

/// Builds the five dashboard fixture documents from a [`FixtureProfile`]
/// and serializes them to an output directory as indented JSON.
///
/// Hash fields are the only nondeterministic output; construct the
/// generator with [`FixtureGenerator::seeded`] when tests need exact
/// bytes.
pub struct FixtureGenerator {
    profile: FixtureProfile,
    rng: StdRng,
}

impl FixtureGenerator {
    pub fn new(profile: FixtureProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(profile: FixtureProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn profile(&self) -> &FixtureProfile {
        &self.profile
    }

    pub fn theme(&self) -> Theme {
        self.profile.theme.clone()
    }

    pub fn receipt_explorer(&mut self) -> ReceiptExplorer {
        let profile = &self.profile;
        let rows = (0..profile.receipt_count)
            .map(|i| ReceiptRow {
                leaf_hash: random_hash(&mut self.rng, profile.hash_len),
                index: i + 1,
                root_hash: random_hash(&mut self.rng, profile.hash_len),
                timestamp: (profile.receipt_base_time + Duration::minutes(i as i64))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                action: profile.receipt_action.clone(),
            })
            .collect();

        ReceiptExplorer {
            filters: ReceiptFilters {
                model_id: profile.filter_model.clone(),
                start_time: profile.window.start_time.clone(),
                end_time: profile.window.end_time.clone(),
            },
            rows,
        }
    }

    pub fn model_lineage(&self) -> ModelLineage {
        let profile = &self.profile;
        let accents = profile.accents();

        let mut lineage = ModelLineage {
            title: profile.chart_title.clone(),
            date_range: profile.window.clone(),
            x_axis: profile.models.iter().map(|m| m.name.clone()).collect(),
            y_axis: profile.y_axis.clone(),
            values: Default::default(),
            colors: Default::default(),
        };

        for (i, model) in profile.models.iter().enumerate() {
            lineage.values.insert(model.name.clone(), model.usage);
            // Bars alternate between the two theme accents.
            lineage
                .colors
                .insert(model.name.clone(), accents[i % 2].to_string());
        }

        lineage
    }

    pub fn privacy_budget(&self) -> Vec<PrivacyBudgetEntry> {
        let profile = &self.profile;
        profile
            .models
            .iter()
            .map(|model| PrivacyBudgetEntry {
                model: model.name.clone(),
                epsilon: BudgetMetric::from_remaining(model.epsilon_remaining, profile.epsilon_total),
                delta: BudgetMetric::from_remaining(model.delta_remaining, profile.delta_total),
            })
            .collect()
    }

    pub fn audit_export(&self) -> AuditExportWizard {
        let profile = &self.profile;
        AuditExportWizard {
            stepper: profile.wizard_steps.clone(),
            active_step: profile.active_step,
            models: profile.export_models.clone(),
            // Snapshot keeps back disabled even though the active step is
            // not the first one; preserved verbatim from the dashboard
            // fixture rather than corrected.
            buttons: WizardButtons {
                back: ButtonState { enabled: false },
                next: ButtonState { enabled: true },
            },
            hint: profile.hint.clone(),
        }
    }

    /// Writes all five documents into `output_dir`, creating it if
    /// absent, and returns the written paths. The first I/O failure
    /// aborts the remaining writes.
    pub fn generate(&mut self, output_dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)?;

        let theme = self.theme();
        let receipt_explorer = self.receipt_explorer();
        let model_lineage = self.model_lineage();
        let privacy_budget = self.privacy_budget();
        let audit_export = self.audit_export();

        let mut written = Vec::with_capacity(FIXTURE_FILES.len());
        write_document(output_dir, "theme.json", &theme, &mut written)?;
        write_document(
            output_dir,
            "receipt_explorer.json",
            &receipt_explorer,
            &mut written,
        )?;
        write_document(output_dir, "model_lineage.json", &model_lineage, &mut written)?;
        write_document(output_dir, "privacy_budget.json", &privacy_budget, &mut written)?;
        write_document(output_dir, "audit_export.json", &audit_export, &mut written)?;

        Ok(written)
    }
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::new(FixtureProfile::default())
    }
}

fn write_document<T: Serialize>(
    dir: &Path,
    name: &str,
    document: &T,
    written: &mut Vec<PathBuf>,
) -> io::Result<()> {
    let body = serde_json::to_string_pretty(document)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let path = dir.join(name);
    fs::write(&path, body)?;
    written.push(path);

    Ok(())
}

fn random_hash(rng: &mut StdRng, len: usize) -> String {
    const HEX: &[u8] = b"abcdef0123456789";

    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}
