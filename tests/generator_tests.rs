use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde_json::Value;
use verillm_mock::{generate_fixtures, FixtureGenerator, FixtureProfile, FIXTURE_FILES};

fn read_json(dir: &Path, name: &str) -> Value {
    let raw = fs::read_to_string(dir.join(name))
        .unwrap_or_else(|err| panic!("{} should be readable: {}", name, err));
    serde_json::from_str(&raw).unwrap_or_else(|err| panic!("{} should be JSON: {}", name, err))
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("output dir should be listable")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_exactly_the_five_fixture_files() {
    let dir = tempfile::tempdir().unwrap();

    let written = generate_fixtures(dir.path()).expect("generation should succeed");

    assert_eq!(written.len(), 5);
    let mut expected: Vec<String> = FIXTURE_FILES.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(dir_entries(dir.path()), expected);

    for name in FIXTURE_FILES {
        read_json(dir.path(), name);
    }
}

#[test]
fn receipt_rows_are_contiguous_with_minute_spacing() {
    let dir = tempfile::tempdir().unwrap();
    generate_fixtures(dir.path()).unwrap();

    let explorer = read_json(dir.path(), "receipt_explorer.json");
    let rows = explorer["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 12);

    let mut previous: Option<NaiveDateTime> = None;
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row["index"].as_u64(), Some(i as u64 + 1));
        assert_eq!(row["action"], "View");
        assert_eq!(row["leaf_hash"].as_str().unwrap().len(), 20);
        assert_eq!(row["root_hash"].as_str().unwrap().len(), 20);

        let stamp =
            NaiveDateTime::parse_from_str(row["timestamp"].as_str().unwrap(), "%Y-%m-%d %H:%M:%S")
                .expect("row timestamp parses");
        if let Some(prev) = previous {
            assert_eq!((stamp - prev).num_seconds(), 60);
        }
        previous = Some(stamp);
    }
}

#[test]
fn privacy_budget_progress_is_derived_from_remaining_and_total() {
    let dir = tempfile::tempdir().unwrap();
    generate_fixtures(dir.path()).unwrap();

    let budget = read_json(dir.path(), "privacy_budget.json");
    let entries = budget.as_array().expect("budget array");
    assert_eq!(entries.len(), 3);

    for entry in entries {
        for metric_name in ["epsilon", "delta"] {
            let metric = &entry[metric_name];
            let remaining = metric["remaining"].as_f64().unwrap();
            let total = metric["total"].as_f64().unwrap();
            let progress = metric["progress"].as_f64().unwrap();

            assert!((progress - (total - remaining) / total).abs() < 1e-9);
            assert!(remaining >= 0.0 && remaining <= total);
        }
    }
}

#[test]
fn lineage_colors_resolve_to_theme_accents() {
    let dir = tempfile::tempdir().unwrap();
    generate_fixtures(dir.path()).unwrap();

    let theme = read_json(dir.path(), "theme.json");
    let lineage = read_json(dir.path(), "model_lineage.json");

    let accents = [
        theme["primary_blue"].as_str().unwrap(),
        theme["secondary_orange"].as_str().unwrap(),
    ];

    let x_axis: Vec<&str> = lineage["x_axis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(x_axis.len(), 3);

    let colors = lineage["colors"].as_object().unwrap();
    assert_eq!(colors.len(), 3);
    for (model, color) in colors {
        assert!(x_axis.contains(&model.as_str()));
        assert!(accents.contains(&color.as_str().unwrap()));
    }

    let min = lineage["y_axis"]["min"].as_u64().unwrap();
    let max = lineage["y_axis"]["max"].as_u64().unwrap();
    for (model, value) in lineage["values"].as_object().unwrap() {
        assert!(x_axis.contains(&model.as_str()));
        let value = value.as_u64().unwrap();
        assert!(value >= min && value <= max);
    }
}

#[test]
fn wizard_state_has_a_valid_active_step() {
    let dir = tempfile::tempdir().unwrap();
    generate_fixtures(dir.path()).unwrap();

    let wizard = read_json(dir.path(), "audit_export.json");
    let steps = wizard["stepper"].as_array().unwrap();
    let active = wizard["active_step"].as_u64().unwrap() as usize;

    assert_eq!(steps.len(), 3);
    assert!(active < steps.len());
    assert_eq!(wizard["models"].as_array().unwrap().len(), 4);
    assert_eq!(wizard["buttons"]["back"]["enabled"], false);
    assert_eq!(wizard["buttons"]["next"]["enabled"], true);
    assert!(!wizard["hint"].as_str().unwrap().is_empty());
}

fn structure_of(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), structure_of(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(vec![Value::from(items.len() as u64)]),
        _ => Value::Null,
    }
}

#[test]
fn reruns_are_structurally_identical_but_hashes_differ() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    generate_fixtures(first.path()).unwrap();
    generate_fixtures(second.path()).unwrap();

    for name in FIXTURE_FILES {
        let a = read_json(first.path(), name);
        let b = read_json(second.path(), name);
        assert_eq!(structure_of(&a), structure_of(&b), "{} structure drifted", name);
    }

    let a = read_json(first.path(), "receipt_explorer.json");
    let b = read_json(second.path(), "receipt_explorer.json");
    let differs = a["rows"]
        .as_array()
        .unwrap()
        .iter()
        .zip(b["rows"].as_array().unwrap())
        .any(|(ra, rb)| ra["leaf_hash"] != rb["leaf_hash"]);
    assert!(differs, "entropy-seeded runs should produce different hashes");
}

#[test]
fn regenerating_into_the_same_directory_replaces_files() {
    let dir = tempfile::tempdir().unwrap();
    generate_fixtures(dir.path()).unwrap();
    generate_fixtures(dir.path()).unwrap();

    assert_eq!(dir_entries(dir.path()).len(), 5);
}

#[test]
fn equal_seeds_produce_identical_output() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    FixtureGenerator::seeded(FixtureProfile::default(), 1234)
        .generate(first.path())
        .unwrap();
    FixtureGenerator::seeded(FixtureProfile::default(), 1234)
        .generate(second.path())
        .unwrap();

    for name in FIXTURE_FILES {
        let a = fs::read(first.path().join(name)).unwrap();
        let b = fs::read(second.path().join(name)).unwrap();
        assert_eq!(a, b, "{} should be byte-identical for equal seeds", name);
    }
}

#[test]
fn generation_fails_when_the_target_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, b"not a directory").unwrap();

    let result = generate_fixtures(&blocker);
    assert!(result.is_err());
}
