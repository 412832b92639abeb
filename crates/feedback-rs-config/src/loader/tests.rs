//! Tests for layered configuration loading.

use super::*;
use crate::SeparatorPolicy;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that never touch the real home directory.
fn isolated_options(cwd: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(cwd);
    options.user_config_path = None;
    options
}

#[test]
fn parse_minimal_config() {
    let config = FeedbackConfig::load_from_str("{}").expect("config");
    assert_eq!(config, FeedbackConfig::default());
    assert_eq!(config.store.path, "student_feedback.txt");
    assert_eq!(config.rating.min, 1);
    assert_eq!(config.rating.max, 5);
    assert_eq!(config.store.separator_policy, SeparatorPolicy::Strip);
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = FeedbackConfig::load_from_str("{ unexpected: true }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
    assert!(msg.contains("unexpected"));
}

#[test]
fn rejects_invalid_separator_policy() {
    let err =
        FeedbackConfig::load_from_str(r#"{ store: { separator_policy: "escape" } }"#).unwrap_err();
    assert!(format!("{err}").contains("store.separator_policy"));
}

#[test]
fn rejects_inverted_rating_range() {
    let err = FeedbackConfig::load_from_str("{ rating: { min: 4, max: 2 } }").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_rating_above_ceiling() {
    let err = FeedbackConfig::load_from_str("{ rating: { max: 11 } }").unwrap_err();
    assert!(format!("{err}").contains("at most 10"));
}

#[test]
fn rejects_threshold_outside_unit_range() {
    let err =
        FeedbackConfig::load_from_str("{ classifier: { positive_threshold: 1.5 } }").unwrap_err();
    assert!(format!("{err}").contains("classifier.positive_threshold"));
}

#[test]
fn cwd_layer_overrides_user_layer() {
    let temp = TempDir::new().expect("tmp");
    let user_config = temp.path().join("home").join("feedback.json5");
    write_json5(
        &user_config,
        "{ store: { path: \"user.txt\" }, rating: { max: 10 } }",
    );
    let cwd = temp.path().join("work");
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ store: { path: \"cwd.txt\" } }",
    );

    let mut options = LayeredConfigOptions::new(&cwd);
    options.user_config_path = Some(user_config);
    let layered = FeedbackConfig::load_layered_with_options(options).expect("layered");

    assert_eq!(layered.config.store.path, "cwd.txt");
    assert_eq!(layered.config.rating.max, 10);
    let sources: Vec<_> = layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(sources, vec![ConfigLayerSource::User, ConfigLayerSource::Cwd]);
}

#[test]
fn runtime_layer_applies_last() {
    let temp = TempDir::new().expect("tmp");
    let cwd = temp.path().to_path_buf();
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ store: { separator_policy: \"strip\" } }",
    );
    let runtime = temp.path().join("override.json5");
    write_json5(&runtime, "{ store: { separator_policy: \"reject\" } }");

    let options = isolated_options(&cwd).with_runtime_path(&runtime);
    let layered = FeedbackConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(
        layered.config.store.separator_policy,
        SeparatorPolicy::Reject
    );
    assert_eq!(layered.layers.len(), 2);
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let options =
        isolated_options(temp.path()).with_runtime_path(temp.path().join("absent.json5"));
    let err = FeedbackConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile(_)));
}

#[test]
fn no_layers_yields_defaults() {
    let temp = TempDir::new().expect("tmp");
    let layered =
        FeedbackConfig::load_layered_with_options(isolated_options(temp.path())).expect("layered");
    assert!(layered.layers.is_empty());
    assert_eq!(layered.config, FeedbackConfig::default());
}

#[test]
fn schema_errors_name_the_layer() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ rating: { min: \"one\" } }",
    );
    let err =
        FeedbackConfig::load_layered_with_options(isolated_options(temp.path())).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("rating.min"));
}

#[test]
fn merge_replaces_scalars_and_merges_objects() {
    let mut base = serde_json::json!({ "store": { "path": "a", "separator_policy": "strip" } });
    let overlay = serde_json::json!({ "store": { "path": "b" }, "rating": { "max": 7 } });
    merge_json_values(&mut base, &overlay);
    assert_eq!(
        base,
        serde_json::json!({
            "store": { "path": "b", "separator_policy": "strip" },
            "rating": { "max": 7 }
        })
    );
}

#[test]
fn load_from_path_reads_a_single_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("single.json5");
    write_json5(&path, "{ store: { path: \"data/fb.txt\" }, rating: { max: 10 } }");
    let config = FeedbackConfig::load_from_path(&path).expect("config");
    assert_eq!(config.store.path, "data/fb.txt");
    assert_eq!(config.rating.max, 10);
}

#[test]
fn load_from_path_reports_missing_file() {
    let temp = TempDir::new().expect("tmp");
    let missing = temp.path().join("absent.json5");
    let err = FeedbackConfig::load_from_path(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile(path) if path == missing));
}
