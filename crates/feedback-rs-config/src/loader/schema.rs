//! Schema checks for feedback JSON5 configuration.
//!
//! Serde would silently ignore misspelled keys; these checks reject them with
//! the dotted path of the offending entry.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "store", "rating", "classifier"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("store") {
        validate_store(value, layer, "store")?;
    }
    if let Some(value) = map.get("rating") {
        validate_rating(value, layer, "rating")?;
    }
    if let Some(value) = map.get("classifier") {
        validate_classifier(value, layer, "classifier")?;
    }
    Ok(())
}

/// Validate the "store" block.
fn validate_store(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["path", "separator_policy"], layer, path)?;
    if let Some(value) = map.get("path") {
        expect_string(value, layer, &join_path(path, "path"))?;
    }
    if let Some(value) = map.get("separator_policy") {
        let field = join_path(path, "separator_policy");
        let policy = expect_string(value, layer, &field)?;
        if !matches!(policy, "strip" | "reject") {
            return Err(invalid_field(
                layer,
                &field,
                "expected \"strip\" or \"reject\"",
            ));
        }
    }
    Ok(())
}

/// Validate the "rating" block.
fn validate_rating(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["min", "max"], layer, path)?;
    for key in ["min", "max"] {
        if let Some(value) = map.get(key) {
            let field = join_path(path, key);
            let number = expect_u64(value, layer, &field)?;
            if number > u64::from(u8::MAX) {
                return Err(invalid_field(layer, &field, "value out of range"));
            }
        }
    }
    Ok(())
}

/// Validate the "classifier" block.
fn validate_classifier(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &[
            "positive_threshold",
            "negative_threshold",
            "max_key_phrases",
            "min_phrase_words",
            "max_input_chars",
        ],
        layer,
        path,
    )?;
    for key in ["positive_threshold", "negative_threshold"] {
        if let Some(value) = map.get(key) {
            let field = join_path(path, key);
            let threshold = expect_f64(value, layer, &field)?;
            if !(-1.0..=1.0).contains(&threshold) {
                return Err(invalid_field(layer, &field, "expected a value in [-1, 1]"));
            }
        }
    }
    for key in ["max_key_phrases", "min_phrase_words", "max_input_chars"] {
        if let Some(value) = map.get(key) {
            expect_u64(value, layer, &join_path(path, key))?;
        }
    }
    Ok(())
}

fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| invalid_field(layer, path, "expected object"))
}

fn expect_string<'a>(value: &'a Value, layer: &str, path: &str) -> Result<&'a str, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| invalid_field(layer, path, "expected string"))
}

fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<u64, ConfigError> {
    value
        .as_u64()
        .ok_or_else(|| invalid_field(layer, path, "expected non-negative integer"))
}

fn expect_f64(value: &Value, layer: &str, path: &str) -> Result<f64, ConfigError> {
    value
        .as_f64()
        .ok_or_else(|| invalid_field(layer, path, "expected number"))
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let path = if path.is_empty() { "<root>" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{path}"),
        message: message.to_string(),
    }
}
