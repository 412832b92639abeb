//! Layered configuration loader.
//!
//! Reads the user layer, the working-directory layer, and any runtime override
//! files, checks each against the schema, merges them in precedence order, and
//! produces the final `FeedbackConfig`.

mod layer_io;
mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, FeedbackConfig, RATING_CEILING};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "feedback.json5";
/// Default config directory under the user's home.
const DEFAULT_CONFIG_DIR: &str = ".feedback";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: FeedbackConfig,
    /// Metadata for each layer that contributed to `config`.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// User-specific configuration.
    User,
    /// Current working directory configuration.
    Cwd,
    /// Files passed on the command line (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory searched for `feedback.json5`.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.feedback/feedback.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last, in order.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl FeedbackConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        schema::validate_layer_schema(&value, "config")?;
        config_from_value(value)
    }

    /// Load the layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load the layered config stack using explicit layer locations.
    ///
    /// Layer precedence (low -> high): user, cwd, runtime overrides.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());

        let cwd_path = options.cwd.join(DEFAULT_CONFIG_FILE);
        let optional = [
            (ConfigLayerSource::User, options.user_config_path.clone()),
            (ConfigLayerSource::Cwd, Some(cwd_path)),
        ];
        for (source, path) in optional {
            let Some(path) = path else {
                continue;
            };
            if let Some((meta, value)) = layer_io::load_optional_layer(source, &path)? {
                if layers.iter().any(|layer: &ConfigLayer| {
                    layer_io::same_file(&layer.path, &meta.path)
                }) {
                    debug!("skipping duplicate layer (path={})", path.display());
                    continue;
                }
                merge_json_values(&mut merged, &value);
                layers.push(meta);
            }
        }

        for path in &options.runtime_paths {
            let (meta, value) = layer_io::load_required_layer(ConfigLayerSource::Runtime, path)?;
            merge_json_values(&mut merged, &value);
            layers.push(meta);
        }

        let config = config_from_value(merged)?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.trim().is_empty() {
            return Err(ConfigError::Invalid("store.path must not be empty".to_string()));
        }
        let rating = self.rating;
        if rating.min == 0 {
            return Err(ConfigError::Invalid("rating.min must be at least 1".to_string()));
        }
        if rating.min > rating.max {
            return Err(ConfigError::Invalid(format!(
                "rating.min ({}) exceeds rating.max ({})",
                rating.min, rating.max
            )));
        }
        if rating.max > RATING_CEILING {
            return Err(ConfigError::Invalid(format!(
                "rating.max must be at most {RATING_CEILING}"
            )));
        }
        let classifier = &self.classifier;
        if classifier.negative_threshold > classifier.positive_threshold {
            return Err(ConfigError::Invalid(
                "classifier.negative_threshold exceeds classifier.positive_threshold".to_string(),
            ));
        }
        if classifier.min_phrase_words == 0 {
            return Err(ConfigError::Invalid(
                "classifier.min_phrase_words must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_from_value(value: Value) -> Result<FeedbackConfig, ConfigError> {
    let config: FeedbackConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

/// Merge overlay values into the base; objects merge by key, anything else
/// replaces.
fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
