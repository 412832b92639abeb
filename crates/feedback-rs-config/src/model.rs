//! Configuration schema for the feedback recorder.

use serde::{Deserialize, Serialize};

/// Root config for the feedback recorder.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeedbackConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Where records live and how free text is made safe for the line format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
    #[serde(default)]
    pub separator_policy: SeparatorPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            separator_policy: SeparatorPolicy::default(),
        }
    }
}

/// Default backing file, relative to the working directory.
fn default_store_path() -> String {
    "student_feedback.txt".to_string()
}

/// Handling of separator characters found in user supplied text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPolicy {
    /// Replace separators and line breaks with a space.
    #[default]
    Strip,
    /// Refuse the input.
    Reject,
}

/// Inclusive range of accepted ratings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingConfig {
    #[serde(default = "default_rating_min")]
    pub min: u8,
    #[serde(default = "default_rating_max")]
    pub max: u8,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            min: default_rating_min(),
            max: default_rating_max(),
        }
    }
}

fn default_rating_min() -> u8 {
    1
}

fn default_rating_max() -> u8 {
    5
}

/// Highest rating any config may allow.
pub const RATING_CEILING: u8 = 10;

/// Tuning for the lexicon classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,
    #[serde(default = "default_max_key_phrases")]
    pub max_key_phrases: usize,
    #[serde(default = "default_min_phrase_words")]
    pub min_phrase_words: usize,
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            max_key_phrases: default_max_key_phrases(),
            min_phrase_words: default_min_phrase_words(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

/// Scores strictly above this are labelled positive.
fn default_positive_threshold() -> f64 {
    0.1
}

/// Scores strictly below this are labelled negative.
fn default_negative_threshold() -> f64 {
    -0.1
}

fn default_max_key_phrases() -> usize {
    3
}

fn default_min_phrase_words() -> usize {
    3
}

fn default_max_input_chars() -> usize {
    2000
}
