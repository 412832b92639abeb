//! Classification output model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse polarity attached to every feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in display order.
    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Lowercase name used in the backing file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Label a polarity score against the given thresholds.
    pub fn from_score(score: f64, positive_threshold: f64, negative_threshold: f64) -> Self {
        if score > positive_threshold {
            Self::Positive
        } else if score < negative_threshold {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    /// Case-insensitive parse of a label name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(format!("unknown sentiment label: {other:?}")),
        }
    }
}

/// Result of classifying one comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Coarse polarity.
    pub label: SentimentLabel,
    /// Polarity score in [-1.0, 1.0].
    pub score: f64,
    /// Dominant emotion tag, `"none"` when nothing matched.
    pub emotion: String,
    /// Extracted phrases in extraction order.
    pub key_phrases: Vec<String>,
}

impl ClassificationResult {
    /// Result used for comments with no signal at all.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
            emotion: crate::lexicon::NO_EMOTION.to_string(),
            key_phrases: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SentimentLabel;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("Positive".parse::<SentimentLabel>(), Ok(SentimentLabel::Positive));
        assert_eq!(" NEGATIVE ".parse::<SentimentLabel>(), Ok(SentimentLabel::Negative));
        assert!("mixed".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(SentimentLabel::from_score(0.1, 0.1, -0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.11, 0.1, -0.1), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.1, 0.1, -0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.5, 0.1, -0.1), SentimentLabel::Negative);
    }
}
