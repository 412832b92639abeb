//! Aggregations over feedback records.

use crate::model::FeedbackRecord;
use feedback_rs_classifier::SentimentLabel;
use feedback_rs_config::RatingConfig;
use std::collections::{BTreeMap, HashMap};

/// Count of records per rating, with a zero entry for every rating in range.
pub fn rating_distribution(records: &[FeedbackRecord], range: RatingConfig) -> BTreeMap<u8, usize> {
    let mut counts: BTreeMap<u8, usize> = (range.min..=range.max).map(|rating| (rating, 0)).collect();
    for record in records {
        *counts.entry(record.rating).or_insert(0) += 1;
    }
    counts
}

/// Average, extremes, and count of ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub highest: u8,
    pub lowest: u8,
    pub total: usize,
}

impl RatingStats {
    /// `None` when there are no records.
    pub fn from_records(records: &[FeedbackRecord]) -> Option<Self> {
        let highest = records.iter().map(|record| record.rating).max()?;
        let lowest = records.iter().map(|record| record.rating).min()?;
        let sum: u64 = records.iter().map(|record| u64::from(record.rating)).sum();
        Some(Self {
            average: sum as f64 / records.len() as f64,
            highest,
            lowest,
            total: records.len(),
        })
    }
}

/// Per-label count and mean score.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSummary {
    pub label: SentimentLabel,
    pub count: usize,
    /// Mean sentiment score, 0.0 when `count` is zero.
    pub mean_score: f64,
}

/// Sentiment overview across all records.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    /// One entry per label, in `SentimentLabel::ALL` order.
    pub labels: Vec<LabelSummary>,
    /// Emotion tags with counts, most frequent first, then by name.
    pub emotions: Vec<(String, usize)>,
    /// Mean score over all records, `None` when empty.
    pub overall_mean: Option<f64>,
    pub total: usize,
}

impl SentimentSummary {
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let labels = SentimentLabel::ALL
            .iter()
            .map(|label| {
                let scores: Vec<f64> = records
                    .iter()
                    .filter(|record| record.sentiment_label == *label)
                    .map(|record| record.sentiment_score)
                    .collect();
                LabelSummary {
                    label: *label,
                    count: scores.len(),
                    mean_score: mean(&scores).unwrap_or(0.0),
                }
            })
            .collect();

        let mut emotion_counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *emotion_counts.entry(record.emotion.as_str()).or_insert(0) += 1;
        }
        let mut emotions: Vec<(String, usize)> = emotion_counts
            .into_iter()
            .map(|(emotion, count)| (emotion.to_string(), count))
            .collect();
        emotions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let scores: Vec<f64> = records.iter().map(|record| record.sentiment_score).collect();
        Self {
            labels,
            emotions,
            overall_mean: mean(&scores),
            total: records.len(),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
