//! Feedback record model persisted by the store.

use feedback_rs_classifier::SentimentLabel;
use serde::{Deserialize, Serialize};

/// One stored feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRecord {
    /// Unique identifier assigned at creation.
    pub id: u32,
    /// Student who gave the feedback.
    pub student_name: String,
    /// Course the feedback is about.
    pub course: String,
    /// Rating within the configured range.
    pub rating: u8,
    /// Free-text comment, possibly empty.
    pub comment: String,
    /// Derived polarity label.
    pub sentiment_label: SentimentLabel,
    /// Derived polarity score in [-1.0, 1.0].
    pub sentiment_score: f64,
    /// Derived emotion tag.
    pub emotion: String,
    /// Derived key phrases in extraction order.
    pub key_phrases: Vec<String>,
}
