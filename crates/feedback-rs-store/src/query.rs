//! Search criteria for feedback records.

use crate::model::FeedbackRecord;
use feedback_rs_classifier::SentimentLabel;

/// Conjunction of optional criteria. An empty query matches every record.
///
/// Text criteria are case-insensitive substring matches; id, rating, and
/// sentiment must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Matches student name or course.
    pub term: Option<String>,
    /// Matches student name only.
    pub student: Option<String>,
    /// Matches course only.
    pub course: Option<String>,
    pub id: Option<u32>,
    pub rating: Option<u8>,
    pub sentiment: Option<SentimentLabel>,
}

impl SearchQuery {
    /// Query matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `term` against student name or course. Blank terms are ignored.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = non_blank(term.into());
        self
    }

    /// Match against student name only.
    pub fn with_student(mut self, student: impl Into<String>) -> Self {
        self.student = non_blank(student.into());
        self
    }

    /// Match against course only.
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = non_blank(course.into());
        self
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_sentiment(mut self, sentiment: SentimentLabel) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check a record against every set criterion.
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if let Some(term) = &self.term {
            if !contains_ci(&record.student_name, term) && !contains_ci(&record.course, term) {
                return false;
            }
        }
        if let Some(student) = &self.student {
            if !contains_ci(&record.student_name, student) {
                return false;
            }
        }
        if let Some(course) = &self.course {
            if !contains_ci(&record.course, course) {
                return false;
            }
        }
        self.id.is_none_or(|id| record.id == id)
            && self.rating.is_none_or(|rating| record.rating == rating)
            && self
                .sentiment
                .is_none_or(|sentiment| record.sentiment_label == sentiment)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
