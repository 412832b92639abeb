use feedback_rs_classifier::{Classifier, LexiconClassifier, SentimentLabel};
use feedback_rs_store::{FeedbackRecord, FeedbackStore, InputPolicy};
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a neutral record with the given identity fields.
pub fn record(id: u32, student_name: &str, course: &str, rating: u8) -> FeedbackRecord {
    FeedbackRecord {
        id,
        student_name: student_name.to_string(),
        course: course.to_string(),
        rating,
        comment: String::new(),
        sentiment_label: SentimentLabel::Neutral,
        sentiment_score: 0.0,
        emotion: "none".to_string(),
        key_phrases: Vec::new(),
    }
}

/// A store in a fresh temp directory. The directory lives as long as this.
pub struct TempStore {
    pub dir: TempDir,
    pub path: PathBuf,
    pub store: FeedbackStore,
}

/// Open an empty store with the lexicon classifier and default policy.
pub fn temp_store() -> TempStore {
    temp_store_with(Box::new(LexiconClassifier::default()), InputPolicy::default())
}

/// Open an empty store with an explicit classifier and policy.
pub fn temp_store_with(classifier: Box<dyn Classifier>, policy: InputPolicy) -> TempStore {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("student_feedback.txt");
    let store = FeedbackStore::open(&path, classifier, policy).expect("open store");
    TempStore { dir, path, store }
}
