use feedback_rs_classifier::{
    ClassificationResult, Classifier, ClassifierError, LexiconClassifier, SentimentLabel,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Returns the same result for every comment.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    result: ClassificationResult,
}

impl FixedClassifier {
    pub fn new(result: ClassificationResult) -> Self {
        Self { result }
    }

    pub fn labelled(label: SentimentLabel, score: f64) -> Self {
        Self::new(ClassificationResult {
            label,
            score,
            emotion: "none".to_string(),
            key_phrases: Vec::new(),
        })
    }
}

impl Default for FixedClassifier {
    fn default() -> Self {
        Self::new(ClassificationResult::neutral())
    }
}

impl Classifier for FixedClassifier {
    fn classify(&self, _text: &str) -> Result<ClassificationResult, ClassifierError> {
        Ok(self.result.clone())
    }
}

/// Refuses every comment.
#[derive(Debug, Clone, Default)]
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _text: &str) -> Result<ClassificationResult, ClassifierError> {
        Err(ClassifierError::UnsupportedText("test failure".to_string()))
    }
}

/// Delegates to the lexicon classifier and records every input.
#[derive(Debug, Clone, Default)]
pub struct RecordingClassifier {
    inner: LexiconClassifier,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts passed to `classify`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Classifier for RecordingClassifier {
    fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        self.calls.lock().push(text.to_string());
        self.inner.classify(text)
    }
}
