//! Sentiment, emotion, and key-phrase tagging for feedback comments.

pub mod error;
pub mod lexicon;
pub mod model;
pub mod phrases;

/// Classifier error type.
pub use error::ClassifierError;
/// Default word-list classifier.
pub use lexicon::LexiconClassifier;
/// Classification output and sentiment labels.
pub use model::{ClassificationResult, SentimentLabel};

/// Narrow seam used by the record store to enrich new feedback.
///
/// Implementations must return the same result for the same text within a
/// process run.
pub trait Classifier: Send + Sync {
    /// Classify a raw comment, which may be empty.
    fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        (**self).classify(text)
    }
}
