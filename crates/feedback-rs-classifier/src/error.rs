//! Error types for classification.

/// Errors returned by classifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    /// The text contains characters the classifier cannot handle.
    #[error("unsupported text: {0}")]
    UnsupportedText(String),
    /// The text exceeds the configured size limit.
    #[error("comment too long ({len} chars, max {max})")]
    InputTooLong { len: usize, max: usize },
}
