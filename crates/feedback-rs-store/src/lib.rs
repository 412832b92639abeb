//! Feedback record store backed by a pipe-delimited flat file.

pub mod codec;
pub mod error;
pub mod model;
pub mod policy;
pub mod query;
pub mod stats;
pub mod store;

/// Line codec for the backing file.
pub use codec::{decode_line, encode_record};
/// Store and per-line parse error types.
pub use error::{LoadIssue, ParseError, StoreError};
/// Feedback record model.
pub use model::FeedbackRecord;
/// Input validation and separator handling.
pub use policy::InputPolicy;
/// Search criteria.
pub use query::SearchQuery;
/// Aggregations used by the presentation layer.
pub use stats::{LabelSummary, RatingStats, SentimentSummary};
/// Record store and loader.
pub use store::{FeedbackStore, LoadedRecords, load_records};

/// Sentiment label re-exported for store consumers.
pub use feedback_rs_classifier::SentimentLabel;
