//! Test helpers shared across feedback-rs crates.

pub mod classifier;
pub mod records;

pub use classifier::{FailingClassifier, FixedClassifier, RecordingClassifier};
pub use records::{TempStore, record, temp_store, temp_store_with};
