//! Input validation and separator handling applied before persistence.

use crate::codec::{FIELD_SEPARATOR, PHRASE_SEPARATOR};
use crate::error::StoreError;
use feedback_rs_classifier::ClassificationResult;
use feedback_rs_config::{FeedbackConfig, RatingConfig, SeparatorPolicy};

/// Characters that may never reach the backing file inside a field.
const FORBIDDEN: [char; 3] = [FIELD_SEPARATOR, '\r', '\n'];

/// Rules applied to user input on add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputPolicy {
    /// Accepted rating range.
    pub rating: RatingConfig,
    /// What to do with separators in free text.
    pub separator_policy: SeparatorPolicy,
}

impl InputPolicy {
    /// Build the policy from the loaded config.
    pub fn from_config(config: &FeedbackConfig) -> Self {
        Self {
            rating: config.rating,
            separator_policy: config.store.separator_policy,
        }
    }

    /// Make free text safe for the line format and trim it.
    ///
    /// `required` fields must be non-empty after cleaning.
    pub fn clean_text(
        &self,
        field: &str,
        value: &str,
        required: bool,
    ) -> Result<String, StoreError> {
        let cleaned = match self.separator_policy {
            SeparatorPolicy::Strip => strip_forbidden(value),
            SeparatorPolicy::Reject => {
                if value.contains(FORBIDDEN) {
                    return Err(StoreError::Validation(format!(
                        "{field} must not contain '{FIELD_SEPARATOR}' or line breaks"
                    )));
                }
                value.trim().to_string()
            }
        };
        if required && cleaned.is_empty() {
            return Err(StoreError::Validation(format!("{field} must not be empty")));
        }
        Ok(cleaned)
    }

    /// Check a rating against the configured range.
    pub fn check_rating(&self, rating: i64) -> Result<u8, StoreError> {
        let RatingConfig { min, max } = self.rating;
        u8::try_from(rating)
            .ok()
            .filter(|value| (min..=max).contains(value))
            .ok_or_else(|| {
                StoreError::Validation(format!("rating must be between {min} and {max}"))
            })
    }
}

/// Replace separators and line breaks with a space, then trim.
fn strip_forbidden(value: &str) -> String {
    value
        .replace(FORBIDDEN, " ")
        .trim()
        .to_string()
}

/// Scrub classifier output so derived fields obey the same line rules.
pub(crate) fn scrub_classification(result: ClassificationResult) -> ClassificationResult {
    let key_phrases = result
        .key_phrases
        .iter()
        .map(|phrase| strip_forbidden(&phrase.replace(PHRASE_SEPARATOR, ",")))
        .filter(|phrase| !phrase.is_empty())
        .collect();
    ClassificationResult {
        emotion: strip_forbidden(&result.emotion),
        key_phrases,
        ..result
    }
}

#[cfg(test)]
mod tests {
    use super::{InputPolicy, scrub_classification};
    use crate::error::StoreError;
    use feedback_rs_classifier::{ClassificationResult, SentimentLabel};
    use feedback_rs_config::{RatingConfig, SeparatorPolicy};
    use pretty_assertions::assert_eq;

    fn reject() -> InputPolicy {
        InputPolicy {
            separator_policy: SeparatorPolicy::Reject,
            ..InputPolicy::default()
        }
    }

    #[test]
    fn strip_replaces_separators_and_trims() {
        let cleaned = InputPolicy::default()
            .clean_text("comment", " good|pace\nfun \r", false)
            .expect("clean");
        assert_eq!(cleaned, "good pace fun");
    }

    #[test]
    fn reject_refuses_separators() {
        let err = reject().clean_text("course", "CS|101", true).unwrap_err();
        assert!(matches!(err, StoreError::Validation(msg) if msg.contains("course")));
        assert_eq!(
            reject().clean_text("course", " CS101 ", true).expect("clean"),
            "CS101"
        );
    }

    #[test]
    fn required_fields_must_not_be_blank() {
        let err = InputPolicy::default()
            .clean_text("student name", " | ", true)
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(msg) if msg == "student name must not be empty"));
        assert_eq!(
            InputPolicy::default()
                .clean_text("comment", "", false)
                .expect("optional"),
            ""
        );
    }

    #[test]
    fn rating_range_is_inclusive() {
        let policy = InputPolicy::default();
        assert_eq!(policy.check_rating(1).expect("min"), 1);
        assert_eq!(policy.check_rating(5).expect("max"), 5);
        assert!(policy.check_rating(0).is_err());
        assert!(policy.check_rating(6).is_err());
        assert!(policy.check_rating(-3).is_err());
        assert!(policy.check_rating(300).is_err());

        let wide = InputPolicy {
            rating: RatingConfig { min: 1, max: 10 },
            ..InputPolicy::default()
        };
        assert_eq!(wide.check_rating(10).expect("wide"), 10);
    }

    #[test]
    fn scrub_cleans_derived_fields() {
        let result = ClassificationResult {
            label: SentimentLabel::Neutral,
            score: 0.0,
            emotion: "calm|ish".to_string(),
            key_phrases: vec!["a;b".to_string(), " | ".to_string()],
        };
        let scrubbed = scrub_classification(result);
        assert_eq!(scrubbed.emotion, "calm ish");
        assert_eq!(scrubbed.key_phrases, vec!["a,b".to_string()]);
    }
}
