//! Line codec for the backing file.
//!
//! One record per line, fields joined by `|` in the fixed order
//! `id|student|course|rating|comment|label|score|emotion|phrase1;phrase2`.
//! Decoding is strict: the field count must match exactly and every typed
//! field must convert without coercion.

use crate::error::ParseError;
use crate::model::FeedbackRecord;
use feedback_rs_classifier::SentimentLabel;
use feedback_rs_config::RatingConfig;
use std::str::FromStr;

/// Separator between fields of a record.
pub const FIELD_SEPARATOR: char = '|';
/// Separator between key phrases inside their field.
pub const PHRASE_SEPARATOR: char = ';';
/// Number of fields in every record line.
pub const FIELD_COUNT: usize = 9;

/// Encode a record as a single line, without the trailing newline.
pub fn encode_record(record: &FeedbackRecord) -> String {
    let phrases = record.key_phrases.join(&PHRASE_SEPARATOR.to_string());
    [
        record.id.to_string(),
        record.student_name.clone(),
        record.course.clone(),
        record.rating.to_string(),
        record.comment.clone(),
        record.sentiment_label.as_str().to_string(),
        record.sentiment_score.to_string(),
        record.emotion.clone(),
        phrases,
    ]
    .join(&FIELD_SEPARATOR.to_string())
}

/// Decode one line into a record, checking the rating against `rating`.
pub fn decode_line(line: &str, rating: RatingConfig) -> Result<FeedbackRecord, ParseError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [
        id,
        student_name,
        course,
        rating_field,
        comment,
        label,
        score,
        emotion,
        phrases,
    ] = fields.as_slice()
    else {
        return Err(ParseError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let id: u32 = parse_field("id", id)?;
    let student_name = non_empty("student name", student_name)?;
    let course = non_empty("course", course)?;
    let rating_value: u8 = parse_field("rating", rating_field)?;
    if !(rating.min..=rating.max).contains(&rating_value) {
        return Err(invalid(
            "rating",
            rating_field,
            format!("outside {}..={}", rating.min, rating.max),
        ));
    }
    let sentiment_label: SentimentLabel = parse_field("sentiment label", label)?;
    let sentiment_score: f64 = parse_field("sentiment score", score)?;
    if !(-1.0..=1.0).contains(&sentiment_score) {
        return Err(invalid("sentiment score", score, "outside [-1, 1]"));
    }
    let key_phrases = if phrases.is_empty() {
        Vec::new()
    } else {
        phrases
            .split(PHRASE_SEPARATOR)
            .map(str::to_string)
            .collect()
    };

    Ok(FeedbackRecord {
        id,
        student_name,
        course,
        rating: rating_value,
        comment: comment.to_string(),
        sentiment_label,
        sentiment_score,
        emotion: emotion.to_string(),
        key_phrases,
    })
}

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .parse::<T>()
        .map_err(|err| invalid(field, value, err.to_string()))
}

fn non_empty(field: &'static str, value: &str) -> Result<String, ParseError> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be empty"));
    }
    Ok(value.to_string())
}

fn invalid(field: &'static str, value: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{FIELD_COUNT, decode_line, encode_record};
    use crate::error::ParseError;
    use crate::model::FeedbackRecord;
    use feedback_rs_classifier::SentimentLabel;
    use feedback_rs_config::RatingConfig;
    use pretty_assertions::assert_eq;

    fn record() -> FeedbackRecord {
        FeedbackRecord {
            id: 1,
            student_name: "Alice".to_string(),
            course: "CS101".to_string(),
            rating: 5,
            comment: "Great course!".to_string(),
            sentiment_label: SentimentLabel::Positive,
            sentiment_score: 0.7,
            emotion: "joy".to_string(),
            key_phrases: vec!["labs were well run".to_string(), "tests were fair".to_string()],
        }
    }

    #[test]
    fn encodes_fields_in_fixed_order() {
        assert_eq!(
            encode_record(&record()),
            "1|Alice|CS101|5|Great course!|positive|0.7|joy|labs were well run;tests were fair"
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let original = record();
        let decoded =
            decode_line(&encode_record(&original), RatingConfig::default()).expect("decode");
        assert_eq!(decoded, original);

        let bare = FeedbackRecord {
            comment: String::new(),
            emotion: String::new(),
            key_phrases: Vec::new(),
            sentiment_score: -0.33,
            ..record()
        };
        let decoded = decode_line(&encode_record(&bare), RatingConfig::default()).expect("decode");
        assert_eq!(decoded, bare);
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let line = format!("{}\r", encode_record(&record()));
        assert_eq!(
            decode_line(&line, RatingConfig::default()).expect("decode"),
            record()
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = decode_line("1|Alice|CS101|5", RatingConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCount {
                expected: FIELD_COUNT,
                found: 4
            }
        );
        let err = decode_line(
            "1|Alice|CS101|5|a|b|positive|0.1|joy|",
            RatingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { found: 10, .. }));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = decode_line("x|Alice|CS101|5||neutral|0|none|", RatingConfig::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "id", .. }));

        let err = decode_line("1|Alice|CS101|5||neutral|high|none|", RatingConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "sentiment score",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let err = decode_line("1|Alice|CS101|9||neutral|0|none|", RatingConfig::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "rating", .. }));

        let wide = RatingConfig { min: 1, max: 10 };
        assert!(decode_line("1|Alice|CS101|9||neutral|0|none|", wide).is_ok());
    }

    #[test]
    fn rejects_unknown_label_and_empty_names() {
        let err =
            decode_line("1|Alice|CS101|3||meh|0|none|", RatingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "sentiment label",
                ..
            }
        ));
        let err = decode_line("1| |CS101|3||neutral|0|none|", RatingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidField {
                field: "student name",
                ..
            }
        ));
    }
}
