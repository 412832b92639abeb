//! Table rendering for feedback records and summaries.

use feedback_rs_store::{FeedbackRecord, SentimentSummary};
use tabled::{Table, Tabled};

/// Shown in place of an empty key phrase list.
const EMPTY_CELL: &str = "-";

#[derive(Tabled)]
struct FeedbackRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Student Name")]
    student_name: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Rating")]
    rating: u8,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Emotion")]
    emotion: String,
    #[tabled(rename = "Key Phrases")]
    key_phrases: String,
}

impl From<&FeedbackRecord> for FeedbackRow {
    fn from(record: &FeedbackRecord) -> Self {
        Self {
            id: record.id,
            student_name: record.student_name.clone(),
            course: record.course.clone(),
            rating: record.rating,
            comment: record.comment.clone(),
            sentiment: record.sentiment_label.to_string(),
            score: format!("{:.2}", record.sentiment_score),
            emotion: record.emotion.clone(),
            key_phrases: join_phrases(&record.key_phrases),
        }
    }
}

fn join_phrases(phrases: &[String]) -> String {
    if phrases.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        phrases.join("; ")
    }
}

/// One row per record, every field shown.
pub fn feedback_table<'a>(records: impl IntoIterator<Item = &'a FeedbackRecord>) -> String {
    let rows: Vec<FeedbackRow> = records.into_iter().map(FeedbackRow::from).collect();
    Table::new(rows).to_string()
}

#[derive(Tabled)]
struct LabelRow {
    #[tabled(rename = "Sentiment")]
    label: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Avg Score")]
    mean_score: String,
}

#[derive(Tabled)]
struct EmotionRow {
    #[tabled(rename = "Emotion")]
    emotion: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Per-label table, emotion table, and overall figures.
pub fn sentiment_report(summary: &SentimentSummary) -> String {
    let labels: Vec<LabelRow> = summary
        .labels
        .iter()
        .map(|label| LabelRow {
            label: label.label.to_string(),
            count: label.count,
            share: format!("{:.1}%", percent(label.count, summary.total)),
            mean_score: format!("{:.2}", label.mean_score),
        })
        .collect();
    let emotions: Vec<EmotionRow> = summary
        .emotions
        .iter()
        .map(|(emotion, count)| EmotionRow {
            emotion: emotion.clone(),
            count: *count,
        })
        .collect();

    let mut report = String::new();
    report.push_str(&Table::new(labels).to_string());
    report.push_str("\n\nEmotion Distribution:\n");
    report.push_str(&Table::new(emotions).to_string());
    report.push_str(&format!("\n\nTotal Entries: {}\n", summary.total));
    report.push_str(&format!(
        "Overall Average Sentiment Score: {:.2}\n",
        summary.overall_mean.unwrap_or(0.0)
    ));
    report
}

/// Share of `count` in `total` as a percentage, 0 when `total` is 0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}
