//! Word-list sentiment classifier tuned for course feedback.
//!
//! Scoring walks the lowercased tokens of a comment. Every lexicon hit adds
//! its weight, scaled by the last intensifier seen and inverted (with damping)
//! when a negation occurred within the preceding window. The score is the
//! mean of all hits, clamped to [-1, 1] and rounded to two decimals.

use crate::phrases::extract_key_phrases;
use crate::{ClassificationResult, Classifier, ClassifierError, SentimentLabel};
use feedback_rs_config::ClassifierConfig;
use log::debug;
use std::collections::HashMap;

/// Emotion tag used when no emotion keyword matches.
pub const NO_EMOTION: &str = "none";

/// Tokens after a negation that still get inverted.
const NEGATION_WINDOW: usize = 3;
/// Multiplier applied to a negated hit.
const NEGATION_DAMPING: f64 = -0.8;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("excellent", 0.9),
    ("outstanding", 0.9),
    ("amazing", 0.85),
    ("fantastic", 0.85),
    ("wonderful", 0.85),
    ("best", 0.8),
    ("brilliant", 0.8),
    ("love", 0.75),
    ("loved", 0.75),
    ("awesome", 0.75),
    ("great", 0.7),
    ("inspiring", 0.7),
    ("enjoy", 0.65),
    ("enjoyed", 0.65),
    ("engaging", 0.65),
    ("helpful", 0.6),
    ("insightful", 0.6),
    ("useful", 0.55),
    ("clear", 0.5),
    ("good", 0.5),
    ("interesting", 0.5),
    ("organized", 0.45),
    ("nice", 0.45),
    ("fun", 0.45),
    ("recommend", 0.45),
    ("learned", 0.4),
    ("thanks", 0.35),
    ("thank", 0.35),
    ("fine", 0.1),
    ("okay", 0.05),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("worst", -0.9),
    ("terrible", -0.85),
    ("awful", -0.85),
    ("horrible", -0.85),
    ("useless", -0.8),
    ("hate", -0.75),
    ("hated", -0.75),
    ("waste", -0.7),
    ("poor", -0.6),
    ("bad", -0.55),
    ("boring", -0.55),
    ("confusing", -0.5),
    ("disorganized", -0.5),
    ("unclear", -0.45),
    ("frustrating", -0.6),
    ("difficult", -0.35),
    ("hard", -0.3),
    ("slow", -0.3),
    ("rushed", -0.35),
    ("late", -0.25),
];

const MODIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.8),
    ("incredibly", 1.7),
    ("absolutely", 1.6),
    ("very", 1.5),
    ("super", 1.5),
    ("really", 1.4),
    ("highly", 1.4),
    ("quite", 1.2),
    ("somewhat", 0.8),
    ("fairly", 0.8),
    ("slightly", 0.7),
    ("barely", 0.6),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "hardly", "dont", "don't", "didnt", "didn't", "isnt",
    "isn't", "wasnt", "wasn't", "werent", "weren't", "cant", "can't", "couldnt", "couldn't",
    "wont", "won't", "arent", "aren't",
];

/// Emotion families, matched by token prefix. Declaration order breaks ties.
const EMOTIONS: &[(&str, &[&str])] = &[
    (
        "joy",
        &[
            "love", "enjoy", "amazing", "wonderful", "great", "excellent", "best", "fantastic",
            "awesome",
        ],
    ),
    ("gratitude", &["thank", "grateful", "appreciat", "helpful"]),
    (
        "frustration",
        &["terrible", "worst", "waste", "hate", "annoy", "frustrat", "bad", "poor", "awful"],
    ),
    ("confusion", &["confus", "unclear", "difficult", "hard", "lost"]),
    ("boredom", &["boring", "bored", "dull", "tedious", "slow"]),
    (
        "indifference",
        &["okay", "ok", "fine", "average", "normal", "regular", "usual", "standard"],
    ),
];

/// Default classifier used by the `feedback` binary.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    words: HashMap<&'static str, f64>,
    modifiers: HashMap<&'static str, f64>,
    config: ClassifierConfig,
}

impl LexiconClassifier {
    /// Build a classifier with the built-in word lists.
    pub fn new(config: ClassifierConfig) -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS.iter())
            .copied()
            .collect();
        let modifiers = MODIFIERS.iter().copied().collect();
        Self {
            words,
            modifiers,
            config,
        }
    }

    /// Mean lexicon score of the tokens, clamped and rounded.
    fn score(&self, tokens: &[String]) -> f64 {
        let mut total = 0.0;
        let mut hits = 0usize;
        let mut modifier = 1.0;
        let mut since_negation: Option<usize> = None;

        for token in tokens {
            let token = token.as_str();
            if NEGATIONS.contains(&token) {
                since_negation = Some(0);
                continue;
            }
            if let Some(multiplier) = self.modifiers.get(token) {
                modifier = *multiplier;
                continue;
            }
            if let Some(weight) = self.words.get(token) {
                let mut value = weight * modifier;
                if since_negation.is_some_and(|count| count < NEGATION_WINDOW) {
                    value *= NEGATION_DAMPING;
                }
                total += value;
                hits += 1;
                modifier = 1.0;
            }
            since_negation = since_negation
                .map(|count| count + 1)
                .filter(|count| *count < NEGATION_WINDOW);
        }

        if hits == 0 {
            return 0.0;
        }
        let mean = (total / hits as f64).clamp(-1.0, 1.0);
        (mean * 100.0).round() / 100.0
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let len = text.chars().count();
        if len > self.config.max_input_chars {
            return Err(ClassifierError::InputTooLong {
                len,
                max: self.config.max_input_chars,
            });
        }
        if let Some(ch) = text.chars().find(|ch| ch.is_control() && !ch.is_whitespace()) {
            return Err(ClassifierError::UnsupportedText(format!(
                "control character U+{:04X}",
                u32::from(ch)
            )));
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(ClassificationResult::neutral());
        }
        let score = self.score(&tokens);
        let label = SentimentLabel::from_score(
            score,
            self.config.positive_threshold,
            self.config.negative_threshold,
        );
        let emotion = dominant_emotion(&tokens);
        let key_phrases = extract_key_phrases(
            text,
            self.config.min_phrase_words,
            self.config.max_key_phrases,
        );
        debug!(
            "classified comment (tokens={}, score={score}, label={label}, emotion={emotion})",
            tokens.len()
        );
        Ok(ClassificationResult {
            label,
            score,
            emotion: emotion.to_string(),
            key_phrases,
        })
    }
}

/// Lowercased word tokens; apostrophes stay inside words.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
        .map(|token| token.trim_matches('\'').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Emotion family with the most prefix hits.
fn dominant_emotion(tokens: &[String]) -> &'static str {
    let mut best = (NO_EMOTION, 0usize);
    for (emotion, stems) in EMOTIONS {
        let hits = tokens
            .iter()
            .filter(|token| stems.iter().any(|stem| token.starts_with(*stem)))
            .count();
        if hits > best.1 {
            best = (*emotion, hits);
        }
    }
    best.0
}
