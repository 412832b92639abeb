//! Sentence-level key phrase extraction.

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split `text` into sentences and keep those with at least `min_words`
/// words, in order, up to `limit` phrases.
///
/// Returned phrases never contain the record (`|`) or list (`;`) separators
/// of the backing file.
pub fn extract_key_phrases(text: &str, min_words: usize, limit: usize) -> Vec<String> {
    text.split(SENTENCE_TERMINATORS)
        .map(clean_phrase)
        .filter(|phrase| !phrase.is_empty() && phrase.split_whitespace().count() >= min_words)
        .take(limit)
        .collect()
}

fn clean_phrase(sentence: &str) -> String {
    let replaced: String = sentence
        .chars()
        .map(|ch| match ch {
            ';' => ',',
            '|' | '\r' | '\n' => ' ',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
