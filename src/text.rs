//! Word-level tokenization and label decoding for the sentiment classifier.
//!
//! Provides the fitted word index that turns cleaned text into id sequences,
//! fixed-length padding, and the class-index ↔ label mapping.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Characters replaced by spaces before splitting.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

fn default_filters() -> String {
    DEFAULT_FILTERS.to_string()
}

fn default_lower() -> bool {
    true
}

/// Fitted word-level tokenizer.
///
/// Ids start at 1; 0 is reserved for padding. When `num_words` is set only
/// ids below it are kept.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SequenceTokenizer {
    word_index: HashMap<String, usize>,
    #[serde(default)]
    num_words: Option<usize>,
    #[serde(default)]
    oov_token: Option<String>,
    #[serde(default = "default_filters")]
    filters: String,
    #[serde(default = "default_lower")]
    lower: bool,
}

impl SequenceTokenizer {
    /// Create a tokenizer from an existing word index.
    pub fn from_word_index(word_index: HashMap<String, usize>) -> Self {
        Self {
            word_index,
            num_words: None,
            oov_token: None,
            filters: default_filters(),
            lower: true,
        }
    }

    /// Fit a word index on texts, most frequent words first.
    ///
    /// Ties keep first-seen order. With an OOV token it takes id 1.
    pub fn fit_on_texts<S: AsRef<str>>(texts: &[S], oov_token: Option<&str>) -> Self {
        let mut tokenizer = Self::from_word_index(HashMap::new());
        tokenizer.oov_token = oov_token.map(str::to_string);

        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for word in tokenizer.split(text.as_ref()) {
                match positions.get(&word) {
                    Some(&pos) => counts[pos].1 += 1,
                    None => {
                        positions.insert(word.clone(), counts.len());
                        counts.push((word, 1));
                    }
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut next_id = 1;
        if let Some(oov) = oov_token {
            tokenizer.word_index.insert(oov.to_string(), next_id);
            next_id += 1;
        }
        for (word, _) in counts {
            if !tokenizer.word_index.contains_key(&word) {
                tokenizer.word_index.insert(word, next_id);
                next_id += 1;
            }
        }
        tokenizer
    }

    pub fn with_num_words(mut self, num_words: usize) -> Self {
        self.num_words = Some(num_words);
        self
    }

    /// Number of entries in the word index.
    pub fn size(&self) -> usize {
        self.word_index.len()
    }

    /// Get id for a word.
    pub fn word_to_index(&self, word: &str) -> Option<usize> {
        self.word_index.get(word).copied()
    }

    fn oov_index(&self) -> Option<usize> {
        self.oov_token.as_ref().and_then(|token| self.word_to_index(token))
    }

    fn split(&self, text: &str) -> Vec<String> {
        let text = if self.lower { text.to_lowercase() } else { text.to_string() };
        let cleaned: String = text
            .chars()
            .map(|ch| if self.filters.contains(ch) { ' ' } else { ch })
            .collect();
        cleaned.split(' ').filter(|w| !w.is_empty()).map(str::to_string).collect()
    }

    /// Encode text to ids, dropping or OOV-mapping unknown words.
    pub fn texts_to_sequence(&self, text: &str) -> Vec<usize> {
        let oov = self.oov_index();
        self.split(text)
            .iter()
            .filter_map(|word| match self.word_to_index(word) {
                Some(id) => match self.num_words {
                    Some(limit) if id >= limit => oov,
                    _ => Some(id),
                },
                None => oov,
            })
            .collect()
    }
}

/// Pad or truncate at the end to exactly `max_len` ids; pads with 0.
pub fn pad_sequence(ids: &[usize], max_len: usize) -> Vec<usize> {
    let mut padded: Vec<usize> = ids.iter().take(max_len).copied().collect();
    padded.resize(max_len, 0);
    padded
}

/// Maps class indices to their label strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Classes are stored sorted, so index order is alphabetical.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    pub fn inverse_transform(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_orders_by_frequency() {
        let tokenizer = SequenceTokenizer::fit_on_texts(&["bayar pajak", "pajak samsat pajak"], None);
        assert_eq!(tokenizer.word_to_index("pajak"), Some(1));
        assert_eq!(tokenizer.word_to_index("bayar"), Some(2));
        assert_eq!(tokenizer.word_to_index("samsat"), Some(3));
    }

    #[test]
    fn test_texts_to_sequence_filters_punctuation() {
        let tokenizer = SequenceTokenizer::fit_on_texts(&["bayar pajak"], None);
        assert_eq!(tokenizer.texts_to_sequence("Bayar, pajak! lagi"), vec![1, 2]);
    }

    #[test]
    fn test_oov_and_num_words() {
        let tokenizer = SequenceTokenizer::fit_on_texts(&["a a a b b c"], Some("<OOV>")).with_num_words(3);
        // <OOV>=1, a=2, b=3, c=4; ids >= 3 become OOV
        assert_eq!(tokenizer.texts_to_sequence("a b c zzz"), vec![2, 1, 1, 1]);
    }

    #[test]
    fn test_pad_sequence_post() {
        assert_eq!(pad_sequence(&[3, 4], 4), vec![3, 4, 0, 0]);
        assert_eq!(pad_sequence(&[1, 2, 3, 4, 5], 3), vec![1, 2, 3]);
        assert_eq!(pad_sequence(&[], 2), vec![0, 0]);
    }

    #[test]
    fn test_label_encoder_sorted_classes() {
        let encoder = LabelEncoder::new(["Positif", "Negatif", "Netral"]);
        assert_eq!(encoder.inverse_transform(0), Some("Negatif"));
        assert_eq!(encoder.inverse_transform(2), Some("Positif"));
        assert_eq!(encoder.transform("Netral"), Some(1));
        assert_eq!(encoder.inverse_transform(3), None);
    }
}
