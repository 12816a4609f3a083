//! Text clean-up shared by the sentiment and topic pipelines.
//!
//! Both variants lowercase the text and substitute slang through the
//! normalization dictionary. The sentiment variant then removes general
//! Indonesian stopwords, the topic variant the curated topic list, and both
//! finish with the stemmer.

pub mod normalization;
pub mod stemmer;
pub mod stopwords;

pub use normalization::NormalizationDictionary;
pub use stemmer::{IndonesianStemmer, Stemmer};
pub use stopwords::StopWordRemover;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading pre-processing assets.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} is missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
}

/// Normalization dictionary, stemmer and both stopword lists.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    normalization: NormalizationDictionary,
    stemmer: IndonesianStemmer,
    stopwords: StopWordRemover,
    topic_stopwords: StopWordRemover,
}

impl Preprocessor {
    pub fn new(normalization: NormalizationDictionary, stemmer: IndonesianStemmer) -> Self {
        Self {
            normalization,
            stemmer,
            stopwords: StopWordRemover::indonesian(),
            topic_stopwords: StopWordRemover::topic(),
        }
    }

    /// Load the normalization CSV and, optionally, extra root words.
    pub fn load(normalization_path: &Path, root_words: Option<&Path>) -> Result<Self, AssetError> {
        let normalization = NormalizationDictionary::load(normalization_path)?;
        let stemmer = match root_words {
            Some(path) => IndonesianStemmer::with_root_file(path)
                .map_err(|e| AssetError::Io { path: path.to_path_buf(), source: e })?,
            None => IndonesianStemmer::default(),
        };
        info!(roots = stemmer.num_roots(), "pre-processing assets ready");
        Ok(Self::new(normalization, stemmer))
    }

    /// Lowercase and substitute informal tokens.
    pub fn normalize(&self, text: &str) -> String {
        self.normalization.apply(&text.to_lowercase())
    }

    /// Text fed to the sentiment classifier.
    pub fn for_sentiment(&self, text: &str) -> String {
        let normalized = self.normalize(text);
        self.stemmer.stem(&self.stopwords.remove(&normalized))
    }

    /// Text fed to the topic model.
    pub fn for_topic(&self, text: &str) -> String {
        let normalized = self.normalize(text);
        self.stemmer.stem(&self.topic_stopwords.remove(&normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Aplikasinya bagus dan sangat membantu sekali untuk bayar pajak tahunan, jadi tidak usah antri lagi di samsat.";

    fn preprocessor() -> Preprocessor {
        let normalization = NormalizationDictionary::new([("gak", "tidak"), ("apk", "aplikasi")]);
        Preprocessor::new(normalization, IndonesianStemmer::default())
    }

    #[test]
    fn test_normalize_lowercases_and_substitutes() {
        let p = preprocessor();
        assert_eq!(p.normalize("APK  ini Gak ribet"), "aplikasi ini tidak ribet");
    }

    #[test]
    fn test_sentiment_variant() {
        let p = preprocessor();
        assert_eq!(
            p.for_sentiment(SAMPLE),
            "aplikasi bagus sangat bantu kali bayar pajak tahun jadi usah antri samsat"
        );
    }

    #[test]
    fn test_topic_variant_drops_opinion_words() {
        let p = preprocessor();
        let cleaned = p.for_topic(SAMPLE);
        let words: Vec<&str> = cleaned.split(' ').collect();
        assert!(!words.contains(&"bagus"));
        assert!(!words.contains(&"jadi"));
        assert!(words.contains(&"bayar"));
        assert!(words.contains(&"samsat"));
    }

    #[test]
    fn test_stopword_only_text_is_empty() {
        let p = preprocessor();
        assert_eq!(p.for_sentiment("dan yang di"), "");
        assert_eq!(p.for_topic("bagus banget sih"), "");
    }

    #[test]
    fn test_sentiment_variant_is_stable() {
        let p = preprocessor();
        let once = p.for_sentiment(SAMPLE);
        assert_eq!(p.for_sentiment(&once), once);
    }
}
