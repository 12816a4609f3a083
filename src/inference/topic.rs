use std::path::Path;
use tracing::{debug, info};

use crate::persistence::{ModelPersistence, PersistenceError, PersistentModel};
use crate::preprocessing::Preprocessor;
use crate::topic::{topic_label, Dictionary, LdaModel};

/// Topics below this probability are ignored.
pub const MINIMUM_TOPIC_PROBABILITY: f64 = 0.1;
/// Keywords reported for the dominant topic.
pub const KEYWORD_COUNT: usize = 5;

pub const IRRELEVANT_TOPIC: &str = "Topik Tidak Relevan";
pub const EMPTY_TEXT_DETAIL: &str = "Teks kosong setelah pra-pemrosesan.";
pub const NO_MATCH_DETAIL: &str = "Tidak ada topik yang cocok ditemukan.";

/// Dominant topic of one document.
#[derive(Clone, Debug, PartialEq)]
pub struct TopicPrediction {
    pub label: String,
    pub keywords: String,
    pub confidence: f64,
}

impl TopicPrediction {
    fn irrelevant(detail: &str) -> Self {
        Self { label: IRRELEVANT_TOPIC.to_string(), keywords: detail.to_string(), confidence: 0.0 }
    }
}

/// LDA model with its vocabulary.
#[derive(Clone, Debug)]
pub struct TopicEngine {
    lda: LdaModel,
    dictionary: Dictionary,
}

impl TopicEngine {
    pub fn new(lda: LdaModel, dictionary: Dictionary) -> Result<Self, PersistenceError> {
        if dictionary.len() > lda.num_terms() {
            return Err(PersistenceError::InvalidModel(format!(
                "dictionary has {} terms but the model only {}",
                dictionary.len(),
                lda.num_terms()
            )));
        }
        Ok(Self { lda, dictionary })
    }

    pub fn load(model_path: &Path, dictionary_path: &Path) -> Result<Self, PersistenceError> {
        let (lda, metadata) = LdaModel::load(model_path)?;
        let dictionary: Dictionary = ModelPersistence::load(dictionary_path)?;
        info!(
            model = %metadata.model_name,
            topics = lda.num_topics(),
            terms = dictionary.len(),
            "loaded topic model"
        );
        Self::new(lda, dictionary)
    }

    pub fn lda(&self) -> &LdaModel {
        &self.lda
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Comma-separated top words of a topic.
    pub fn keywords(&self, topic: usize, topn: usize) -> String {
        self.lda
            .top_terms(topic, topn)
            .into_iter()
            .filter_map(|(id, _)| self.dictionary.token(id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Infer the dominant topic of text already through [`Preprocessor::for_topic`].
    pub fn classify(&self, cleaned: &str) -> TopicPrediction {
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.is_empty() {
            return TopicPrediction::irrelevant(EMPTY_TEXT_DETAIL);
        }

        let bow = self.dictionary.doc2bow(&tokens);
        let topics = self.lda.document_topics(&bow, MINIMUM_TOPIC_PROBABILITY);
        // Topics arrive in id order; keeping the first maximum breaks ties by lowest id.
        let dominant = topics.iter().fold(None, |best: Option<(usize, f64)>, &(topic, prob)| match best {
            Some((_, best_prob)) if best_prob >= prob => best,
            _ => Some((topic, prob)),
        });

        match dominant {
            Some((topic, confidence)) => {
                debug!(topic, confidence, known_terms = bow.len(), "topic prediction");
                TopicPrediction {
                    label: topic_label(topic),
                    keywords: self.keywords(topic, KEYWORD_COUNT),
                    confidence,
                }
            }
            None => TopicPrediction::irrelevant(NO_MATCH_DETAIL),
        }
    }

    /// Pre-process raw text and infer its topic.
    pub fn predict(&self, preprocessor: &Preprocessor, text: &str) -> TopicPrediction {
        self.classify(&preprocessor.for_topic(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn engine() -> TopicEngine {
        let lda = LdaModel::new(
            arr1(&[0.1, 0.1]),
            arr2(&[
                [50.0, 40.0, 30.0, 0.1, 0.1, 0.1],
                [0.1, 0.1, 0.1, 45.0, 35.0, 25.0],
            ]),
        );
        let dictionary = Dictionary::from_tokens(["samsat", "kantor", "antri", "bayar", "pajak", "tahun"]);
        TopicEngine::new(lda, dictionary).unwrap()
    }

    #[test]
    fn test_empty_text_sentinel() {
        let prediction = engine().classify("");
        assert_eq!(prediction.label, "Topik Tidak Relevan");
        assert_eq!(prediction.keywords, "Teks kosong setelah pra-pemrosesan.");
        assert_eq!(prediction.confidence, 0.0);
    }

    #[test]
    fn test_dominant_topic_and_keywords() {
        let prediction = engine().classify("bayar pajak pajak tahun");
        assert_eq!(prediction.label, "Urusan di Kantor Samsat");
        assert_eq!(prediction.keywords, "bayar, pajak, tahun, samsat, kantor");
        assert!(prediction.confidence >= MINIMUM_TOPIC_PROBABILITY && prediction.confidence <= 1.0);
    }

    #[test]
    fn test_unknown_words_fall_back_to_prior() {
        // No known term: gamma stays at the symmetric prior, both topics tie at 0.5.
        let prediction = engine().classify("zzz qqq");
        assert_eq!(prediction.label, "Keluhan Lamanya Proses Aplikasi");
        assert!((prediction.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_topic_above_floor() {
        let lda = LdaModel::new(arr1(&[1.0; 12]), ndarray::Array2::from_elem((12, 2), 1.0));
        let engine = TopicEngine::new(lda, Dictionary::from_tokens(["a", "b"])).unwrap();
        let prediction = engine.classify("a b");
        assert_eq!(prediction.label, "Topik Tidak Relevan");
        assert_eq!(prediction.keywords, "Tidak ada topik yang cocok ditemukan.");
        assert_eq!(prediction.confidence, 0.0);
    }
}
