use std::path::Path;
use tracing::{debug, info};

use crate::models::sentiment::SentimentClassifier;
use crate::persistence::{ModelPersistence, PersistenceError, PersistentModel};
use crate::preprocessing::Preprocessor;
use crate::text::{pad_sequence, LabelEncoder, SequenceTokenizer};
use crate::utils::argmax;

/// Label returned when nothing survives pre-processing.
pub const NEUTRAL_LABEL: &str = "Netral";
/// Confidence paired with [`NEUTRAL_LABEL`] for empty input.
pub const EMPTY_TEXT_CONFIDENCE: f64 = 0.5;

/// Classifier with the tokenizer and label encoder it was trained with.
#[derive(Clone, Debug)]
pub struct SentimentEngine {
    classifier: SentimentClassifier,
    tokenizer: SequenceTokenizer,
    labels: LabelEncoder,
}

impl SentimentEngine {
    pub fn new(classifier: SentimentClassifier, tokenizer: SequenceTokenizer, labels: LabelEncoder) -> Result<Self, PersistenceError> {
        if labels.classes().len() != classifier.num_classes() {
            return Err(PersistenceError::InvalidModel(format!(
                "label encoder has {} classes but classifier outputs {}",
                labels.classes().len(),
                classifier.num_classes()
            )));
        }
        Ok(Self { classifier, tokenizer, labels })
    }

    /// Load all three artifacts; any failure leaves no engine at all.
    pub fn load(model_path: &Path, tokenizer_path: &Path, labels_path: &Path) -> Result<Self, PersistenceError> {
        let (classifier, metadata) = SentimentClassifier::load(model_path)?;
        let tokenizer: SequenceTokenizer = ModelPersistence::load(tokenizer_path)?;
        let labels: LabelEncoder = ModelPersistence::load(labels_path)?;
        info!(
            model = %metadata.model_name,
            parameters = classifier.num_parameters(),
            vocabulary = tokenizer.size(),
            classes = ?labels.classes(),
            "loaded sentiment model"
        );
        Self::new(classifier, tokenizer, labels)
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    /// Classify text that has already been through [`Preprocessor::for_sentiment`].
    pub fn classify(&self, cleaned: &str) -> (String, f64) {
        if cleaned.trim().is_empty() {
            return (NEUTRAL_LABEL.to_string(), EMPTY_TEXT_CONFIDENCE);
        }
        let ids = pad_sequence(&self.tokenizer.texts_to_sequence(cleaned), self.classifier.max_len);
        let probabilities = self.classifier.predict_proba(&ids);
        let class = argmax(&probabilities);
        let confidence = probabilities[class];
        let label = self
            .labels
            .inverse_transform(class)
            .map(str::to_string)
            .unwrap_or_else(|| NEUTRAL_LABEL.to_string());
        debug!(%label, confidence, "sentiment prediction");
        (label, confidence)
    }

    /// Pre-process raw text and classify it.
    pub fn predict(&self, preprocessor: &Preprocessor, text: &str) -> (String, f64) {
        self.classify(&preprocessor.for_sentiment(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::embedding::Embedding;
    use crate::layers::linear::LinearLayer;
    use crate::models::lstm_network::LSTMNetwork;
    use crate::models::sentiment::SequenceEncoder;
    use ndarray::Array2;

    fn engine() -> SentimentEngine {
        let embedding = Embedding::new(10, 3);
        let encoder = SequenceEncoder::Lstm(LSTMNetwork::new(3, 4, 1));
        // zero weights with a biased head make the Positif class win regardless of input
        let head = LinearLayer::from_weights(Array2::zeros((3, 4)), ndarray::arr2(&[[0.0], [0.0], [2.0]]));
        let classifier = SentimentClassifier::new(embedding, encoder, head, 6);
        let tokenizer = SequenceTokenizer::fit_on_texts(&["bayar pajak samsat"], Some("<OOV>"));
        let labels = LabelEncoder::new(["Positif", "Netral", "Negatif"]);
        SentimentEngine::new(classifier, tokenizer, labels).unwrap()
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(engine().classify("   "), ("Netral".to_string(), 0.5));
    }

    #[test]
    fn test_argmax_maps_through_label_encoder() {
        let (label, confidence) = engine().classify("bayar pajak");
        assert_eq!(label, "Positif");
        assert!(confidence > 1.0 / 3.0 && confidence <= 1.0);
    }

    #[test]
    fn test_class_count_mismatch_is_rejected() {
        let classifier = engine().classifier.clone();
        let tokenizer = SequenceTokenizer::fit_on_texts(&["a"], None);
        let result = SentimentEngine::new(classifier, tokenizer, LabelEncoder::new(["Positif", "Negatif"]));
        assert!(result.is_err());
    }
}
