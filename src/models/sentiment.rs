use ndarray::{Array1, Array2, Axis};
use crate::layers::bilstm_network::BiLSTMNetwork;
use crate::layers::embedding::Embedding;
use crate::layers::linear::LinearLayer;
use crate::models::lstm_network::LSTMNetwork;
use crate::utils::softmax;

/// Recurrent body of the classifier
#[derive(Clone, Debug)]
pub enum SequenceEncoder {
    /// Stacked unidirectional LSTM
    Lstm(LSTMNetwork),
    /// Stacked bidirectional LSTM
    BiLstm(BiLSTMNetwork),
}

impl SequenceEncoder {
    pub fn output_size(&self) -> usize {
        match self {
            SequenceEncoder::Lstm(network) => network.hidden_size,
            SequenceEncoder::BiLstm(network) => network.output_size(),
        }
    }

    pub fn input_size(&self) -> usize {
        match self {
            SequenceEncoder::Lstm(network) => network.input_size,
            SequenceEncoder::BiLstm(network) => network.input_size,
        }
    }

    fn encode(&self, sequence: &[Array2<f64>]) -> Array2<f64> {
        match self {
            SequenceEncoder::Lstm(network) => network.forward_final(sequence),
            SequenceEncoder::BiLstm(network) => network.forward_final(sequence),
        }
    }

    pub fn num_parameters(&self) -> usize {
        match self {
            SequenceEncoder::Lstm(network) => network.num_parameters(),
            SequenceEncoder::BiLstm(network) => network.num_parameters(),
        }
    }
}

/// Text classifier: embedding → recurrent encoder → dense softmax head.
///
/// Takes fixed-length id sequences of `max_len` and returns a probability
/// vector over the classes of the head.
#[derive(Clone, Debug)]
pub struct SentimentClassifier {
    pub embedding: Embedding,
    pub encoder: SequenceEncoder,
    pub head: LinearLayer,
    pub max_len: usize,
}

impl SentimentClassifier {
    pub fn new(embedding: Embedding, encoder: SequenceEncoder, head: LinearLayer, max_len: usize) -> Self {
        assert_eq!(embedding.embed_dim(), encoder.input_size(), "Embedding width must match encoder input");
        assert_eq!(encoder.output_size(), head.input_size, "Encoder output must match head input");
        Self { embedding, encoder, head, max_len }
    }

    pub fn num_classes(&self) -> usize {
        self.head.output_size
    }

    /// Class probabilities for one padded id sequence
    pub fn predict_proba(&self, ids: &[usize]) -> Array1<f64> {
        let sequence = self.embedding.forward(ids);
        let encoded = self.encoder.encode(&sequence);
        let logits = self.head.forward(&encoded).index_axis_move(Axis(1), 0);
        softmax(&logits)
    }

    pub fn num_parameters(&self) -> usize {
        self.embedding.weight.len() + self.encoder.num_parameters() + self.head.num_parameters()
    }
}
