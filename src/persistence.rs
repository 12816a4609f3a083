use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use ndarray::{Array1, Array2, Dimension};
use std::fs::File;
use std::io::{Write, Read};
use std::path::Path;
use thiserror::Error;

use crate::layers::bilstm_network::{BiLSTMNetwork, CombineMode};
use crate::layers::embedding::Embedding;
use crate::layers::linear::LinearLayer;
use crate::layers::lstm_cell::LSTMCell;
use crate::models::lstm_network::LSTMNetwork;
use crate::models::sentiment::{SentimentClassifier, SequenceEncoder};
use crate::topic::LdaModel;

/// Errors that can occur during model persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(error: serde_json::Error) -> Self {
        PersistenceError::SerializationError(error.to_string())
    }
}

impl From<bincode::Error> for PersistenceError {
    fn from(error: bincode::Error) -> Self {
        PersistenceError::SerializationError(error.to_string())
    }
}

/// Serializable version of Array2<f64> for persistence
#[derive(Serialize, Deserialize)]
struct SerializableArray2 {
    data: Vec<f64>,
    shape: (usize, usize),
}

impl From<&Array2<f64>> for SerializableArray2 {
    fn from(array: &Array2<f64>) -> Self {
        Self {
            data: array.iter().cloned().collect(),
            shape: array.raw_dim().into_pattern(),
        }
    }
}

impl TryFrom<SerializableArray2> for Array2<f64> {
    type Error = PersistenceError;

    fn try_from(array: SerializableArray2) -> Result<Self, Self::Error> {
        let shape = array.shape;
        Array2::from_shape_vec(shape, array.data)
            .map_err(|e| PersistenceError::InvalidModel(format!("array of shape {:?}: {}", shape, e)))
    }
}

/// Serializable LSTM cell parameters
#[derive(Serialize, Deserialize)]
pub struct SerializableLSTMCell {
    w_ih: SerializableArray2,
    w_hh: SerializableArray2,
    b_ih: SerializableArray2,
    b_hh: SerializableArray2,
    hidden_size: usize,
}

impl From<&LSTMCell> for SerializableLSTMCell {
    fn from(cell: &LSTMCell) -> Self {
        Self {
            w_ih: (&cell.w_ih).into(),
            w_hh: (&cell.w_hh).into(),
            b_ih: (&cell.b_ih).into(),
            b_hh: (&cell.b_hh).into(),
            hidden_size: cell.hidden_size,
        }
    }
}

impl TryFrom<SerializableLSTMCell> for LSTMCell {
    type Error = PersistenceError;

    fn try_from(cell: SerializableLSTMCell) -> Result<Self, Self::Error> {
        let w_ih: Array2<f64> = cell.w_ih.try_into()?;
        let w_hh: Array2<f64> = cell.w_hh.try_into()?;
        let b_ih: Array2<f64> = cell.b_ih.try_into()?;
        let b_hh: Array2<f64> = cell.b_hh.try_into()?;
        let gates = 4 * cell.hidden_size;

        if w_ih.nrows() != gates
            || w_hh.dim() != (gates, cell.hidden_size)
            || b_ih.dim() != (gates, 1)
            || b_hh.dim() != (gates, 1)
        {
            return Err(PersistenceError::InvalidModel(format!(
                "LSTM cell weights do not match hidden size {}", cell.hidden_size
            )));
        }

        Ok(LSTMCell::from_weights(w_ih, w_hh, b_ih, b_hh))
    }
}

fn cells_from(cells: Vec<SerializableLSTMCell>) -> Result<Vec<LSTMCell>, PersistenceError> {
    cells.into_iter().map(LSTMCell::try_from).collect()
}

/// Checks that stacked cells chain: layer 0 reads `input_size`, later
/// layers read `upper_input_size`, and every cell has `hidden_size` units.
fn check_stack(
    cells: &[LSTMCell],
    input_size: usize,
    upper_input_size: usize,
    hidden_size: usize,
) -> Result<(), PersistenceError> {
    if cells.is_empty() {
        return Err(PersistenceError::InvalidModel("encoder has no layers".to_string()));
    }
    for (layer, cell) in cells.iter().enumerate() {
        let expected_input = if layer == 0 { input_size } else { upper_input_size };
        if cell.hidden_size != hidden_size {
            return Err(PersistenceError::InvalidModel(format!(
                "layer {} has hidden size {}, encoder declares {}", layer, cell.hidden_size, hidden_size
            )));
        }
        if cell.input_size() != expected_input {
            return Err(PersistenceError::InvalidModel(format!(
                "layer {} reads {} inputs, expected {}", layer, cell.input_size(), expected_input
            )));
        }
    }
    Ok(())
}

/// Serializable recurrent encoder
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializableEncoder {
    Lstm {
        cells: Vec<SerializableLSTMCell>,
        input_size: usize,
        hidden_size: usize,
    },
    BiLstm {
        forward_cells: Vec<SerializableLSTMCell>,
        backward_cells: Vec<SerializableLSTMCell>,
        input_size: usize,
        hidden_size: usize,
        combine_mode: CombineMode,
    },
}

impl From<&SequenceEncoder> for SerializableEncoder {
    fn from(encoder: &SequenceEncoder) -> Self {
        match encoder {
            SequenceEncoder::Lstm(network) => SerializableEncoder::Lstm {
                cells: network.get_cells().iter().map(|cell| cell.into()).collect(),
                input_size: network.input_size,
                hidden_size: network.hidden_size,
            },
            SequenceEncoder::BiLstm(network) => SerializableEncoder::BiLstm {
                forward_cells: network.get_forward_cells().iter().map(|cell| cell.into()).collect(),
                backward_cells: network.get_backward_cells().iter().map(|cell| cell.into()).collect(),
                input_size: network.input_size,
                hidden_size: network.hidden_size,
                combine_mode: network.combine_mode,
            },
        }
    }
}

impl TryFrom<SerializableEncoder> for SequenceEncoder {
    type Error = PersistenceError;

    fn try_from(encoder: SerializableEncoder) -> Result<Self, Self::Error> {
        match encoder {
            SerializableEncoder::Lstm { cells, input_size, hidden_size } => {
                let cells = cells_from(cells)?;
                check_stack(&cells, input_size, hidden_size, hidden_size)?;
                let num_layers = cells.len();
                Ok(SequenceEncoder::Lstm(LSTMNetwork::from_cells(cells, input_size, hidden_size, num_layers)))
            }
            SerializableEncoder::BiLstm { forward_cells, backward_cells, input_size, hidden_size, combine_mode } => {
                let forward_cells = cells_from(forward_cells)?;
                let backward_cells = cells_from(backward_cells)?;
                if forward_cells.len() != backward_cells.len() {
                    return Err(PersistenceError::InvalidModel(
                        "BiLSTM directions have different depths".to_string(),
                    ));
                }
                let upper_input_size = BiLSTMNetwork::combined_size(combine_mode, hidden_size);
                check_stack(&forward_cells, input_size, upper_input_size, hidden_size)?;
                check_stack(&backward_cells, input_size, upper_input_size, hidden_size)?;
                Ok(SequenceEncoder::BiLstm(BiLSTMNetwork::from_cells(
                    forward_cells, backward_cells, input_size, hidden_size, combine_mode,
                )))
            }
        }
    }
}

/// Serializable sentiment classifier
#[derive(Serialize, Deserialize)]
pub struct SerializableClassifier {
    embedding: SerializableArray2,
    encoder: SerializableEncoder,
    head_weight: SerializableArray2,
    head_bias: SerializableArray2,
    max_len: usize,
}

impl From<&SentimentClassifier> for SerializableClassifier {
    fn from(classifier: &SentimentClassifier) -> Self {
        Self {
            embedding: (&classifier.embedding.weight).into(),
            encoder: (&classifier.encoder).into(),
            head_weight: (&classifier.head.weight).into(),
            head_bias: (&classifier.head.bias).into(),
            max_len: classifier.max_len,
        }
    }
}

impl TryFrom<SerializableClassifier> for SentimentClassifier {
    type Error = PersistenceError;

    fn try_from(saved: SerializableClassifier) -> Result<Self, Self::Error> {
        let embedding = Embedding::from_weights(saved.embedding.try_into()?);
        let encoder = SequenceEncoder::try_from(saved.encoder)?;
        let head_weight: Array2<f64> = saved.head_weight.try_into()?;
        let head_bias: Array2<f64> = saved.head_bias.try_into()?;

        if head_bias.dim() != (head_weight.nrows(), 1) {
            return Err(PersistenceError::InvalidModel("dense bias does not match weight rows".to_string()));
        }
        if embedding.embed_dim() != encoder.input_size() || encoder.output_size() != head_weight.ncols() {
            return Err(PersistenceError::InvalidModel(format!(
                "layer sizes do not chain: embedding {} → encoder {}/{} → dense {}",
                embedding.embed_dim(), encoder.input_size(), encoder.output_size(), head_weight.ncols()
            )));
        }
        if saved.max_len == 0 {
            return Err(PersistenceError::InvalidModel("max_len must be positive".to_string()));
        }

        Ok(SentimentClassifier::new(
            embedding,
            encoder,
            LinearLayer::from_weights(head_weight, head_bias),
            saved.max_len,
        ))
    }
}

/// Serializable LDA parameters
#[derive(Serialize, Deserialize)]
pub struct SerializableLda {
    alpha: Vec<f64>,
    lambda: SerializableArray2,
}

impl From<&LdaModel> for SerializableLda {
    fn from(model: &LdaModel) -> Self {
        Self {
            alpha: model.alpha().to_vec(),
            lambda: model.lambda().into(),
        }
    }
}

impl TryFrom<SerializableLda> for LdaModel {
    type Error = PersistenceError;

    fn try_from(saved: SerializableLda) -> Result<Self, Self::Error> {
        let lambda: Array2<f64> = saved.lambda.try_into()?;
        if saved.alpha.len() != lambda.nrows() {
            return Err(PersistenceError::InvalidModel(format!(
                "alpha has {} entries for {} topics", saved.alpha.len(), lambda.nrows()
            )));
        }
        if lambda.iter().any(|&v| !(v > 0.0)) || saved.alpha.iter().any(|&a| !(a > 0.0)) {
            return Err(PersistenceError::InvalidModel("LDA parameters must be positive".to_string()));
        }
        Ok(LdaModel::new(Array1::from(saved.alpha), lambda))
    }
}

/// Model metadata for tracking where an artifact came from
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelMetadata {
    pub model_name: String,
    pub version: String,
    pub created_at: String,
    pub accuracy: Option<f64>,
    pub description: Option<String>,
}

impl ModelMetadata {
    /// Metadata stamped with the crate version and the current time
    pub fn new(model_name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            model_name: model_name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            accuracy: None,
            description,
        }
    }
}

/// Complete saved artifact: parameters plus metadata
#[derive(Serialize, Deserialize)]
pub struct SavedModel<T> {
    pub model: T,
    pub metadata: ModelMetadata,
}

/// Serialization format chosen from the file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Binary,
}

impl ArtifactFormat {
    /// `.json` is JSON; `.bin`, `.model` and anything else is bincode
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => ArtifactFormat::Json,
            _ => ArtifactFormat::Binary,
        }
    }
}

/// Read/write operations shared by every artifact
pub struct ModelPersistence;

impl ModelPersistence {
    /// Save a value to JSON format (human-readable)
    pub fn save_to_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(value)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a value from JSON format
    pub fn load_from_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, PersistenceError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save a value to binary format (compact and fast)
    pub fn save_to_binary<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), PersistenceError> {
        let encoded = bincode::serialize(value)?;
        let mut file = File::create(path)?;
        file.write_all(&encoded)?;
        Ok(())
    }

    /// Load a value from binary format
    pub fn load_from_binary<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, PersistenceError> {
        let mut file = File::open(path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(bincode::deserialize(&contents)?)
    }

    /// Save with the format implied by the extension
    pub fn save<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), PersistenceError> {
        match ArtifactFormat::from_path(path.as_ref()) {
            ArtifactFormat::Json => Self::save_to_json(value, path),
            ArtifactFormat::Binary => Self::save_to_binary(value, path),
        }
    }

    /// Load with the format implied by the extension
    pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, PersistenceError> {
        match ArtifactFormat::from_path(path.as_ref()) {
            ArtifactFormat::Json => Self::load_from_json(path),
            ArtifactFormat::Binary => Self::load_from_binary(path),
        }
    }
}

/// Convenience trait for model saving/loading
pub trait PersistentModel {
    /// Save model to file (format determined by file extension)
    fn save<P: AsRef<Path>>(&self, path: P, metadata: ModelMetadata) -> Result<(), PersistenceError>;

    /// Load model from file (format determined by file extension)
    fn load<P: AsRef<Path>>(path: P) -> Result<(Self, ModelMetadata), PersistenceError>
    where
        Self: Sized;
}

impl PersistentModel for SentimentClassifier {
    fn save<P: AsRef<Path>>(&self, path: P, metadata: ModelMetadata) -> Result<(), PersistenceError> {
        let saved = SavedModel { model: SerializableClassifier::from(self), metadata };
        ModelPersistence::save(&saved, path)
    }

    fn load<P: AsRef<Path>>(path: P) -> Result<(Self, ModelMetadata), PersistenceError> {
        let saved: SavedModel<SerializableClassifier> = ModelPersistence::load(path)?;
        Ok((saved.model.try_into()?, saved.metadata))
    }
}

impl PersistentModel for LdaModel {
    fn save<P: AsRef<Path>>(&self, path: P, metadata: ModelMetadata) -> Result<(), PersistenceError> {
        let saved = SavedModel { model: SerializableLda::from(self), metadata };
        ModelPersistence::save(&saved, path)
    }

    fn load<P: AsRef<Path>>(path: P) -> Result<(Self, ModelMetadata), PersistenceError> {
        let saved: SavedModel<SerializableLda> = ModelPersistence::load(path)?;
        Ok((saved.model.try_into()?, saved.metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ArtifactFormat::from_path(&PathBuf::from("m.json")), ArtifactFormat::Json);
        assert_eq!(ArtifactFormat::from_path(&PathBuf::from("m.model")), ArtifactFormat::Binary);
        assert_eq!(ArtifactFormat::from_path(&PathBuf::from("m")), ArtifactFormat::Binary);
    }

    #[test]
    fn test_bad_shape_is_rejected() {
        let array = SerializableArray2 { data: vec![1.0, 2.0, 3.0], shape: (2, 2) };
        let result: Result<Array2<f64>, _> = array.try_into();
        assert!(matches!(result, Err(PersistenceError::InvalidModel(_))));
    }

    fn lstm_encoder(cells: &[LSTMCell], input_size: usize, hidden_size: usize) -> SerializableEncoder {
        SerializableEncoder::Lstm {
            cells: cells.iter().map(SerializableLSTMCell::from).collect(),
            input_size,
            hidden_size,
        }
    }

    #[test]
    fn test_encoder_round_trips_through_bincode() {
        let network = BiLSTMNetwork::new(3, 2, 2, CombineMode::Sum);
        let saved = SerializableEncoder::from(&SequenceEncoder::BiLstm(network));
        let bytes = bincode::serialize(&saved).unwrap();
        let restored: SerializableEncoder = bincode::deserialize(&bytes).unwrap();

        match SequenceEncoder::try_from(restored).unwrap() {
            SequenceEncoder::BiLstm(network) => {
                assert_eq!(network.num_layers, 2);
                assert_eq!(network.combine_mode, CombineMode::Sum);
            }
            SequenceEncoder::Lstm(_) => panic!("expected a BiLSTM encoder"),
        }
    }

    #[test]
    fn test_cell_input_width_is_checked() {
        // declares 4 inputs but the cell reads 5
        let saved = lstm_encoder(&[LSTMCell::new(5, 3)], 4, 3);
        assert!(matches!(SequenceEncoder::try_from(saved), Err(PersistenceError::InvalidModel(_))));

        // second layer must read the first layer's hidden state
        let saved = lstm_encoder(&[LSTMCell::new(4, 3), LSTMCell::new(4, 3)], 4, 3);
        assert!(matches!(SequenceEncoder::try_from(saved), Err(PersistenceError::InvalidModel(_))));

        let saved = lstm_encoder(&[LSTMCell::new(4, 3), LSTMCell::new(3, 3)], 4, 3);
        assert!(SequenceEncoder::try_from(saved).is_ok());
    }

    #[test]
    fn test_cell_hidden_size_is_checked() {
        let saved = lstm_encoder(&[LSTMCell::new(4, 2)], 4, 3);
        assert!(matches!(SequenceEncoder::try_from(saved), Err(PersistenceError::InvalidModel(_))));

        let saved = lstm_encoder(&[], 4, 3);
        assert!(matches!(SequenceEncoder::try_from(saved), Err(PersistenceError::InvalidModel(_))));
    }

    #[test]
    fn test_bilstm_upper_layer_width_is_checked() {
        let network = BiLSTMNetwork::new_concat(4, 3, 2);
        let mut forward: Vec<SerializableLSTMCell> =
            network.get_forward_cells().iter().map(SerializableLSTMCell::from).collect();
        // upper concat layer reads 6 values, not 3
        forward[1] = (&LSTMCell::new(3, 3)).into();
        let saved = SerializableEncoder::BiLstm {
            forward_cells: forward,
            backward_cells: network.get_backward_cells().iter().map(SerializableLSTMCell::from).collect(),
            input_size: 4,
            hidden_size: 3,
            combine_mode: CombineMode::Concat,
        };
        assert!(matches!(SequenceEncoder::try_from(saved), Err(PersistenceError::InvalidModel(_))));
    }

    #[test]
    fn test_lda_alpha_mismatch_is_rejected() {
        let saved = SerializableLda {
            alpha: vec![0.1],
            lambda: (&Array2::from_elem((2, 3), 1.0)).into(),
        };
        assert!(LdaModel::try_from(saved).is_err());
    }
}
