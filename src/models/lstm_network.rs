use ndarray::Array2;
use crate::layers::lstm_cell::LSTMCell;

/// Multi-layer unidirectional LSTM for sequence classification
///
/// Each layer consumes the full output sequence of the layer below,
/// so the stack behaves like sequence-returning recurrent layers
/// topped by one that only reports its last state.
#[derive(Clone, Debug)]
pub struct LSTMNetwork {
    cells: Vec<LSTMCell>,
    pub input_size: usize,
    pub hidden_size: usize,
    pub num_layers: usize,
}

impl LSTMNetwork {
    /// Creates a new multi-layer LSTM network
    ///
    /// First layer accepts `input_size` dimensions, subsequent layers
    /// accept `hidden_size` dimensions from the previous layer.
    pub fn new(input_size: usize, hidden_size: usize, num_layers: usize) -> Self {
        let mut cells = Vec::new();

        for i in 0..num_layers {
            let layer_input_size = if i == 0 { input_size } else { hidden_size };
            cells.push(LSTMCell::new(layer_input_size, hidden_size));
        }

        LSTMNetwork { cells, input_size, hidden_size, num_layers }
    }

    /// Creates a network from existing cells (used for deserialization)
    pub fn from_cells(cells: Vec<LSTMCell>, input_size: usize, hidden_size: usize, num_layers: usize) -> Self {
        LSTMNetwork { cells, input_size, hidden_size, num_layers }
    }

    /// Get reference to the cells (used for serialization)
    pub fn get_cells(&self) -> &[LSTMCell] {
        &self.cells
    }

    /// Hidden output of every step of the top layer
    pub fn forward_sequence(&self, sequence: &[Array2<f64>]) -> Vec<Array2<f64>> {
        let mut layer_input_sequence = sequence.to_vec();
        for cell in &self.cells {
            layer_input_sequence = cell.run(&layer_input_sequence);
        }
        layer_input_sequence
    }

    /// Last hidden state of the top layer, zeros for an empty sequence
    pub fn forward_final(&self, sequence: &[Array2<f64>]) -> Array2<f64> {
        self.forward_sequence(sequence)
            .pop()
            .unwrap_or_else(|| Array2::zeros((self.hidden_size, 1)))
    }

    pub fn num_parameters(&self) -> usize {
        self.cells.iter().map(|cell| cell.num_parameters()).sum()
    }
}
