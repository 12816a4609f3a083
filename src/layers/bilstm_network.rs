use ndarray::Array2;
use crate::layers::lstm_cell::LSTMCell;

/// Configuration for combining forward and backward outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CombineMode {
    Concat,
    Sum,
    Average,
}

/// Bidirectional LSTM stack for sequence classification
///
/// Intermediate layers return the combined output of every time step;
/// the top layer is summarized into a single vector by [`forward_final`].
///
/// [`forward_final`]: BiLSTMNetwork::forward_final
#[derive(Clone, Debug)]
pub struct BiLSTMNetwork {
    forward_cells: Vec<LSTMCell>,
    backward_cells: Vec<LSTMCell>,
    pub input_size: usize,
    pub hidden_size: usize,
    pub num_layers: usize,
    pub combine_mode: CombineMode,
}

impl BiLSTMNetwork {
    /// Creates a new bidirectional LSTM network with random weights
    ///
    /// # Arguments
    /// * `input_size` - Size of input features
    /// * `hidden_size` - Size of hidden state for each direction
    /// * `num_layers` - Number of bidirectional layers
    /// * `combine_mode` - How to combine forward and backward outputs
    pub fn new(input_size: usize, hidden_size: usize, num_layers: usize, combine_mode: CombineMode) -> Self {
        let mut forward_cells = Vec::new();
        let mut backward_cells = Vec::new();

        for i in 0..num_layers {
            let layer_input_size = if i == 0 {
                input_size
            } else {
                Self::combined_size(combine_mode, hidden_size)
            };

            forward_cells.push(LSTMCell::new(layer_input_size, hidden_size));
            backward_cells.push(LSTMCell::new(layer_input_size, hidden_size));
        }

        BiLSTMNetwork {
            forward_cells,
            backward_cells,
            input_size,
            hidden_size,
            num_layers,
            combine_mode,
        }
    }

    /// Create BiLSTM with concatenated outputs (most common)
    pub fn new_concat(input_size: usize, hidden_size: usize, num_layers: usize) -> Self {
        Self::new(input_size, hidden_size, num_layers, CombineMode::Concat)
    }

    /// Rebuild a network from exported cells (used for deserialization)
    pub fn from_cells(
        forward_cells: Vec<LSTMCell>,
        backward_cells: Vec<LSTMCell>,
        input_size: usize,
        hidden_size: usize,
        combine_mode: CombineMode,
    ) -> Self {
        assert_eq!(forward_cells.len(), backward_cells.len(), "Both directions need the same depth");
        let num_layers = forward_cells.len();
        BiLSTMNetwork {
            forward_cells,
            backward_cells,
            input_size,
            hidden_size,
            num_layers,
            combine_mode,
        }
    }

    pub(crate) fn combined_size(mode: CombineMode, hidden_size: usize) -> usize {
        match mode {
            CombineMode::Concat => 2 * hidden_size,
            CombineMode::Sum | CombineMode::Average => hidden_size,
        }
    }

    /// Get the output size based on combine mode
    pub fn output_size(&self) -> usize {
        Self::combined_size(self.combine_mode, self.hidden_size)
    }

    /// Combine forward and backward outputs according to the combine mode
    fn combine_outputs(&self, forward: &Array2<f64>, backward: &Array2<f64>) -> Array2<f64> {
        match self.combine_mode {
            CombineMode::Concat => {
                // Stack forward and backward outputs vertically
                let mut combined = Array2::zeros((forward.nrows() + backward.nrows(), forward.ncols()));
                combined.slice_mut(ndarray::s![..forward.nrows(), ..]).assign(forward);
                combined.slice_mut(ndarray::s![forward.nrows().., ..]).assign(backward);
                combined
            },
            CombineMode::Sum => forward + backward,
            CombineMode::Average => (forward + backward) * 0.5,
        }
    }

    /// Runs one bidirectional layer. Returns (forward_outputs, backward_outputs)
    /// both in sequence order.
    fn run_layer(&self, layer_idx: usize, sequence: &[Array2<f64>]) -> (Vec<Array2<f64>>, Vec<Array2<f64>>) {
        let forward_outputs = self.forward_cells[layer_idx].run(sequence);

        let reversed: Vec<Array2<f64>> = sequence.iter().rev().cloned().collect();
        let mut backward_outputs = self.backward_cells[layer_idx].run(&reversed);
        backward_outputs.reverse();

        (forward_outputs, backward_outputs)
    }

    /// Forward pass returning the combined output of every time step
    /// of the top layer.
    pub fn forward_sequence(&self, sequence: &[Array2<f64>]) -> Vec<Array2<f64>> {
        if sequence.is_empty() {
            return Vec::new();
        }

        let mut layer_input_sequence = sequence.to_vec();

        for layer_idx in 0..self.num_layers {
            let (forward_outputs, backward_outputs) = self.run_layer(layer_idx, &layer_input_sequence);

            // Output of this layer becomes input to next layer
            layer_input_sequence = forward_outputs.iter()
                .zip(backward_outputs.iter())
                .map(|(f, b)| self.combine_outputs(f, b))
                .collect();
        }

        layer_input_sequence
    }

    /// Summarizes a sequence into a single vector.
    ///
    /// Lower layers feed full sequences upward. The top layer combines the
    /// forward state after the last step with the backward state after it
    /// has consumed the whole sequence (its output at position 0).
    pub fn forward_final(&self, sequence: &[Array2<f64>]) -> Array2<f64> {
        if sequence.is_empty() || self.num_layers == 0 {
            return Array2::zeros((self.output_size(), 1));
        }

        let mut layer_input_sequence = sequence.to_vec();
        let last = self.num_layers - 1;

        for layer_idx in 0..last {
            let (forward_outputs, backward_outputs) = self.run_layer(layer_idx, &layer_input_sequence);
            layer_input_sequence = forward_outputs.iter()
                .zip(backward_outputs.iter())
                .map(|(f, b)| self.combine_outputs(f, b))
                .collect();
        }

        let (forward_outputs, backward_outputs) = self.run_layer(last, &layer_input_sequence);
        let forward_state = &forward_outputs[forward_outputs.len() - 1];
        let backward_state = &backward_outputs[0];
        self.combine_outputs(forward_state, backward_state)
    }

    /// Get references to forward and backward cells for serialization
    pub fn get_forward_cells(&self) -> &[LSTMCell] {
        &self.forward_cells
    }

    pub fn get_backward_cells(&self) -> &[LSTMCell] {
        &self.backward_cells
    }

    /// Total number of parameters in both directions
    pub fn num_parameters(&self) -> usize {
        self.forward_cells.iter().chain(self.backward_cells.iter())
            .map(|cell| cell.num_parameters())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn sequence() -> Vec<Array2<f64>> {
        vec![
            arr2(&[[1.0], [0.0]]),
            arr2(&[[0.0], [1.0]]),
            arr2(&[[0.5], [0.5]]),
        ]
    }

    #[test]
    fn test_bilstm_output_sizes() {
        let concat = BiLSTMNetwork::new_concat(2, 3, 2);
        assert_eq!(concat.output_size(), 6);
        let outputs = concat.forward_sequence(&sequence());
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].shape(), &[6, 1]);

        let sum = BiLSTMNetwork::new(2, 3, 1, CombineMode::Sum);
        assert_eq!(sum.forward_final(&sequence()).shape(), &[3, 1]);
    }

    #[test]
    fn test_forward_final_uses_full_backward_pass() {
        let network = BiLSTMNetwork::new_concat(2, 4, 1);
        let seq = sequence();
        let per_step = network.forward_sequence(&seq);
        let summary = network.forward_final(&seq);

        // Forward half matches the last step, backward half matches the first step.
        let last = &per_step[per_step.len() - 1];
        let first = &per_step[0];
        for i in 0..4 {
            assert!((summary[[i, 0]] - last[[i, 0]]).abs() < 1e-12);
            assert!((summary[[i + 4, 0]] - first[[i + 4, 0]]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_sequence() {
        let network = BiLSTMNetwork::new_concat(2, 3, 1);
        assert!(network.forward_sequence(&[]).is_empty());
        assert_eq!(network.forward_final(&[]), Array2::<f64>::zeros((6, 1)));
    }
}
