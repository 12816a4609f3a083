use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;

/// A fully connected (dense) layer
///
/// Performs the transformation: output = weight * input + bias
/// where weight has shape (output_size, input_size) and bias has shape (output_size, 1)
#[derive(Clone, Debug)]
pub struct LinearLayer {
    pub weight: Array2<f64>,     // (output_size, input_size)
    pub bias: Array2<f64>,       // (output_size, 1)
    pub input_size: usize,
    pub output_size: usize,
}

impl LinearLayer {
    /// Create a new linear layer with Xavier/Glorot initialization
    pub fn new(input_size: usize, output_size: usize) -> Self {
        let scale = (2.0 / (input_size + output_size) as f64).sqrt();

        let weight = Array2::random((output_size, input_size), Uniform::new(-scale, scale));
        let bias = Array2::zeros((output_size, 1));

        Self { weight, bias, input_size, output_size }
    }

    /// Create a linear layer from exported weights
    pub fn from_weights(weight: Array2<f64>, bias: Array2<f64>) -> Self {
        let (output_size, input_size) = weight.dim();
        assert_eq!(bias.shape(), &[output_size, 1], "Bias shape must be (output_size, 1)");

        Self { weight, bias, input_size, output_size }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `input` - Input of shape (input_size, batch_size)
    ///
    /// # Returns
    /// * Output of shape (output_size, batch_size)
    pub fn forward(&self, input: &Array2<f64>) -> Array2<f64> {
        let (input_features, _batch_size) = input.dim();
        assert_eq!(input_features, self.input_size,
                  "Input size {} doesn't match layer input size {}",
                  input_features, self.input_size);

        &self.weight.dot(input) + &self.bias
    }

    /// Get the number of parameters in this layer
    pub fn num_parameters(&self) -> usize {
        self.weight.len() + self.bias.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_linear_layer_forward() {
        let layer = LinearLayer::new(3, 2);
        let input = arr2(&[[1.0], [2.0], [3.0]]);
        let output = layer.forward(&input);
        assert_eq!(output.shape(), &[2, 1]);
    }

    #[test]
    fn test_linear_layer_from_weights() {
        let weight = arr2(&[[1.0, 0.0], [0.0, 2.0], [1.0, 1.0]]);
        let bias = arr2(&[[0.5], [0.0], [-1.0]]);
        let layer = LinearLayer::from_weights(weight, bias);

        let output = layer.forward(&arr2(&[[1.0], [3.0]]));
        assert_eq!(output, arr2(&[[1.5], [6.0], [3.0]]));
        assert_eq!(layer.num_parameters(), 9);
    }
}
