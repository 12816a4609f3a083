use ndarray::{Array2, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use crate::utils::sigmoid;

/// LSTM cell holding pre-trained parameters
///
/// Implements the standard LSTM equations with gates packed in the order
/// input, forget, cell, output:
/// - i_t = σ(W_xi * x_t + W_hi * h_t-1 + b_i)
/// - f_t = σ(W_xf * x_t + W_hf * h_t-1 + b_f)
/// - g_t = tanh(W_xg * x_t + W_hg * h_t-1 + b_g)
/// - o_t = σ(W_xo * x_t + W_ho * h_t-1 + b_o)
/// - c_t = f_t ⊙ c_t-1 + i_t ⊙ g_t
/// - h_t = o_t ⊙ tanh(c_t)
#[derive(Clone, Debug)]
pub struct LSTMCell {
    pub w_ih: Array2<f64>,  // input-to-hidden weights (4*hidden_size, input_size)
    pub w_hh: Array2<f64>,  // hidden-to-hidden weights (4*hidden_size, hidden_size)
    pub b_ih: Array2<f64>,  // input-to-hidden bias (4*hidden_size, 1)
    pub b_hh: Array2<f64>,  // hidden-to-hidden bias (4*hidden_size, 1)
    pub hidden_size: usize,
}

impl LSTMCell {
    /// Creates new LSTM cell with small uniform random weights
    pub fn new(input_size: usize, hidden_size: usize) -> Self {
        let dist = Uniform::new(-0.1, 0.1);

        let w_ih = Array2::random((4 * hidden_size, input_size), dist);
        let w_hh = Array2::random((4 * hidden_size, hidden_size), dist);
        let b_ih = Array2::zeros((4 * hidden_size, 1));
        let b_hh = Array2::zeros((4 * hidden_size, 1));

        LSTMCell { w_ih, w_hh, b_ih, b_hh, hidden_size }
    }

    /// Creates a cell from exported weights.
    ///
    /// Frameworks with a single bias vector export it as `b_ih` with a
    /// zero `b_hh`.
    pub fn from_weights(w_ih: Array2<f64>, w_hh: Array2<f64>, b_ih: Array2<f64>, b_hh: Array2<f64>) -> Self {
        let hidden_size = w_hh.ncols();
        assert_eq!(w_ih.nrows(), 4 * hidden_size, "w_ih must have 4*hidden_size rows");
        assert_eq!(w_hh.nrows(), 4 * hidden_size, "w_hh must have 4*hidden_size rows");
        assert_eq!(b_ih.shape(), &[4 * hidden_size, 1], "b_ih must be (4*hidden_size, 1)");
        assert_eq!(b_hh.shape(), &[4 * hidden_size, 1], "b_hh must be (4*hidden_size, 1)");

        LSTMCell { w_ih, w_hh, b_ih, b_hh, hidden_size }
    }

    pub fn input_size(&self) -> usize {
        self.w_ih.ncols()
    }

    /// Zero hidden/cell state column
    pub fn zero_state(&self) -> Array2<f64> {
        Array2::zeros((self.hidden_size, 1))
    }

    /// One time step. Returns (h_t, c_t).
    pub fn forward(&self, input: &Array2<f64>, hx: &Array2<f64>, cx: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
        // All gates in one product: [input_gate, forget_gate, cell_gate, output_gate]
        let gates = &self.w_ih.dot(input) + &self.b_ih + &self.w_hh.dot(hx) + &self.b_hh;
        let h = self.hidden_size;

        let input_gate = gates.slice(s![0..h, ..]).map(|&x| sigmoid(x));
        let forget_gate = gates.slice(s![h..2*h, ..]).map(|&x| sigmoid(x));
        let cell_gate = gates.slice(s![2*h..3*h, ..]).map(|&x| x.tanh());
        let output_gate = gates.slice(s![3*h..4*h, ..]).map(|&x| sigmoid(x));

        let cy = &forget_gate * cx + &input_gate * &cell_gate;
        let hy = &output_gate * &cy.map(|&x| x.tanh());

        (hy, cy)
    }

    /// Runs the cell over a whole sequence from zero state.
    ///
    /// Returns the hidden output of every step in sequence order.
    pub fn run(&self, sequence: &[Array2<f64>]) -> Vec<Array2<f64>> {
        let mut hx = self.zero_state();
        let mut cx = self.zero_state();
        let mut outputs = Vec::with_capacity(sequence.len());

        for input in sequence {
            let (hy, cy) = self.forward(input, &hx, &cx);
            outputs.push(hy.clone());
            hx = hy;
            cx = cy;
        }

        outputs
    }

    /// Number of trainable parameters
    pub fn num_parameters(&self) -> usize {
        self.w_ih.len() + self.w_hh.len() + self.b_ih.len() + self.b_hh.len()
    }
}
