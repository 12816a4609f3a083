use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;

/// Word embedding table.
///
/// Maps token ids to dense column vectors. Row 0 is the padding id.
#[derive(Clone, Debug)]
pub struct Embedding {
    pub weight: Array2<f64>, // (vocab_size, embed_dim)
    vocab_size: usize,
    embed_dim: usize,
}

impl Embedding {
    /// Create new embedding with random initialization.
    pub fn new(vocab_size: usize, embed_dim: usize) -> Self {
        let scale = (1.0 / embed_dim as f64).sqrt();
        let weight = Array2::random((vocab_size, embed_dim), Uniform::new(-scale, scale));
        Self { weight, vocab_size, embed_dim }
    }

    /// Create embedding from existing weights.
    pub fn from_weights(weight: Array2<f64>) -> Self {
        let (vocab_size, embed_dim) = weight.dim();
        Self { weight, vocab_size, embed_dim }
    }

    pub fn embed_dim(&self) -> usize {
        self.embed_dim
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Lookup one id as an (embed_dim, 1) column.
    ///
    /// Ids outside the table map to the padding row.
    pub fn lookup(&self, id: usize) -> Array2<f64> {
        let row = if id < self.vocab_size { id } else { 0 };
        self.weight.row(row).to_owned().insert_axis(ndarray::Axis(1))
    }

    /// Embed a sequence of ids, one column per step.
    pub fn forward(&self, ids: &[usize]) -> Vec<Array2<f64>> {
        ids.iter().map(|&id| self.lookup(id)).collect()
    }
}
