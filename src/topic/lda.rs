use ndarray::{Array1, Array2, Axis};
use crate::utils::digamma;

/// Iteration cap for per-document variational inference.
pub const MAX_INFERENCE_ITERATIONS: usize = 50;

/// Mean absolute change in gamma below which inference stops.
pub const GAMMA_THRESHOLD: f64 = 0.001;

/// Pre-trained Latent Dirichlet Allocation model.
///
/// Holds the document-topic Dirichlet prior `alpha` (one entry per topic)
/// and the variational topic-word parameters `lambda` (topics × terms).
/// Only inference is supported; the parameters come from an exported model.
#[derive(Clone, Debug)]
pub struct LdaModel {
    alpha: Array1<f64>,
    lambda: Array2<f64>,
    exp_elog_beta: Array2<f64>,
}

impl LdaModel {
    pub fn new(alpha: Array1<f64>, lambda: Array2<f64>) -> Self {
        assert_eq!(alpha.len(), lambda.nrows(), "alpha needs one entry per topic");
        let exp_elog_beta = Self::expected_log_beta(&lambda);
        Self { alpha, lambda, exp_elog_beta }
    }

    /// exp(E[log β]) under the Dirichlet posterior of each topic row.
    fn expected_log_beta(lambda: &Array2<f64>) -> Array2<f64> {
        let mut out = Array2::zeros(lambda.raw_dim());
        for (k, row) in lambda.axis_iter(Axis(0)).enumerate() {
            let psi_sum = digamma(row.sum());
            for (v, &value) in row.iter().enumerate() {
                out[[k, v]] = (digamma(value) - psi_sum).exp();
            }
        }
        out
    }

    pub fn num_topics(&self) -> usize {
        self.lambda.nrows()
    }

    pub fn num_terms(&self) -> usize {
        self.lambda.ncols()
    }

    pub fn alpha(&self) -> &Array1<f64> {
        &self.alpha
    }

    pub fn lambda(&self) -> &Array2<f64> {
        &self.lambda
    }

    fn exp_elog_theta(gamma: &Array1<f64>) -> Array1<f64> {
        let psi_sum = digamma(gamma.sum());
        gamma.mapv(|g| (digamma(g) - psi_sum).exp())
    }

    /// Variational gamma for one bag of words.
    ///
    /// Gamma starts at `alpha + N/K` instead of a random Gamma draw, so the
    /// same text always gets the same topics. Terms outside the model
    /// vocabulary are ignored.
    pub fn infer_gamma(&self, bow: &[(usize, f64)]) -> Array1<f64> {
        let bow: Vec<(usize, f64)> = bow.iter().copied().filter(|&(id, _)| id < self.num_terms()).collect();
        if bow.is_empty() {
            return self.alpha.clone();
        }

        let k = self.num_topics();
        let total: f64 = bow.iter().map(|&(_, count)| count).sum();
        let mut gamma = self.alpha.mapv(|a| a + total / k as f64);

        let mut exp_elog_theta = Self::exp_elog_theta(&gamma);
        for _ in 0..MAX_INFERENCE_ITERATIONS {
            let last = gamma.clone();

            let mut sstats = Array1::<f64>::zeros(k);
            for &(id, count) in &bow {
                let column = self.exp_elog_beta.column(id);
                let phinorm: f64 = exp_elog_theta.iter().zip(column.iter()).map(|(t, b)| t * b).sum::<f64>() + 1e-100;
                for topic in 0..k {
                    sstats[topic] += count / phinorm * column[topic];
                }
            }
            gamma = &self.alpha + &(&exp_elog_theta * &sstats);
            exp_elog_theta = Self::exp_elog_theta(&gamma);

            let mean_change = (&gamma - &last).mapv(f64::abs).mean().unwrap_or(0.0);
            if mean_change < GAMMA_THRESHOLD {
                break;
            }
        }
        gamma
    }

    /// Topic distribution for a bag of words, keeping topics whose
    /// probability is at least `minimum_probability`, in topic id order.
    pub fn document_topics(&self, bow: &[(usize, f64)], minimum_probability: f64) -> Vec<(usize, f64)> {
        let gamma = self.infer_gamma(bow);
        let norm = gamma.sum();
        let floor = minimum_probability.max(1e-8);
        gamma.iter()
            .enumerate()
            .map(|(topic, &g)| (topic, g / norm))
            .filter(|&(_, prob)| prob >= floor)
            .collect()
    }

    /// The `topn` most probable term ids of a topic, highest first.
    ///
    /// Equal weights keep term id order.
    pub fn top_terms(&self, topic: usize, topn: usize) -> Vec<(usize, f64)> {
        if topic >= self.num_topics() {
            return Vec::new();
        }
        let row = self.lambda.row(topic);
        let norm = row.sum();
        let mut terms: Vec<(usize, f64)> = row.iter().enumerate().map(|(id, &w)| (id, w / norm)).collect();
        terms.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        terms.truncate(topn);
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn two_topic_model() -> LdaModel {
        // Topic 0 owns terms 0 and 1, topic 1 owns terms 2 and 3.
        LdaModel::new(
            arr1(&[0.1, 0.1]),
            arr2(&[
                [50.0, 40.0, 0.1, 0.1],
                [0.1, 0.1, 45.0, 30.0],
            ]),
        )
    }

    #[test]
    fn test_document_concentrates_on_owning_topic() {
        let model = two_topic_model();
        let topics = model.document_topics(&[(0, 2.0), (1, 1.0)], 0.1);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].0, 0);
        assert!(topics[0].1 > 0.9);

        let topics = model.document_topics(&[(2, 1.0), (3, 3.0)], 0.1);
        assert_eq!(topics[0].0, 1);
    }

    #[test]
    fn test_inference_is_repeatable() {
        let model = two_topic_model();
        let bow = [(0, 1.0), (2, 1.0), (3, 1.0)];
        assert_eq!(model.infer_gamma(&bow), model.infer_gamma(&bow));
        assert_eq!(model.document_topics(&bow, 0.0), model.document_topics(&bow, 0.0));
    }

    #[test]
    fn test_empty_bow_returns_prior() {
        let model = LdaModel::new(arr1(&[0.05; 12]), Array2::from_elem((12, 3), 1.0));
        let topics = model.document_topics(&[], 0.1);
        // Symmetric prior over 12 topics is 1/12 each, below the floor.
        assert!(topics.is_empty());
    }

    #[test]
    fn test_top_terms_sorted() {
        let model = two_topic_model();
        let top = model.top_terms(1, 2);
        assert_eq!(top.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![2, 3]);
        assert!(model.top_terms(5, 2).is_empty());
    }
}
