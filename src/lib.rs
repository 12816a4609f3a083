//! # SentimenSignal
//!
//! Review analytics over Indonesian user reviews of a vehicle tax (Samsat)
//! application: precomputed sentiment and topic results, plus a demo that
//! runs a recurrent sentiment classifier and an LDA topic model on new text.
//!
//! ## Core Components
//!
//! - **Pre-processing**: slang normalization, stopword removal and an
//!   Indonesian confix-stripping stemmer
//! - **Sentiment**: embedding → stacked LSTM or BiLSTM → dense softmax head
//! - **Topics**: LDA variational inference over a fixed vocabulary
//! - **Dashboard**: data loader, report parser and five text pages
//!
//! ## Quick Start
//!
//! ```rust
//! use sentimen_signal::preprocessing::{IndonesianStemmer, NormalizationDictionary, Preprocessor};
//!
//! let preprocessor = Preprocessor::new(
//!     NormalizationDictionary::new([("gak", "tidak")]),
//!     IndonesianStemmer::default(),
//! );
//! assert_eq!(preprocessor.for_sentiment("Membantu sekali bayar pajak"), "bantu kali bayar pajak");
//! ```

pub mod utils;
pub mod layers;
pub mod models;
pub mod text;
pub mod topic;
pub mod preprocessing;
pub mod inference;
pub mod persistence;
pub mod data;
pub mod report;
pub mod context;
pub mod render;
pub mod pages;

// Re-export commonly used items
pub use context::{AppConfig, AppContext};
pub use data::{load_data, ReviewFilter, ReviewTable, Sentiment};
pub use inference::{Analysis, Analyzer, SentimentEngine, TopicEngine, TopicPrediction};
pub use layers::lstm_cell::LSTMCell;
pub use models::lstm_network::LSTMNetwork;
pub use models::sentiment::SentimentClassifier;
pub use persistence::{ModelMetadata, ModelPersistence, PersistenceError, PersistentModel};
pub use preprocessing::Preprocessor;
pub use report::EvaluationReport;
pub use topic::{Dictionary, LdaModel};
