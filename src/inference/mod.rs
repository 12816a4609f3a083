//! Demo inference: raw text in, sentiment and dominant topic out.

pub mod sentiment;
pub mod topic;

pub use sentiment::SentimentEngine;
pub use topic::{TopicEngine, TopicPrediction};

use crate::preprocessing::Preprocessor;

/// Result of running both pipelines on one text.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub sentiment: String,
    pub sentiment_confidence: f64,
    pub topic: TopicPrediction,
}

/// Everything the demo needs, present only when every asset loaded.
#[derive(Clone, Debug)]
pub struct Analyzer {
    pub preprocessor: Preprocessor,
    pub sentiment: SentimentEngine,
    pub topic: TopicEngine,
}

impl Analyzer {
    pub fn analyze(&self, text: &str) -> Analysis {
        let (sentiment, sentiment_confidence) = self.sentiment.predict(&self.preprocessor, text);
        let topic = self.topic.predict(&self.preprocessor, text);
        Analysis { sentiment, sentiment_confidence, topic }
    }
}
