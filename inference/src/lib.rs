// Comment Sentiment Inference Library

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classifier;
pub mod error;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod vectorizer;

pub use classifier::LinearClassifier;
pub use error::{Result, SentimentError};
pub use labels::sentiment_label;
pub use model::ModelConfig;
pub use pipeline::SentimentPipeline;
pub use vectorizer::{FeatureVector, TfidfVectorizer};

use serde::{Deserialize, Serialize};

/// Sentiment prediction for a single comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub text: String,         // Original comment, truncated for display
    pub sentiment: String,    // "negative", "neutral", "positive"
    pub sentiment_score: i32, // Raw class code: -1, 0, 1
    pub confidence: f64,      // Winning class probability, 0.0 to 1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPercentages {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Aggregate statistics over one processed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total_comments: usize,
    pub sentiment_counts: SentimentCounts,
    pub sentiment_percentages: SentimentPercentages,
    pub average_confidence: f64,
}

pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.333_333_333, 4), 0.3333);
        assert_eq!(round_to(2.0 / 3.0 * 100.0, 2), 66.67);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
