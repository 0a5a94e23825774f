use crate::{
    labels::sentiment_label, round_to, BatchStatistics, LinearClassifier, Result, SentimentCounts,
    SentimentError, SentimentPercentages, SentimentPrediction, TfidfVectorizer,
};

/// Maximum characters of the original text echoed back per prediction
const DISPLAY_TEXT_LIMIT: usize = 200;

/// Immutable inference pipeline: vectorizer + classifier.
///
/// Loaded once at startup and shared read-only across concurrent requests;
/// processing holds no per-request state and performs no I/O.
pub struct SentimentPipeline {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
}

impl SentimentPipeline {
    pub fn new(vectorizer: TfidfVectorizer, classifier: LinearClassifier) -> Result<Self> {
        vectorizer.validate()?;
        classifier.validate(vectorizer.vocabulary_size())?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Run a full batch: validate, vectorize, score, label, aggregate.
    ///
    /// Comments that are blank after trimming are dropped; the batch fails
    /// with a validation error only when it is empty or nothing survives.
    /// Predictions preserve the input order of the retained comments.
    pub fn process(
        &self,
        comments: &[String],
    ) -> Result<(Vec<SentimentPrediction>, BatchStatistics)> {
        if comments.is_empty() {
            return Err(SentimentError::Validation(
                "Comment batch is empty".to_string(),
            ));
        }

        let retained: Vec<&String> = comments.iter().filter(|c| !c.trim().is_empty()).collect();
        if retained.is_empty() {
            return Err(SentimentError::Validation(
                "No usable input: every comment is blank".to_string(),
            ));
        }

        let mut predictions = Vec::with_capacity(retained.len());
        for text in retained {
            let vector = self.vectorizer.extract(text);
            let (sentiment_score, confidence) = self.classifier.predict(&vector)?;

            predictions.push(SentimentPrediction {
                text: truncate_chars(text, DISPLAY_TEXT_LIMIT),
                sentiment: sentiment_label(sentiment_score).to_string(),
                sentiment_score,
                confidence,
            });
        }

        let statistics = aggregate(&predictions);
        Ok((predictions, statistics))
    }
}

fn aggregate(predictions: &[SentimentPrediction]) -> BatchStatistics {
    let total = predictions.len();
    let count_of = |code: i32| {
        predictions
            .iter()
            .filter(|p| p.sentiment_score == code)
            .count()
    };
    let positive = count_of(1);
    let neutral = count_of(0);
    let negative = count_of(-1);

    // Each percentage is rounded independently; the three need not sum to
    // exactly 100
    let percentage = |count: usize| round_to(count as f64 / total as f64 * 100.0, 2);

    let average_confidence = predictions.iter().map(|p| p.confidence).sum::<f64>() / total as f64;

    BatchStatistics {
        total_comments: total,
        sentiment_counts: SentimentCounts {
            positive,
            neutral,
            negative,
        },
        sentiment_percentages: SentimentPercentages {
            positive: percentage(positive),
            neutral: percentage(neutral),
            negative: percentage(negative),
        },
        average_confidence: round_to(average_confidence, 4),
    }
}

/// Truncate to a character limit without splitting a code point
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
