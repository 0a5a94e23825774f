use crate::{round_to, FeatureVector, Result, SentimentError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Linear classifier over TF-IDF feature vectors.
///
/// Holds one coefficient row and one intercept per sentiment class. Immutable
/// after load and safe to share across threads without locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// Class codes in strictly ascending order: [-1, 0, 1]
    pub classes: Vec<i32>,
    /// One coefficient row per class, vocabulary_size wide
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per class
    pub intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn validate(&self, vocabulary_size: usize) -> Result<()> {
        if self.classes.len() != 3 {
            return Err(SentimentError::ModelLoad(format!(
                "Expected 3 classes, got {}",
                self.classes.len()
            )));
        }
        if !self.classes.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(SentimentError::ModelLoad(
                "Class codes must be strictly ascending".to_string(),
            ));
        }
        if self.coefficients.len() != self.classes.len()
            || self.intercepts.len() != self.classes.len()
        {
            return Err(SentimentError::ModelLoad(format!(
                "Classifier has {} classes but {} coefficient rows and {} intercepts",
                self.classes.len(),
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        for (class, row) in self.classes.iter().zip(&self.coefficients) {
            if row.len() != vocabulary_size {
                return Err(SentimentError::ModelLoad(format!(
                    "Coefficient row for class {} has {} entries, expected {}",
                    class,
                    row.len(),
                    vocabulary_size
                )));
            }
        }
        Ok(())
    }

    /// Raw per-class scores: dot(vector, coefficients) + intercept
    fn scores(&self, vector: &FeatureVector) -> Result<Vec<f64>> {
        let mut scores = self.intercepts.clone();
        for (index, weight) in vector.iter() {
            for (score, row) in scores.iter_mut().zip(&self.coefficients) {
                let coefficient = row.get(index).ok_or_else(|| {
                    SentimentError::Inference(format!(
                        "Feature index {} exceeds coefficient row of length {}",
                        index,
                        row.len()
                    ))
                })?;
                *score += weight * coefficient;
            }
        }
        Ok(scores)
    }

    /// Class probabilities via softmax over the raw scores
    pub fn probabilities(&self, vector: &FeatureVector) -> Result<Vec<f64>> {
        let scores = self.scores(vector)?;
        let max_score = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let exp_scores: Vec<f64> = scores.iter().map(|&s| (s - max_score).exp()).collect();
        let sum_exp: f64 = exp_scores.iter().sum();

        Ok(exp_scores.iter().map(|&e| e / sum_exp).collect())
    }

    /// Predicted class code and its confidence, rounded to 4 decimals.
    ///
    /// Ties on exact probability equality resolve to the lowest class code:
    /// classes are ascending and the comparison is strict.
    pub fn predict(&self, vector: &FeatureVector) -> Result<(i32, f64)> {
        let probabilities = self.probabilities(vector)?;

        let mut best = 0;
        for (index, &probability) in probabilities.iter().enumerate() {
            if probability > probabilities[best] {
                best = index;
            }
        }

        Ok((self.classes[best], round_to(probabilities[best], 4)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SentimentError::ModelLoad(format!("Failed to read classifier file {:?}: {}", path, e))
        })?;
        let classifier = serde_json::from_str(&json).map_err(|e| {
            SentimentError::ModelLoad(format!("Failed to parse classifier file {:?}: {}", path, e))
        })?;
        Ok(classifier)
    }
}
