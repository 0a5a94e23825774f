use crate::{Result, SentimentError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Sparse TF-IDF feature vector for a single text.
///
/// Holds `(feature index, weight)` pairs sorted by index; indices absent from
/// the list carry weight zero. Created per input, consumed once by the
/// classifier, then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    terms: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub(crate) fn from_terms(terms: Vec<(usize, f64)>) -> Self {
        Self { terms }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.terms.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// TF-IDF vectorizer over a fixed unigram/bigram vocabulary.
///
/// The vocabulary and idf table come from the training-side vectorizer and
/// are immutable here; extraction is a pure function of the input text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// N-gram token to feature index mapping
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,
    #[serde(skip, default = "word_pattern")]
    token_regex: Regex,
}

// Same token rule the vocabulary was built with: word characters, length >= 2
fn word_pattern() -> Regex {
    Regex::new(r"\b\w\w+\b").unwrap()
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        let vectorizer = Self {
            vocabulary,
            idf,
            token_regex: word_pattern(),
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check that feature indices form the dense range [0, len) and that the
    /// idf table matches the vocabulary
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(SentimentError::ModelLoad("Vocabulary is empty".to_string()));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(SentimentError::ModelLoad(format!(
                "IDF table has {} entries for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        let mut seen = vec![false; self.vocabulary.len()];
        for (term, &index) in &self.vocabulary {
            if index >= seen.len() || seen[index] {
                return Err(SentimentError::ModelLoad(format!(
                    "Vocabulary index {} for term '{}' is out of range or duplicated",
                    index, term
                )));
            }
            seen[index] = true;
        }
        Ok(())
    }

    /// Map raw text to a sparse L2-normalized TF-IDF vector.
    ///
    /// Out-of-vocabulary tokens are silently dropped; an empty or fully
    /// out-of-vocabulary text yields the zero vector.
    pub fn extract(&self, text: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut terms: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = terms.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut terms {
                *weight /= norm;
            }
        }

        terms.sort_by_key(|&(index, _)| index);
        FeatureVector { terms }
    }

    /// Lowercase, split into word tokens, emit unigrams plus adjacent bigrams
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = self
            .token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        tokens.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        tokens
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SentimentError::ModelLoad(format!("Failed to read vectorizer file {:?}: {}", path, e))
        })?;
        let vectorizer: Self = serde_json::from_str(&json).map_err(|e| {
            SentimentError::ModelLoad(format!("Failed to parse vectorizer file {:?}: {}", path, e))
        })?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }
}
