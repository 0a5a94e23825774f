use crate::{LinearClassifier, Result, SentimentError, SentimentPipeline, TfidfVectorizer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names the two model artifacts, relative to the config file's directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub vectorizer_path: String,
    pub classifier_path: String,
}

impl SentimentPipeline {
    /// Load the pipeline from a config file naming both artifacts.
    ///
    /// Called once at service startup; the returned pipeline is immutable and
    /// shared across requests for the lifetime of the process.
    pub fn load(config_path: &Path) -> Result<Self> {
        tracing::info!("Loading sentiment model from: {:?}", config_path);

        let config_content = std::fs::read_to_string(config_path).map_err(|e| {
            SentimentError::ModelLoad(format!("Failed to read config file: {}", e))
        })?;
        let config: ModelConfig = serde_json::from_str(&config_content)
            .map_err(|e| SentimentError::ModelLoad(format!("Failed to parse config: {}", e)))?;
        let base_dir = config_path
            .parent()
            .ok_or_else(|| SentimentError::ModelLoad("Invalid config path".to_string()))?;

        let vectorizer = TfidfVectorizer::load(&base_dir.join(&config.vectorizer_path))?;
        let classifier = LinearClassifier::load(&base_dir.join(&config.classifier_path))?;
        let pipeline = Self::new(vectorizer, classifier)?;

        tracing::info!(
            "Successfully loaded sentiment model with {} vocabulary features",
            pipeline.vocabulary_size()
        );
        Ok(pipeline)
    }
}
