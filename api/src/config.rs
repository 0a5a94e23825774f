use crate::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_config_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_config_path: "models/sentiment_config.json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SENTIMENT_API_HOST") {
            config.host = host;
        }

        if let Ok(port_str) = std::env::var("SENTIMENT_API_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                config.port = port;
            }
        }

        if let Ok(path) = std::env::var("SENTIMENT_MODEL_CONFIG") {
            config.model_config_path = path;
        }

        config
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ApiError::Config("Host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ApiError::Config("Port cannot be zero".to_string()));
        }

        if self.model_config_path.is_empty() {
            return Err(ApiError::Config(
                "Model config path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
