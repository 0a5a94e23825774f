use anyhow::Result;
use sentiment_api::{config::Config, server::ApiServer};
use sentiment_inference::SentimentPipeline;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env_or_default();
    config.validate()?;

    // Model artifacts load exactly once, before the listener binds
    let pipeline = SentimentPipeline::load(Path::new(&config.model_config_path))?;

    info!(
        "Starting sentiment-api v{} on {}",
        sentiment_api::VERSION,
        config.server_address()
    );

    let server = ApiServer::new(config, Arc::new(pipeline));
    server.serve().await?;

    Ok(())
}
