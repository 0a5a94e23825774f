use crate::{config::Config, error::ApiError, Result, VERSION};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use sentiment_inference::{BatchStatistics, SentimentError, SentimentPipeline, SentimentPrediction};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// HTTP server exposing the sentiment inference pipeline
pub struct ApiServer {
    config: Config,
    pipeline: Arc<SentimentPipeline>,
}

/// Shared request state: the loaded model, or None before load completes
#[derive(Clone)]
pub struct AppState {
    pipeline: Option<Arc<SentimentPipeline>>,
}

impl AppState {
    pub fn new(pipeline: Arc<SentimentPipeline>) -> Self {
        Self {
            pipeline: Some(pipeline),
        }
    }

    /// State with no model loaded; inference requests answer 503
    pub fn without_model() -> Self {
        Self { pipeline: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentBatch {
    pub comments: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchPredictionResponse {
    pub predictions: Vec<SentimentPrediction>,
    pub statistics: BatchStatistics,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub timestamp: String,
}

impl ApiServer {
    pub fn new(config: Config, pipeline: Arc<SentimentPipeline>) -> Self {
        Self { config, pipeline }
    }

    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server_address();
        let app = router(AppState::new(self.pipeline));

        info!("Starting HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(())
    }
}

/// Build the application router; split from serve() so tests can drive it
/// without binding a socket
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict_batch", post(predict_batch))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Comment Sentiment Analysis API",
        "version": VERSION,
        "health": "/health",
        "predict": "/predict_batch",
    }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let model_loaded = state.pipeline.is_some();
    let (status_code, status) = if model_loaded {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            model_loaded,
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}

async fn predict_batch(
    State(state): State<AppState>,
    Json(batch): Json<CommentBatch>,
) -> Result<Json<BatchPredictionResponse>> {
    let pipeline = state.pipeline.as_ref().ok_or(ApiError::ModelUnavailable)?;

    let (predictions, statistics) = pipeline.process(&batch.comments).map_err(|e| match e {
        SentimentError::Validation(message) => ApiError::BadRequest(message),
        other => {
            // Full detail stays in the log; the caller gets a generic message
            error!("Inference failed: {}", other);
            ApiError::Internal
        }
    })?;

    Ok(Json(BatchPredictionResponse {
        predictions,
        statistics,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
