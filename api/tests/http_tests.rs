use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use sentiment_api::server::{router, AppState};
use sentiment_inference::{LinearClassifier, SentimentPipeline, TfidfVectorizer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

fn fixture_state() -> AppState {
    let vocabulary = HashMap::from([
        ("great".to_string(), 0),
        ("video".to_string(), 1),
        ("great video".to_string(), 2),
        ("good".to_string(), 3),
        ("bad".to_string(), 4),
        ("meh".to_string(), 5),
    ]);
    let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0; 6]).unwrap();

    let classifier = LinearClassifier {
        classes: vec![-1, 0, 1],
        coefficients: vec![
            vec![0.0, 0.0, 0.0, 0.0, 5.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 5.0],
            vec![3.0, 1.0, 3.0, 5.0, 0.0, 0.0],
        ],
        intercepts: vec![0.0, 0.0, 0.0],
    };

    let pipeline = SentimentPipeline::new(vectorizer, classifier).unwrap();
    AppState::new(Arc::new(pipeline))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_metadata() {
    let response = router(fixture_state()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["predict"], "/predict_batch");
    assert_eq!(body["health"], "/health");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_when_model_loaded() {
    let response = router(fixture_state())
        .oneshot(get("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_without_model() {
    let response = router(AppState::without_model())
        .oneshot(get("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn test_predict_without_model_is_503() {
    let response = router(AppState::without_model())
        .oneshot(post_json("/predict_batch", json!({"comments": ["good"]})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_predict_basic() {
    let response = router(fixture_state())
        .oneshot(post_json(
            "/predict_batch",
            json!({"comments": ["Great video!", "bad", "meh"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 3);

    assert_eq!(predictions[0]["text"], "Great video!");
    assert_eq!(predictions[0]["sentiment"], "positive");
    assert_eq!(predictions[0]["sentiment_score"], 1);
    assert_eq!(predictions[1]["sentiment"], "negative");
    assert_eq!(predictions[2]["sentiment"], "neutral");

    let statistics = &body["statistics"];
    assert_eq!(statistics["total_comments"], 3);
    assert_eq!(statistics["sentiment_counts"]["positive"], 1);
    assert_eq!(statistics["sentiment_counts"]["neutral"], 1);
    assert_eq!(statistics["sentiment_counts"]["negative"], 1);
    assert_eq!(statistics["sentiment_percentages"]["positive"], 33.33);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_predict_single_comment_statistics() {
    let response = router(fixture_state())
        .oneshot(post_json("/predict_batch", json!({"comments": ["Great video!"]})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["predictions"].as_array().unwrap().len(), 1);

    let statistics = &body["statistics"];
    assert_eq!(statistics["total_comments"], 1);
    assert_eq!(statistics["sentiment_counts"]["positive"], 1);
    assert_eq!(statistics["sentiment_percentages"]["positive"], 100.0);
    assert_eq!(statistics["sentiment_percentages"]["neutral"], 0.0);
    assert_eq!(statistics["sentiment_percentages"]["negative"], 0.0);
    assert_eq!(
        statistics["average_confidence"],
        body["predictions"][0]["confidence"]
    );
}

#[tokio::test]
async fn test_empty_batch_is_400() {
    let response = router(fixture_state())
        .oneshot(post_json("/predict_batch", json!({"comments": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_all_blank_batch_is_400() {
    let response = router(fixture_state())
        .oneshot(post_json("/predict_batch", json!({"comments": ["", "   "]})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_shapes_are_422() {
    let cases = [
        json!({}),                          // missing key
        json!({"comments": "not a list"}),  // wrong type
        json!({"comments": [123, null]}),   // invalid elements
    ];

    for case in cases {
        let response = router(fixture_state())
            .oneshot(post_json("/predict_batch", case.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "case: {}",
            case
        );
    }
}

#[tokio::test]
async fn test_batch_sizes() {
    for size in [1usize, 3, 50, 200] {
        let batch: Vec<&str> = vec!["good"; size];
        let response = router(fixture_state())
            .oneshot(post_json("/predict_batch", json!({"comments": batch})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "batch size {}", size);

        let body = body_json(response).await;
        assert_eq!(body["predictions"].as_array().unwrap().len(), size);
        assert_eq!(body["statistics"]["total_comments"], size);
    }
}

#[tokio::test]
async fn test_unknown_words_get_a_deterministic_answer() {
    let request_body = json!({"comments": ["zxqwfl blorp"]});

    let first = body_json(
        router(fixture_state())
            .oneshot(post_json("/predict_batch", request_body.clone()))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        router(fixture_state())
            .oneshot(post_json("/predict_batch", request_body))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["predictions"], second["predictions"]);
    assert_eq!(first["statistics"], second["statistics"]);
}
