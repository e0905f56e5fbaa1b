// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! DeepFace sidecar client tests against an in-process fake sidecar

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use emotion_analysis_server::{
    config::DetectorConfig,
    detection::{normalize_batch, DeepFaceClient, DetectorError, EmotionDetector},
    vision::decode_frame,
};
use serde_json::{json, Value};

// 1x1 red PNG
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

/// Helper: Serve `router` on an ephemeral port and return its base URL
async fn spawn_sidecar(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(url: String, enforce_detection: bool) -> DeepFaceClient {
    DeepFaceClient::new(&DetectorConfig {
        url,
        timeout_secs: 5,
        enforce_detection,
        ..Default::default()
    })
    .unwrap()
}

async fn echo_analyze(Json(body): Json<Value>) -> Json<Value> {
    let img = body["img"].as_str().unwrap_or_default().to_string();
    Json(json!({
        "results": [{
            "dominant_emotion": "happy",
            "emotion": {"happy": 91.0, "neutral": 9.0},
            "region": {"x": 0, "y": 0, "w": 1, "h": 1},
            "echo": {
                "img_prefix": img.split(',').next(),
                "actions": body["actions"],
                "enforce_detection": body["enforce_detection"],
                "detector_backend": body["detector_backend"]
            }
        }]
    }))
}

#[tokio::test]
async fn test_analyze_round_trip() {
    let url = spawn_sidecar(
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route("/analyze", post(echo_analyze)),
    )
    .await;
    let client = client_for(url, false);
    let frame = decode_frame(TINY_PNG_BASE64, None).unwrap();

    assert!(client.health_check().await);

    let output = client.analyze(&frame).await.unwrap();
    let echo = &output["results"][0]["echo"];
    assert_eq!(echo["img_prefix"], "data:image/png;base64");
    assert_eq!(echo["actions"], json!(["emotion"]));
    assert_eq!(echo["enforce_detection"], false);
    assert_eq!(echo["detector_backend"], "opencv");

    let batch = normalize_batch(&output, frame.extent());
    assert!(batch.rejected.is_empty());
    assert_eq!(batch.faces.len(), 1);
    assert_eq!(batch.faces[0].dominant_emotion, "happy");
}

#[tokio::test]
async fn test_no_face_reported_when_enforcing() {
    let url = spawn_sidecar(Router::new().route(
        "/analyze",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Exception while analyzing: Face could not be detected in numpy array."})),
            )
        }),
    ))
    .await;
    let frame = decode_frame(TINY_PNG_BASE64, None).unwrap();

    let err = client_for(url.clone(), true).analyze(&frame).await.unwrap_err();
    assert!(matches!(err, DetectorError::NoFaceDetected));

    let err = client_for(url, false).analyze(&frame).await.unwrap_err();
    assert!(matches!(err, DetectorError::Status { status: 400, .. }));
}

#[tokio::test]
async fn test_sidecar_error_surfaces_status() {
    let url = spawn_sidecar(Router::new().route(
        "/analyze",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
    ))
    .await;
    let frame = decode_frame(TINY_PNG_BASE64, None).unwrap();

    let err = client_for(url, false).analyze(&frame).await.unwrap_err();
    match err {
        DetectorError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_invalid_response() {
    let url = spawn_sidecar(Router::new().route("/analyze", post(|| async { "<html>" }))).await;
    let frame = decode_frame(TINY_PNG_BASE64, None).unwrap();

    let err = client_for(url, false).analyze(&frame).await.unwrap_err();
    assert!(matches!(err, DetectorError::InvalidResponse(_)));
}
