// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Liveness endpoint tests for GET /health

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use emotion_analysis_server::{
    api::{create_app, AppState, HealthResponse},
    config::ServiceConfig,
    detection::MockDetector,
};
use std::sync::Arc;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_health_returns_healthy() {
    let app = create_app(AppState::new(
        ServiceConfig::default(),
        Arc::new(MockDetector::failing("sidecar down")),
    ));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.message, "Emotion analysis service is running");
}

#[tokio::test]
async fn test_health_rejects_post() {
    let app = create_app(AppState::new(
        ServiceConfig::default(),
        Arc::new(MockDetector::no_face()),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
