// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! CORS policy tests: open mode and origin allow-list

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use emotion_analysis_server::{
    api::{create_app, AppState},
    config::ServiceConfig,
    detection::MockDetector,
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with_origins(origins: &[&str]) -> Router {
    let config = ServiceConfig {
        allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        ..ServiceConfig::default()
    };
    create_app(AppState::new(
        config,
        Arc::new(MockDetector::with_output(json!([]))),
    ))
}

fn preflight(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_preflight_open_mode() {
    let app = app_with_origins(&["*"]);

    let response = app
        .oneshot(preflight("/analyze", "http://anywhere.example"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
    let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed_headers.contains("content-type"));
}

#[tokio::test]
async fn test_preflight_on_alias_route() {
    let app = app_with_origins(&["*"]);

    let response = app
        .oneshot(preflight("/analyze_screen", "http://localhost:3000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_allow_list_echoes_known_origin() {
    let app = app_with_origins(&["http://localhost:3000", "http://localhost:3001"]);

    let response = app
        .oneshot(preflight("/analyze", "http://localhost:3001"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3001"
    );
}

#[tokio::test]
async fn test_allow_list_omits_unknown_origin() {
    let app = app_with_origins(&["http://localhost:3000"]);

    let response = app
        .oneshot(preflight("/analyze", "http://evil.example"))
        .await
        .unwrap();

    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_simple_request_carries_origin_header() {
    let app = app_with_origins(&["*"]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
