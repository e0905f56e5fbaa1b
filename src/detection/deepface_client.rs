// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DeepFace sidecar client
//!
//! Talks to a DeepFace REST service (`POST /analyze`) running next to this
//! server. The response body is returned as raw JSON for the normalizer.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::detector::{DetectorError, EmotionDetector};
use crate::config::DetectorConfig;
use crate::vision::Frame;

/// DeepFace's message when `enforce_detection` is on and no face is found
const NO_FACE_MARKER: &str = "could not be detected";

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    img: String,
    actions: [&'a str; 1],
    enforce_detection: bool,
    detector_backend: &'a str,
}

/// Emotion detector backed by a DeepFace REST sidecar
pub struct DeepFaceClient {
    client: Client,
    endpoint: String,
    backend: String,
    enforce_detection: bool,
}

impl DeepFaceClient {
    pub fn new(config: &DetectorConfig) -> Result<Self, DetectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let endpoint = config.url.trim().trim_end_matches('/').to_string();
        info!(
            "DeepFace client configured: endpoint={}, backend={}, enforce_detection={}",
            endpoint, config.backend, config.enforce_detection
        );

        Ok(Self {
            client,
            endpoint,
            backend: config.backend.clone(),
            enforce_detection: config.enforce_detection,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, frame: &Frame) -> AnalyzeRequest<'_> {
        AnalyzeRequest {
            img: frame.to_data_url(),
            actions: ["emotion"],
            enforce_detection: self.enforce_detection,
            detector_backend: &self.backend,
        }
    }

    fn classify_failure(&self, status: StatusCode, body: String) -> DetectorError {
        if self.enforce_detection
            && status == StatusCode::BAD_REQUEST
            && body.contains(NO_FACE_MARKER)
        {
            return DetectorError::NoFaceDetected;
        }
        DetectorError::Status {
            status: status.as_u16(),
            body,
        }
    }
}

#[async_trait]
impl EmotionDetector for DeepFaceClient {
    async fn analyze(&self, frame: &Frame) -> Result<Value, DetectorError> {
        let start = Instant::now();
        let request = self.build_request(frame);

        let response = self
            .client
            .post(format!("{}/analyze", self.endpoint))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.classify_failure(status, body));
        }

        let output: Value = response
            .json()
            .await
            .map_err(|e| DetectorError::InvalidResponse(e.to_string()))?;

        debug!(
            "DeepFace analysis took {}ms for {}x{} frame",
            start.elapsed().as_millis(),
            frame.width(),
            frame.height()
        );

        Ok(output)
    }

    fn name(&self) -> &str {
        "deepface"
    }

    async fn health_check(&self) -> bool {
        match self.client.get(format!("{}/", self.endpoint)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("DeepFace health check failed: {}", e);
                false
            }
        }
    }
}
