// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Emotion analysis endpoint handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::request::AnalyzeRequest;
use super::response::AnalyzeResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;
use crate::detection::{normalize_batch, DetectorError};
use crate::vision::decode_frame;

/// POST /analyze - Detect the emotions of every face in a frame
///
/// Accepts a base64-encoded frame, runs it through the configured emotion
/// detector and returns one normalized result per face.
///
/// # Request
/// - `frame`: Base64 image data, optionally prefixed with a
///   `data:image/...;base64,` header (required)
///
/// # Response
/// A JSON array, in detector order, of:
/// - `dominant_emotion`: Highest-scoring emotion label
/// - `emotion_scores`: Score for every emotion label
/// - `region`: `{x, y, w, h}` face box; the full frame when unknown
///
/// # Errors
/// - 400 Bad Request: Missing frame, invalid base64, or undecodable image
/// - 404 Not Found: No face detected (only when detection is enforced)
/// - 500 Internal Server Error: Detector failure or unusable detector output
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiErrorResponse> {
    let debug_traces = state.config.debug;

    // 1. Parse and validate request
    let Json(request) = payload.map_err(|rejection| {
        warn!("Analyze request rejected: {}", rejection.body_text());
        ApiErrorResponse::new(ApiError::InvalidRequest(rejection.body_text()))
    })?;

    let frame_data = request.into_frame().map_err(|e| {
        warn!("Analyze validation failed: {}", e);
        ApiErrorResponse::new(e)
    })?;

    // 2. Decode frame off the async workers
    let limit = state.config.frame_limit();
    let frame = tokio::task::spawn_blocking(move || decode_frame(&frame_data, limit))
        .await
        .map_err(|e| {
            ApiErrorResponse::new(ApiError::InternalError(format!(
                "Frame decoding task failed: {}",
                e
            )))
        })?
        .map_err(|e| {
            warn!("Failed to decode frame: {}", e);
            ApiErrorResponse::new(ApiError::from(&e)).with_trace(e, debug_traces)
        })?;

    debug!(
        "Decoded frame: {}x{}, {} bytes",
        frame.width(),
        frame.height(),
        frame.size_bytes()
    );

    // 3. Run the detector
    let extent = frame.extent();
    let enforce_detection = state.config.detector.enforce_detection;
    let raw = match state.detector.analyze(&frame).await {
        Ok(raw) => raw,
        // Without enforcement "no face" is an empty result, never a 404
        Err(DetectorError::NoFaceDetected) if !enforce_detection => {
            debug!("Detector '{}' found no face", state.detector.name());
            Value::Null
        }
        Err(e) => {
            warn!("Detector '{}' failed: {}", state.detector.name(), e);
            return Err(
                ApiErrorResponse::new(ApiError::from(&e)).with_trace(e, debug_traces),
            );
        }
    };
    drop(frame);

    // 4. Normalize detector output
    let batch = normalize_batch(&raw, extent);
    for (index, reason) in &batch.rejected {
        warn!(
            "Dropping face {} from '{}' output: {}",
            index,
            state.detector.name(),
            reason
        );
    }

    if batch.is_empty() {
        if enforce_detection {
            return Err(ApiError::NoFaceDetected.into());
        }
        info!("Emotion analysis complete: no faces");
        return Ok(Json(AnalyzeResponse::default()));
    }

    if batch.faces.is_empty() {
        if let Some((_, reason)) = batch.rejected.first() {
            return Err(ApiErrorResponse::new(ApiError::from(reason))
                .with_trace(reason.clone(), debug_traces));
        }
    }

    info!(
        "Emotion analysis complete: {} faces, {} dropped",
        batch.faces.len(),
        batch.rejected.len()
    );

    Ok(Json(AnalyzeResponse::from(batch.faces)))
}
