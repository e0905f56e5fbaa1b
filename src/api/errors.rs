// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::detection::{DetectorError, NormalizeError};
use crate::vision::FrameError;

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Error source chain, only echoed in debug mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    InvalidRequest(String),
    ValidationError { field: String, message: String },
    InvalidFrame(String),
    NoFaceDetected,
    DetectorFailed(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self, trace: Option<String>) -> ErrorResponse {
        let (error_type, details) = match self {
            ApiError::InvalidRequest(_) => ("invalid_request", None),
            ApiError::ValidationError { field, .. } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", Some(details))
            }
            ApiError::InvalidFrame(_) => ("invalid_frame", None),
            ApiError::NoFaceDetected => ("no_face_detected", None),
            ApiError::DetectorFailed(_) => ("detector_error", None),
            ApiError::InternalError(_) => ("internal_error", None),
        };

        ErrorResponse {
            error: self.message(),
            error_type: error_type.to_string(),
            details,
            trace,
        }
    }

    /// Client-facing message, without the category prefix used by `Display`
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidRequest(msg)
            | ApiError::InvalidFrame(msg)
            | ApiError::DetectorFailed(msg)
            | ApiError::InternalError(msg) => msg.clone(),
            ApiError::ValidationError { message, .. } => message.clone(),
            ApiError::NoFaceDetected => "No face detected".to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::ValidationError { .. }
            | ApiError::InvalidFrame(_) => 400,
            ApiError::NoFaceDetected => 404,
            ApiError::DetectorFailed(_) | ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            ApiError::NoFaceDetected => write!(f, "No face detected"),
            ApiError::DetectorFailed(msg) => write!(f, "Detector failed: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<&FrameError> for ApiError {
    fn from(err: &FrameError) -> Self {
        ApiError::InvalidFrame(err.to_string())
    }
}

impl From<&DetectorError> for ApiError {
    fn from(err: &DetectorError) -> Self {
        match err {
            DetectorError::NoFaceDetected => ApiError::NoFaceDetected,
            other => ApiError::DetectorFailed(other.to_string()),
        }
    }
}

impl From<&NormalizeError> for ApiError {
    fn from(err: &NormalizeError) -> Self {
        ApiError::DetectorFailed(format!("detector output could not be normalized: {}", err))
    }
}

/// Error response wrapper carrying an optional diagnostic trace
#[derive(Debug)]
pub struct ApiErrorResponse {
    pub error: ApiError,
    pub trace: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: ApiError) -> Self {
        Self { error, trace: None }
    }

    /// Attach the source error's chain when `enabled` is set
    pub fn with_trace<E>(mut self, source: E, enabled: bool) -> Self
    where
        E: Into<anyhow::Error>,
    {
        if enabled {
            self.trace = Some(format!("{:?}", source.into()));
        }
        self
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error_response = self.error.to_response(self.trace);

        (status, Json(error_response)).into_response()
    }
}
