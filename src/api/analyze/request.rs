// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Request for emotion analysis of one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64-encoded frame, optionally as a `data:image/...;base64,` URL
    #[serde(default)]
    pub frame: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(frame: impl Into<String>) -> Self {
        Self {
            frame: Some(frame.into()),
        }
    }

    /// Validate the analyze request
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.frame.as_deref().map(str::trim) {
            Some(frame) if !frame.is_empty() => Ok(()),
            _ => Err(ApiError::ValidationError {
                field: "frame".to_string(),
                message: "No frame data provided".to_string(),
            }),
        }
    }

    /// Validate and take ownership of the frame payload
    pub fn into_frame(self) -> Result<String, ApiError> {
        self.validate()?;
        Ok(self.frame.unwrap_or_default())
    }
}
