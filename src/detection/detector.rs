// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Emotion detector abstraction

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use crate::vision::Frame;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("No face detected")]
    NoFaceDetected,

    #[error("Detector request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Detector returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Detector returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Detector failed: {0}")]
    Failed(String),
}

/// An external facial-emotion classifier.
///
/// Implementations return the detector's native output untouched; shaping it
/// into [`DetectionResult`](super::DetectionResult)s is the normalizer's job.
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    /// Analyse one frame
    async fn analyze(&self, frame: &Frame) -> Result<Value, DetectorError>;

    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether the detector is reachable
    async fn health_check(&self) -> bool {
        true
    }
}

/// In-memory detector returning a canned output
pub struct MockDetector {
    output: Result<Value, String>,
    no_face: bool,
    calls: AtomicUsize,
}

impl MockDetector {
    pub fn with_output(output: Value) -> Self {
        Self {
            output: Ok(output),
            no_face: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            no_face: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Behaves like a detector run with face enforcement on an empty frame
    pub fn no_face() -> Self {
        Self {
            output: Ok(Value::Null),
            no_face: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmotionDetector for MockDetector {
    async fn analyze(&self, _frame: &Frame) -> Result<Value, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.no_face {
            return Err(DetectorError::NoFaceDetected);
        }
        self.output.clone().map_err(DetectorError::Failed)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
