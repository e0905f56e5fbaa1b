// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze response types

use serde::{Deserialize, Serialize};

use crate::detection::DetectionResult;

/// Response from emotion analysis: one entry per face, in detector order.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzeResponse(pub Vec<DetectionResult>);

impl AnalyzeResponse {
    pub fn faces(&self) -> &[DetectionResult] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<DetectionResult>> for AnalyzeResponse {
    fn from(faces: Vec<DetectionResult>) -> Self {
        Self(faces)
    }
}
