// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Canonical detection types returned to clients

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vision::FrameExtent;

/// Face bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Region {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// The region covering the whole frame
    pub fn full_frame(extent: FrameExtent) -> Self {
        Self {
            x: 0,
            y: 0,
            w: i64::from(extent.width),
            h: i64::from(extent.height),
        }
    }
}

/// One analysed face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Highest-scoring emotion label
    pub dominant_emotion: String,
    /// Full label -> confidence distribution
    pub emotion_scores: BTreeMap<String, f64>,
    /// Face bounding box; the full frame when the detector gave none
    pub region: Region,
}
