// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Emotion detection and result normalization
//!
//! This module provides:
//! - The [`EmotionDetector`] seam around the external classifier
//! - A DeepFace REST sidecar client
//! - Normalization of the detector's loosely-typed output into
//!   [`DetectionResult`]s

pub mod deepface_client;
pub mod detector;
pub mod normalizer;
pub mod raw;
pub mod result;

pub use deepface_client::DeepFaceClient;
pub use detector::{DetectorError, EmotionDetector, MockDetector};
pub use normalizer::{
    normalize_batch, normalize_output, normalize_record, raw_records, NormalizeError,
    NormalizedBatch,
};
pub use raw::{RawDetection, RawRegion};
pub use result::{DetectionResult, Region};
