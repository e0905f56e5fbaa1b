// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector output normalization
//!
//! Converts whatever the detector returned into an ordered list of
//! [`DetectionResult`]s. Failures are per record: one malformed face does not
//! discard the others.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::raw::{coerce_float, RawDetection};
use super::result::DetectionResult;
use crate::vision::FrameExtent;

/// Record-level normalization failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("detection is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has an unusable value: {value}")]
    InvalidValue { field: String, value: String },

    #[error("detection record is a {0}, expected an object")]
    MalformedRecord(String),
}

/// Normalized faces plus the records that could not be normalized
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub faces: Vec<DetectionResult>,
    /// Input index and reason for every dropped record
    pub rejected: Vec<(usize, NormalizeError)>,
}

impl NormalizedBatch {
    /// True when the detector reported no records at all
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.rejected.is_empty()
    }
}

/// Split the detector output into individual face records.
///
/// A lone object is one record, an array is one record per element, and a
/// `{"results": [...]}` envelope is unwrapped first. Null means no faces.
pub fn raw_records(raw: &Value) -> Vec<&Value> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) if !map.contains_key("dominant_emotion") => match map.get("results") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Null) => Vec::new(),
            Some(single @ Value::Object(_)) => vec![single],
            _ => vec![raw],
        },
        other => vec![other],
    }
}

/// Normalize a single face record against the frame it came from
pub fn normalize_record(
    raw: &Value,
    extent: FrameExtent,
) -> Result<DetectionResult, NormalizeError> {
    let detection = RawDetection::parse(raw)?;

    let emotion_scores = detection
        .emotion
        .iter()
        .map(|(label, score)| {
            coerce_float(score)
                .map(|score| (label.clone(), score))
                .ok_or_else(|| NormalizeError::InvalidValue {
                    field: format!("emotion.{}", label),
                    value: score.to_string(),
                })
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    let region = detection.region.resolve(extent)?;

    Ok(DetectionResult {
        dominant_emotion: detection.dominant_emotion.to_string(),
        emotion_scores,
        region,
    })
}

/// Normalize the full detector output, one outcome per record in input order
pub fn normalize_output(
    raw: &Value,
    extent: FrameExtent,
) -> Vec<Result<DetectionResult, NormalizeError>> {
    raw_records(raw)
        .into_iter()
        .map(|record| normalize_record(record, extent))
        .collect()
}

/// Normalize and partition into usable faces and rejected records
pub fn normalize_batch(raw: &Value, extent: FrameExtent) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (index, outcome) in normalize_output(raw, extent).into_iter().enumerate() {
        match outcome {
            Ok(face) => batch.faces.push(face),
            Err(e) => batch.rejected.push((index, e)),
        }
    }
    batch
}
