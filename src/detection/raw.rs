// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Loosely-typed detector output
//!
//! Detector backends disagree on how they report a face: the region may be
//! missing, a positional `[x, y, w, h]` list, a keyed `{x, y, w, h}` record or
//! something else entirely, and numbers may arrive as floats or strings. The
//! types here borrow from the raw JSON and resolve it to canonical values.

use serde_json::{Map, Value};

use super::normalizer::NormalizeError;
use super::result::Region;
use crate::vision::FrameExtent;

/// Region descriptor as reported by the detector, one variant per shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawRegion<'a> {
    /// Missing, null or empty
    Absent,
    /// `[x, y, w, h]`, possibly of the wrong length
    Positional(&'a [Value]),
    /// `{"x": .., "y": .., "w": .., "h": ..}`, possibly partial
    Keyed(&'a Map<String, Value>),
    /// Any other value
    Other(&'a Value),
}

impl<'a> RawRegion<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None => RawRegion::Absent,
            Some(v) if is_empty(v) => RawRegion::Absent,
            Some(Value::Array(items)) => RawRegion::Positional(items),
            Some(Value::Object(map)) => RawRegion::Keyed(map),
            Some(other) => RawRegion::Other(other),
        }
    }

    /// Resolve to a concrete region.
    ///
    /// Anything that is not a 4-element sequence or a keyed record becomes
    /// the full frame. Keyed records fall back per key.
    pub fn resolve(&self, extent: FrameExtent) -> Result<Region, NormalizeError> {
        let full = Region::full_frame(extent);

        match self {
            RawRegion::Absent | RawRegion::Other(_) => Ok(full),
            RawRegion::Positional([x, y, w, h]) => Ok(Region {
                x: region_component("x", x)?,
                y: region_component("y", y)?,
                w: region_component("w", w)?,
                h: region_component("h", h)?,
            }),
            RawRegion::Positional(_) => Ok(full),
            RawRegion::Keyed(map) => {
                let keyed = |key: &'static str, default: i64| match map.get(key) {
                    None | Some(Value::Null) => Ok(default),
                    Some(value) => region_component(key, value),
                };
                Ok(Region {
                    x: keyed("x", full.x)?,
                    y: keyed("y", full.y)?,
                    w: keyed("w", full.w)?,
                    h: keyed("h", full.h)?,
                })
            }
        }
    }
}

/// A single face record from the detector, borrowed from the raw JSON
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection<'a> {
    pub dominant_emotion: &'a str,
    pub emotion: &'a Map<String, Value>,
    pub region: RawRegion<'a>,
}

impl<'a> RawDetection<'a> {
    /// Pull the required fields out of one record.
    ///
    /// Scores are read from `emotion`, or from `emotion_scores` for records
    /// that are already canonical.
    pub fn parse(value: &'a Value) -> Result<Self, NormalizeError> {
        let record = value
            .as_object()
            .ok_or_else(|| NormalizeError::MalformedRecord(json_kind(value).to_string()))?;

        let dominant_emotion = match record.get("dominant_emotion") {
            None | Some(Value::Null) => return Err(NormalizeError::MissingField("dominant_emotion")),
            Some(Value::String(label)) if label.is_empty() => {
                return Err(NormalizeError::MissingField("dominant_emotion"))
            }
            Some(Value::String(label)) => label.as_str(),
            Some(other) => {
                return Err(NormalizeError::InvalidValue {
                    field: "dominant_emotion".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let emotion = match record.get("emotion").or_else(|| record.get("emotion_scores")) {
            None | Some(Value::Null) => return Err(NormalizeError::MissingField("emotion")),
            Some(Value::Object(scores)) => scores,
            Some(other) => {
                return Err(NormalizeError::InvalidValue {
                    field: "emotion".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            dominant_emotion,
            emotion,
            region: RawRegion::from_value(record.get("region")),
        })
    }
}

/// Falsy values count as "no region"
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn region_component(key: &str, value: &Value) -> Result<i64, NormalizeError> {
    coerce_int(value).ok_or_else(|| NormalizeError::InvalidValue {
        field: format!("region.{}", key),
        value: value.to_string(),
    })
}

/// Integer coercion; floats truncate toward zero
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Float coercion for emotion scores
pub fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
