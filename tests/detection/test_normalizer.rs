// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Normalizer tests against detector output shapes seen in the wild

use emotion_analysis_server::{
    detection::{normalize_batch, normalize_output, normalize_record, NormalizeError, Region},
    vision::FrameExtent,
};
use serde_json::json;

const FRAME: FrameExtent = FrameExtent {
    width: 100,
    height: 100,
};

#[test]
fn test_deepface_rest_envelope() {
    let raw = json!({
        "results": [{
            "dominant_emotion": "surprise",
            "emotion": {"angry": 0.1, "surprise": 97.2, "neutral": 2.7},
            "region": {"x": 12, "y": 8, "w": 44, "h": 51, "left_eye": [30, 25], "right_eye": null},
            "face_confidence": 0.93
        }]
    });

    let faces: Vec<_> = normalize_output(&raw, FRAME)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].dominant_emotion, "surprise");
    assert_eq!(faces[0].emotion_scores.len(), 3);
    assert_eq!(faces[0].region, Region::new(12, 8, 44, 51));
}

#[test]
fn test_float_region_truncated() {
    let raw = json!({
        "dominant_emotion": "fear",
        "emotion": {"fear": "0.5"},
        "region": [10.9, 20.2, 30.7, 40.0]
    });

    let face = normalize_record(&raw, FRAME).unwrap();
    assert_eq!(face.region, Region::new(10, 20, 30, 40));
    assert_eq!(face.emotion_scores["fear"], 0.5);
}

#[test]
fn test_partial_keyed_region_defaults() {
    let raw = json!({
        "dominant_emotion": "happy",
        "emotion": {"happy": 1.0},
        "region": {"x": 7}
    });

    let face = normalize_record(&raw, FRAME).unwrap();
    assert_eq!(face.region, Region::new(7, 0, 100, 100));
}

#[test]
fn test_non_numeric_score_rejected() {
    let raw = json!({
        "dominant_emotion": "happy",
        "emotion": {"happy": "very"}
    });

    let err = normalize_record(&raw, FRAME).unwrap_err();
    assert!(matches!(err, NormalizeError::InvalidValue { ref field, .. } if field == "emotion.happy"));
}

#[test]
fn test_batch_keeps_order_and_indices() {
    let raw = json!([
        {"dominant_emotion": "sad", "emotion": {"sad": 1.0}},
        "garbage",
        {"dominant_emotion": "happy", "emotion": {"happy": 1.0}}
    ]);

    let batch = normalize_batch(&raw, FRAME);
    let labels: Vec<_> = batch
        .faces
        .iter()
        .map(|f| f.dominant_emotion.as_str())
        .collect();
    assert_eq!(labels, vec!["sad", "happy"]);
    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].0, 1);
}
