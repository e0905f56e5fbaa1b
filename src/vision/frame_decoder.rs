// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Base64 frame decoding for the analyze endpoint

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    Engine as _,
};
use thiserror::Error;

use super::frame::Frame;

/// Default cap on decoded frame size (10MB)
pub const DEFAULT_MAX_FRAME_BYTES: usize = 10 * 1024 * 1024;

/// Standard alphabet, padding optional
const FRAME_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors raised while turning a request payload into a [`Frame`]
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Invalid base64 encoding: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Malformed data URL: missing ',' after the header")]
    MalformedDataUrl,

    #[error("Frame data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid image data: {0}")]
    InvalidImage(String),
}

/// Strip a `data:<mime>;base64,` header if one is present.
///
/// Everything up to the first comma is discarded.
pub fn strip_data_url_prefix(payload: &str) -> Result<&str, FrameError> {
    let payload = payload.trim();
    match payload.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or(FrameError::MalformedDataUrl),
        None => Ok(payload),
    }
}

/// Decode a base64 (optionally data-URL prefixed) payload into a frame
///
/// ASCII whitespace inside the base64 text is ignored.
///
/// # Arguments
/// * `payload` - Base64 image data, with or without a data-URL header
/// * `max_bytes` - Upper bound on the decoded byte length, if any
///
/// # Returns
/// * `Ok(Frame)` - The decoded frame
/// * `Err(FrameError)` - If the payload is not base64 or not an image
pub fn decode_frame(payload: &str, max_bytes: Option<usize>) -> Result<Frame, FrameError> {
    let encoded = strip_data_url_prefix(payload)?;
    let bytes = if encoded.bytes().any(|b| b.is_ascii_whitespace()) {
        // Line-wrapped payloads
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        FRAME_ENGINE.decode(compact)?
    } else {
        FRAME_ENGINE.decode(encoded)?
    };

    if let Some(limit) = max_bytes {
        if bytes.len() > limit {
            return Err(FrameError::TooLarge(bytes.len(), limit));
        }
    }

    decode_frame_bytes(bytes)
}

/// Decode raw image bytes into a frame, sniffing the format from magic bytes
pub fn decode_frame_bytes(bytes: Vec<u8>) -> Result<Frame, FrameError> {
    if bytes.is_empty() {
        return Err(FrameError::InvalidImage("image data is empty".to_string()));
    }

    let format =
        image::guess_format(&bytes).map_err(|e| FrameError::InvalidImage(e.to_string()))?;
    let image = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| FrameError::InvalidImage(e.to_string()))?;

    Ok(Frame::new(image, format, bytes))
}
