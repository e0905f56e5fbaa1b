// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame decoding for emotion analysis
//!
//! Turns the base64 payloads posted by browser capture code into decoded
//! raster frames.

pub mod frame;
pub mod frame_decoder;

pub use frame::{Frame, FrameExtent};
pub use frame_decoder::{
    decode_frame, decode_frame_bytes, strip_data_url_prefix, FrameError, DEFAULT_MAX_FRAME_BYTES,
};
