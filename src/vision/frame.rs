// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decoded video frame

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};

/// Pixel dimensions of a frame, used to synthesize full-frame regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameExtent {
    pub width: u32,
    pub height: u32,
}

impl FrameExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded raster frame.
///
/// Keeps the original encoded bytes next to the pixel buffer so the frame can
/// be forwarded to the detector without a re-encode.
#[derive(Debug, Clone)]
pub struct Frame {
    image: DynamicImage,
    format: ImageFormat,
    encoded: Vec<u8>,
}

impl Frame {
    pub(crate) fn new(image: DynamicImage, format: ImageFormat, encoded: Vec<u8>) -> Self {
        Self {
            image,
            format,
            encoded,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn extent(&self) -> FrameExtent {
        FrameExtent::new(self.width(), self.height())
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Size of the encoded source image in bytes
    pub fn size_bytes(&self) -> usize {
        self.encoded.len()
    }

    /// Re-wrap the original bytes as a `data:image/...;base64,` URL
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/{};base64,{}",
            mime_subtype(self.format),
            STANDARD.encode(&self.encoded)
        )
    }
}

/// MIME subtype for the formats the decoder accepts
pub fn mime_subtype(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::WebP => "webp",
        ImageFormat::Gif => "gif",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tiff => "tiff",
        _ => "octet-stream",
    }
}
