// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod detection;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{create_app, start_server, AppState};
pub use config::{DetectorConfig, ServiceConfig};
pub use detection::{
    DeepFaceClient, DetectionResult, DetectorError, EmotionDetector, MockDetector, Region,
};
pub use vision::{decode_frame, Frame, FrameError, FrameExtent};
