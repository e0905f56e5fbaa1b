// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;

use crate::config::{
    DetectorConfig, ServiceConfig, DEFAULT_DETECTOR_BACKEND, DEFAULT_DETECTOR_TIMEOUT_SECS,
    DEFAULT_DETECTOR_URL, DEFAULT_HOST, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT,
};
use crate::vision::DEFAULT_MAX_FRAME_BYTES;

/// Emotion Analysis Server
#[derive(Parser, Debug)]
#[command(name = "emotion-analysis-server")]
#[command(version)]
#[command(about = "HTTP service returning per-face emotion scores for video frames", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "API_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "API_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Comma-separated list of allowed CORS origins, or `*` for any
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub allowed_origins: Vec<String>,

    /// Echo diagnostic traces in error responses (development only)
    #[arg(long, env = "DEBUG_TRACES")]
    pub debug: bool,

    /// Base URL of the DeepFace sidecar
    #[arg(long, env = "DETECTOR_URL", default_value = DEFAULT_DETECTOR_URL)]
    pub detector_url: String,

    /// Face detector backend requested from the sidecar
    #[arg(long, env = "DETECTOR_BACKEND", default_value = DEFAULT_DETECTOR_BACKEND)]
    pub detector_backend: String,

    /// Detector call timeout in seconds
    #[arg(long, env = "DETECTOR_TIMEOUT_SECS", default_value_t = DEFAULT_DETECTOR_TIMEOUT_SECS)]
    pub detector_timeout_secs: u64,

    /// Report "no face detected" (404) instead of analysing the whole frame
    #[arg(long, env = "ENFORCE_DETECTION")]
    pub enforce_detection: bool,

    /// Maximum decoded frame size in bytes (0 disables the limit)
    #[arg(long, env = "MAX_FRAME_BYTES", default_value_t = DEFAULT_MAX_FRAME_BYTES)]
    pub max_frame_bytes: usize,

    /// Maximum request body size in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Cli {
    pub fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            host: self.host,
            port: self.port,
            allowed_origins: self
                .allowed_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            debug: self.debug,
            max_frame_bytes: self.max_frame_bytes,
            max_body_bytes: self.max_body_bytes,
            detector: DetectorConfig {
                url: self.detector_url,
                backend: self.detector_backend,
                timeout_secs: self.detector_timeout_secs,
                enforce_detection: self.enforce_detection,
            },
        }
    }
}
