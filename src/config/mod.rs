// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! One configuration object covers every deployment variant: open or
//! allow-listed CORS, trace echo on or off, listen address and detector
//! settings.

use axum::http::HeaderValue;
use std::env;
use std::str::FromStr;

use crate::vision::DEFAULT_MAX_FRAME_BYTES;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_DETECTOR_URL: &str = "http://127.0.0.1:5005";
pub const DEFAULT_DETECTOR_BACKEND: &str = "opencv";
pub const DEFAULT_DETECTOR_TIMEOUT_SECS: u64 = 30;
/// Request body cap; base64 inflates a frame by a third
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Settings for the external emotion detector
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Base URL of the DeepFace-compatible sidecar
    pub url: String,
    /// Face detector backend requested from the sidecar (opencv, retinaface, ...)
    pub backend: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// When false the detector analyses the whole frame if it finds no face,
    /// so "no face detected" can never be reported
    pub enforce_detection: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DETECTOR_URL.to_string(),
            backend: DEFAULT_DETECTOR_BACKEND.to_string(),
            timeout_secs: DEFAULT_DETECTOR_TIMEOUT_SECS,
            enforce_detection: false,
        }
    }
}

/// Configuration for the HTTP service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` (or an empty list) allows any origin
    pub allowed_origins: Vec<String>,
    /// Echo diagnostic traces in error bodies
    pub debug: bool,
    /// Maximum decoded frame size in bytes, 0 for no limit
    pub max_frame_bytes: usize,
    /// Maximum request body size in bytes
    pub max_body_bytes: usize,
    pub detector: DetectorConfig,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset or unparseable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "API_PORT").unwrap_or(defaults.port),
            allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.allowed_origins),
            debug: lookup("DEBUG_TRACES")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.debug),
            max_frame_bytes: parse_var(&lookup, "MAX_FRAME_BYTES")
                .unwrap_or(defaults.max_frame_bytes),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES")
                .unwrap_or(defaults.max_body_bytes),
            detector: DetectorConfig {
                url: lookup("DETECTOR_URL").unwrap_or(defaults.detector.url),
                backend: lookup("DETECTOR_BACKEND").unwrap_or(defaults.detector.backend),
                timeout_secs: parse_var(&lookup, "DETECTOR_TIMEOUT_SECS")
                    .unwrap_or(defaults.detector.timeout_secs),
                enforce_detection: lookup("ENFORCE_DETECTION")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(defaults.detector.enforce_detection),
            },
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o.trim() == "*")
    }

    /// Frame size cap handed to the decoder
    pub fn frame_limit(&self) -> Option<usize> {
        (self.max_frame_bytes > 0).then_some(self.max_frame_bytes)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }
        if self.max_body_bytes == 0 {
            return Err("Maximum body size must be greater than 0".to_string());
        }
        if self.detector.url.trim().is_empty() {
            return Err("Detector URL must not be empty".to_string());
        }
        if self.detector.timeout_secs == 0 {
            return Err("Detector timeout must be greater than 0".to_string());
        }
        if !self.allows_any_origin() {
            for origin in &self.allowed_origins {
                if HeaderValue::from_str(origin.trim()).is_err() {
                    return Err(format!("Invalid CORS origin '{}'", origin));
                }
            }
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec!["*".to_string()],
            debug: false,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            detector: DetectorConfig::default(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// Boolean env value; the usual "off" spellings are false, anything else true
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "n" | "off" | "f"
    )
}
