// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Emotion Analysis Server

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-emotion-analysis-2026-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "data-url-frames",
    "multi-face",
    "region-normalization",
    "cors-allow-list",
    "debug-traces",
    "deepface-sidecar",
];
