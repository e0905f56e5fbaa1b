// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Emotion analysis endpoint module
//!
//! Provides POST /analyze (and the /analyze_screen alias) for analysing the
//! faces in a single video frame.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::analyze_handler;
pub use request::AnalyzeRequest;
pub use response::AnalyzeResponse;
