// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analyze;
pub mod errors;
pub mod health;
pub mod http_server;

pub use analyze::{analyze_handler, AnalyzeRequest, AnalyzeResponse};
pub use errors::{ApiError, ApiErrorResponse, ErrorResponse};
pub use health::{health_handler, HealthResponse};
pub use http_server::{cors_layer, create_app, start_server, AppState};
