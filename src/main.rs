// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use emotion_analysis_server::{
    api::{start_server, AppState},
    cli::Cli,
    detection::{DeepFaceClient, EmotionDetector},
    version,
};
use std::{env, sync::Arc};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!(
        "Starting Emotion Analysis Server {} (v{}, built {})",
        version::VERSION,
        version::VERSION_NUMBER,
        version::BUILD_DATE
    );
    info!("Features: {}", version::FEATURES.join(", "));

    let config = Cli::parse().into_config();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    if config.debug {
        warn!("Debug traces enabled - error responses include diagnostic details");
    }
    if config.allows_any_origin() {
        info!("CORS: any origin allowed");
    } else {
        info!("CORS: allowed origins {:?}", config.allowed_origins);
    }

    let detector = DeepFaceClient::new(&config.detector)?;
    if !detector.health_check().await {
        warn!(
            "DeepFace sidecar at {} is not reachable yet; analyze requests will fail until it is",
            detector.endpoint()
        );
    }

    let state = AppState::new(config, Arc::new(detector));

    start_server(state, async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutting down...");
    })
    .await?;

    info!("Goodbye!");
    Ok(())
}
