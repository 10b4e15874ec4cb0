// ABOUTME: Main binary for the Mahlzeit meal plan server
// ABOUTME: Loads configuration, initializes logging, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use mahlzeit_server::config::environment::ServerConfig;
use mahlzeit_server::logging;
use mahlzeit_server::resources::ServerResources;
use mahlzeit_server::server::MealPlanServer;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "mahlzeit-server",
    about = "Weather-aware daily meal plan API server",
    version
)]
struct Args {
    /// HTTP port override (takes precedence over HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    info!("Configuration: {}", config.summary());

    let port = config.http_port;
    info!("Endpoints:");
    info!("  GET  http://localhost:{port}/get_meal_plan");
    info!("  POST http://localhost:{port}/api/user-data");
    info!("  GET  http://localhost:{port}/api/user-data");
    info!("  POST http://localhost:{port}/api/clear-cache");
    info!("  GET  http://localhost:{port}/health");
    #[cfg(feature = "openapi")]
    info!("  GET  http://localhost:{port}/api-docs");

    let resources = ServerResources::new(config).await?;
    let server = MealPlanServer::new(Arc::new(resources));

    server.run().await?;
    Ok(())
}
