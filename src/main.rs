// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use hardware_scanner::{
    api::{start_server, AppState},
    config::ScannerConfig,
    version,
    vision::VisionClient,
};
use std::{env, path::PathBuf, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Hardware Inventory Scanner API server
#[derive(Parser, Debug)]
#[command(name = "hardware-scanner", version)]
struct ServerArgs {
    /// Optional TOML config file (environment variables still override it)
    #[arg(long, env = "SCANNER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ServerArgs::parse();

    println!("🚀 Starting {}...\n", version::SERVICE_NAME);
    println!("📦 BUILD VERSION: {}", version::get_version_string());
    println!();

    let config = ScannerConfig::load(args.config.as_deref())?;
    let state = AppState::new(config.clone());

    match VisionClient::new(&config.vision) {
        Ok(client) => {
            info!("Vision model: {}", config.vision.model);
            state.set_extractor(Arc::new(client)).await;
            println!("✅ Vision extraction enabled ({})", config.vision.model);
        }
        Err(e) => {
            warn!("Vision extraction disabled: {}", e);
            println!("⚠️  Vision extraction disabled: {}", e);
            println!("   Scans will report an error until GROQ_API_KEY is set");
        }
    }

    println!();
    println!("API server listening on {}", config.listen_addr);
    println!("Endpoints:");
    println!("  GET    /                         health");
    println!("  POST   /api/start-session        start or resume a session");
    println!("  POST   /api/process-image        scan a base64 label image");
    println!("  POST   /api/upload-image         scan a multipart label image");
    println!("  GET    /api/session/:id          list scans");
    println!("  DELETE /api/session/:id          end a session");
    println!("  GET    /api/export/:id           download .xlsx");
    println!();

    start_server(state).await?;

    println!("👋 Server stopped");
    Ok(())
}
