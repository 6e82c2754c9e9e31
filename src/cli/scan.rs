// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::ScannerConfig;
use crate::session::{HardwareInfo, UNKNOWN};
use crate::vision::{Extraction, HardwareExtractor, LabelImage, VisionClient};

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the label photo (JPEG, PNG, WebP or GIF)
    pub image: PathBuf,

    /// Also print the JSON object returned by the model
    #[arg(long)]
    pub raw: bool,

    /// Override the configured vision model
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Override the configured vision endpoint
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Scan one label image and print the result
pub async fn scan_image(args: ScanArgs, mut config: ScannerConfig) -> Result<()> {
    if let Some(model) = args.model {
        config.vision.model = model;
    }

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let image = LabelImage::from_bytes(bytes, config.max_image_bytes)?;
    let client = VisionClient::new(&config.vision)?;

    info!(
        "Scanning {} ({}x{} {})",
        args.image.display(),
        image.info().width,
        image.info().height,
        image.mime_type()
    );

    let start = Instant::now();
    let extraction = client.extract(&image).await?;

    println!("{}", render_scan(&extraction, start.elapsed(), args.raw)?);

    Ok(())
}

/// Full console output for one scan
pub fn render_scan(extraction: &Extraction, elapsed: Duration, raw: bool) -> Result<String> {
    let mut output = format!(
        "{}\nProcessing time: {:.2} seconds",
        format_report(&extraction.info),
        elapsed.as_secs_f64()
    );

    if raw {
        output.push_str("\n\n");
        output.push_str(&serde_json::to_string_pretty(&extraction.raw)?);
    }

    Ok(output)
}

/// Verify the provider accepts the configured key
pub async fn check_provider(args: CheckArgs, mut config: ScannerConfig) -> Result<()> {
    if let Some(endpoint) = args.endpoint {
        config.vision.endpoint = endpoint;
    }

    let client = VisionClient::new(&config.vision)?;

    if client.health_check().await {
        println!("✅ Vision provider reachable at {}", client.endpoint());
        println!("   Model: {}", client.model_name());
        Ok(())
    } else {
        Err(anyhow!(
            "vision provider at {} rejected the request or is unreachable",
            client.endpoint()
        ))
    }
}

/// Human-readable block for one extraction
pub fn format_report(info: &HardwareInfo) -> String {
    let speed = if info.speed == UNKNOWN {
        UNKNOWN.to_string()
    } else {
        format!("{} MHz", info.speed)
    };

    format!(
        "Form Factor: {}\nBrand: {}\nCapacity: {}\nGeneration: {}\nBus Speed: {}",
        info.form_factor, info.brand, info.capacity, info.generation, speed
    )
}
