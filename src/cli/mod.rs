// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ScannerConfig;

/// Hardware label scanner CLI
#[derive(Parser, Debug)]
#[command(name = "hwscan-cli")]
#[command(version)]
#[command(about = "Extract RAM/SSD attributes from label photos", long_about = None)]
pub struct Cli {
    /// Optional TOML config file (environment variables still override it)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a single label image and print the extracted attributes
    Scan(scan::ScanArgs),

    /// Check that the vision provider is reachable with the configured key
    Check(scan::CheckArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = ScannerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan(args) => scan::scan_image(args, config).await,
        Commands::Check(args) => scan::check_provider(args, config).await,
    }
}
