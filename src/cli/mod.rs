// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ServiceConfig;

/// QR Code Generator CLI
#[derive(Parser, Debug)]
#[command(name = "qr-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Generate, inspect and sweep stored QR code records", long_about = None)]
pub struct Cli {
    /// Storage root (defaults to QR_STORAGE_ROOT or "QR code")
    #[arg(long, global = true, env = "QR_STORAGE_ROOT")]
    pub storage_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a QR code for a URL
    Generate(commands::GenerateArgs),

    /// Delete records older than a number of days
    Cleanup(commands::CleanupArgs),

    /// Print the metadata of a record
    Show(commands::ShowArgs),

    /// List stored record identifiers
    List,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn service_config(&self) -> ServiceConfig {
        let mut config = ServiceConfig::from_env();
        if let Some(root) = &self.storage_root {
            config.storage_root = root.clone();
        }
        config
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.service_config();
    match cli.command {
        Commands::Generate(args) => commands::generate(&config, args).await,
        Commands::Cleanup(args) => commands::cleanup(&config, args).await,
        Commands::Show(args) => commands::show(&config, args).await,
        Commands::List => commands::list(&config).await,
    }
}
