// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use tracing::info;

use crate::config::ServiceConfig;
use crate::qr::{CleanupReport, GenerateOptions, GenerateOutcome, RecordId};

/// Arguments for generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// URL to encode; `https://` is added when missing
    pub url: String,

    /// Skip the retention sweep after generating
    #[arg(long)]
    pub no_cleanup: bool,

    /// Upload the record through the configured publisher
    #[arg(long)]
    pub publish: bool,
}

/// Arguments for cleanup command
#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Age threshold in days (defaults to QR_CLEANUP_DAYS or 1)
    #[arg(long)]
    pub days: Option<u32>,
}

/// Arguments for show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record identifier, e.g. qr_20260212_105235_58e0421c
    pub id: String,
}

pub async fn generate(config: &ServiceConfig, args: GenerateArgs) -> Result<()> {
    let generator = config.build_generator()?;
    let options = GenerateOptions {
        cleanup: !args.no_cleanup,
        publish: args.publish,
    };

    let result = generator.generate_with(&args.url, options).await;
    let outcome = GenerateOutcome::from_result(&result);
    if !outcome.success {
        return Err(anyhow!(outcome.message));
    }

    println!("{}", outcome.message);
    if let Some(id) = &outcome.identifier {
        println!("Identifier: {}", id);
    }
    if let Some(path) = &outcome.path {
        println!("Saved to:   {}", path);
    }
    if let Some(url) = &outcome.published_url {
        println!("Published:  {}", url);
    } else if args.publish {
        println!("Published:  (not published, see log)");
    }
    Ok(())
}

pub async fn cleanup(config: &ServiceConfig, args: CleanupArgs) -> Result<()> {
    let generator = config.build_generator()?;
    let days = args.days.unwrap_or(config.default_sweep_days);

    let result = generator.cleanup_older_than(days).await;
    let report = CleanupReport::from_result(&result, days);
    info!("Cleanup finished: {}", report.message);
    println!("{}", report.message);

    if report.success {
        Ok(())
    } else {
        Err(anyhow!("cleanup incomplete"))
    }
}

pub async fn show(config: &ServiceConfig, args: ShowArgs) -> Result<()> {
    let generator = config.build_generator()?;
    let id = RecordId::parse(&args.id).ok_or_else(|| anyhow!("Unknown record: {}", args.id))?;

    let metadata = generator.read_metadata(&id).await?;
    for (key, value) in &metadata {
        println!("{}: {}", key, value);
    }
    Ok(())
}

pub async fn list(config: &ServiceConfig) -> Result<()> {
    let generator = config.build_generator()?;
    let ids = generator.list_records().await?;
    if ids.is_empty() {
        println!("No QR codes stored under {}", config.storage_root.display());
    }
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}
