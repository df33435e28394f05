// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration, built once at startup

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::qr::{
    Generator, GeneratorConfig, HttpPublisher, PublishError, PublisherConfig, QrEncoder,
};

pub const DEFAULT_STORAGE_ROOT: &str = "QR code";

/// Upper bound for both day windows (about a century)
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Configuration for the QR code service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Directory holding one subdirectory per QR record
    pub storage_root: PathBuf,
    /// Days between a record's creation and its stored expiry
    pub expiry_window_days: u32,
    /// Sweep threshold used by generation-triggered cleanup and `/cleanup`
    pub default_sweep_days: u32,
    /// Pixels per QR module
    pub box_size: u32,
    /// White border width in modules
    pub border: u32,
    /// `*` allows any origin
    pub cors_allowed_origins: Vec<String>,
    /// Optional object-storage export
    pub publisher: Option<PublisherConfig>,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: u32| -> u32 {
            var(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };

        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT").unwrap_or_else(|| "8000".to_string());

        // Both URLs are needed before publishing can be enabled
        let publisher = match (var("QR_PUBLISH_UPLOAD_URL"), var("QR_PUBLISH_PUBLIC_URL")) {
            (Some(upload_url), Some(public_url)) => Some(PublisherConfig {
                upload_url,
                public_url,
                bearer_token: var("QR_PUBLISH_TOKEN"),
                timeout: Duration::from_secs(number("QR_PUBLISH_TIMEOUT_SECS", 30) as u64),
            }),
            _ => None,
        };

        Self {
            listen_addr: format!("{}:{}", host, port),
            storage_root: var("QR_STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_root),
            expiry_window_days: number("QR_EXPIRY_DAYS", defaults.expiry_window_days),
            default_sweep_days: number("QR_CLEANUP_DAYS", defaults.default_sweep_days),
            box_size: number("QR_BOX_SIZE", defaults.box_size),
            border: number("QR_BORDER", defaults.border),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),
            publisher,
        }
    }

    /// Defaults with a specific storage root
    pub fn for_storage_root(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(format!("Invalid listen address: {}", self.listen_addr));
        }
        if self.box_size == 0 || self.box_size > 100 {
            return Err(format!(
                "Box size must be between 1 and 100, got {}",
                self.box_size
            ));
        }
        if self.border > 50 {
            return Err(format!("Border must be at most 50, got {}", self.border));
        }
        if self.expiry_window_days == 0 || self.expiry_window_days > MAX_WINDOW_DAYS {
            return Err(format!(
                "Expiry window must be between 1 and {} days, got {}",
                MAX_WINDOW_DAYS, self.expiry_window_days
            ));
        }
        // A zero window would sweep the record a generation just wrote
        if self.default_sweep_days == 0 || self.default_sweep_days > MAX_WINDOW_DAYS {
            return Err(format!(
                "Cleanup window must be between 1 and {} days, got {}",
                MAX_WINDOW_DAYS, self.default_sweep_days
            ));
        }
        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            storage_root: self.storage_root.clone(),
            expiry_window_days: self.expiry_window_days,
            default_sweep_days: self.default_sweep_days,
            encoder: QrEncoder::new(self.box_size, self.border),
        }
    }

    /// Generator over the configured storage root, with the HTTP publisher
    /// attached when publishing is configured
    pub fn build_generator(&self) -> Result<Generator, PublishError> {
        let generator = Generator::new(self.generator_config());
        match &self.publisher {
            Some(publisher_config) => {
                let publisher = HttpPublisher::new(publisher_config)?;
                info!("Publishing enabled via {}", publisher_config.public_url);
                Ok(generator.with_publisher(Arc::new(publisher)))
            }
            None => Ok(generator),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            expiry_window_days: 1,
            default_sweep_days: 1,
            box_size: 10,
            border: 4,
            cors_allowed_origins: vec!["*".to_string()],
            publisher: None,
        }
    }
}
