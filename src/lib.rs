// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod qr;
pub mod version;

// Re-export main types
pub use api::{create_app, AppState};
pub use config::ServiceConfig;
pub use qr::{
    CleanupReport, GenerateOptions, GenerateOutcome, Generator, GeneratorConfig, QrError,
    QrRecord, RecordId,
};
