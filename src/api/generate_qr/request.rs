// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! QR generation request types

use serde::{Deserialize, Serialize};

use crate::qr::GenerateOptions;

/// Request for QR generation via POST /generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQrRequest {
    /// Target URL; `https://` is added when no http(s) scheme is present
    pub url: String,

    /// Run a retention sweep after the record is written
    #[serde(default = "default_cleanup", alias = "cleanup")]
    pub cleanup_on_generate: bool,

    /// Export the record through the configured publisher
    #[serde(default)]
    pub publish: bool,
}

fn default_cleanup() -> bool {
    true
}

impl GenerateQrRequest {
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            cleanup: self.cleanup_on_generate,
            publish: self.publish,
        }
    }
}
