// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! QR generation response types

use serde::{Deserialize, Serialize};

use crate::qr::GenerateOutcome;

/// Response from POST /generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQrResponse {
    pub success: bool,
    /// Path of the stored PNG
    pub path: Option<String>,
    /// Record directory; its last component is the identifier
    pub folder: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Public page URL when the record was published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,
}

impl From<GenerateOutcome> for GenerateQrResponse {
    fn from(outcome: GenerateOutcome) -> Self {
        Self {
            success: outcome.success,
            path: outcome.path,
            folder: outcome.folder,
            message: outcome.message,
            identifier: outcome.identifier,
            published_url: outcome.published_url,
        }
    }
}
