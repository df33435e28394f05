// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! QR generation endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, warn};

use super::request::GenerateQrRequest;
use super::response::GenerateQrResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::qr::GenerateOutcome;

/// POST /generate - Generate a QR code for a URL
///
/// Malformed bodies are rejected with 422, an empty URL with 400, and any
/// storage or encoding failure with 500.
pub async fn generate_qr_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQrRequest>, JsonRejection>,
) -> Result<Json<GenerateQrResponse>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "QR generation request received: url_len={}, cleanup={}, publish={}",
        request.url.len(),
        request.cleanup_on_generate,
        request.publish
    );

    match state
        .generator
        .generate_with(&request.url, request.options())
        .await
    {
        Ok(generation) => Ok(Json(GenerateOutcome::from_generation(&generation).into())),
        Err(e) => {
            warn!("QR generation failed: {}", e);
            Err(e.into())
        }
    }
}
