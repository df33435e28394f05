// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::errors::ApiError;
use super::http_server::AppState;
use crate::qr::{CleanupReport, QrError, RecordId};

pub const SERVICE_NAME: &str = "QR Code Generator";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupParams {
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub deleted_count: usize,
    pub message: String,
}

impl From<CleanupReport> for CleanupResponse {
    fn from(report: CleanupReport) -> Self {
        Self {
            success: report.success,
            deleted_count: report.deleted_count,
            message: report.message,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::SchemaViolation(rejection.body_text())
    }
}

/// GET /
pub async fn root_handler() -> Json<ServiceInfoResponse> {
    let endpoints = [
        ("generate", "/generate (POST)"),
        ("retrieve_qr", "/qr/{folder_name} (GET)"),
        ("retrieve_metadata", "/metadata/{folder_name} (GET)"),
        ("view", "/view/{folder_name} (GET)"),
        ("cleanup", "/cleanup (POST)"),
        ("health", "/health (GET)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Json(ServiceInfoResponse {
        message: format!("{} API", SERVICE_NAME),
        version: crate::version::VERSION_NUMBER.to_string(),
        endpoints,
    })
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Unknown identifiers and identifiers of the wrong shape look the same
fn parse_id(raw: &str, what: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).ok_or_else(|| {
        debug!("Rejecting unknown identifier {:?}", raw);
        ApiError::NotFound(format!("{} not found", what))
    })
}

fn not_found_as(what: &str) -> impl FnOnce(QrError) -> ApiError + '_ {
    move |err| match err {
        QrError::NotFound(_) => ApiError::NotFound(format!("{} not found", what)),
        other => other.into(),
    }
}

/// GET /qr/:identifier - raw PNG
pub async fn qr_image_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&identifier, "QR code")?;
    let png = state
        .generator
        .read_image(&id)
        .await
        .map_err(not_found_as("QR code"))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// GET /metadata/:identifier - stored metadata as a flat mapping
pub async fn metadata_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let id = parse_id(&identifier, "Metadata")?;
    let metadata = state
        .generator
        .read_metadata(&id)
        .await
        .map_err(not_found_as("Metadata"))?;
    Ok(Json(metadata))
}

/// GET /view/:identifier - HTML page with the QR code inlined
pub async fn view_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Html<String>, ApiError> {
    let id = parse_id(&identifier, "QR code")?;
    let page = state
        .generator
        .render_viewer(&id)
        .await
        .map_err(not_found_as("QR code"))?;
    Ok(Html(page))
}

/// POST /cleanup?days=N
pub async fn cleanup_handler(
    State(state): State<AppState>,
    params: Result<Query<CleanupParams>, QueryRejection>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let Query(params) = params?;
    let days = params
        .days
        .unwrap_or(state.generator.config().default_sweep_days);

    let stats = state.generator.cleanup_older_than(days).await?;
    let report = CleanupReport::from_stats(&stats, days);
    info!("Cleanup via API: {}", report.message);
    Ok(Json(report.into()))
}
