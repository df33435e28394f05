// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for driving the router in-process
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use qr_code_api::{create_app, AppState, Generator, ServiceConfig};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestApp {
    // Held so the storage root lives as long as the app
    _dir: TempDir,
    pub storage_root: PathBuf,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let storage_root = dir.path().join("QR code");
        let state = AppState::from_config(ServiceConfig::for_storage_root(&storage_root));
        Self {
            _dir: dir,
            storage_root,
            state,
        }
    }

    /// App whose generator is built by `build` over a fresh storage root
    pub fn with_generator(build: impl FnOnce(ServiceConfig) -> Generator) -> Self {
        let dir = TempDir::new().unwrap();
        let storage_root = dir.path().join("QR code");
        let config = ServiceConfig::for_storage_root(&storage_root);
        let generator = build(config.clone());
        Self {
            _dir: dir,
            storage_root,
            state: AppState::new(config, generator),
        }
    }

    pub fn router(&self) -> Router {
        create_app(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Generate a record and return its identifier
    pub async fn generate(&self, url: &str) -> String {
        let body = serde_json::json!({ "url": url, "cleanup_on_generate": false }).to_string();
        let response = self.post_json("/generate", &body).await;
        let json = body_json(response).await;
        folder_name(json["folder"].as_str().unwrap())
    }

    pub fn record_count(&self) -> usize {
        match std::fs::read_dir(&self.storage_root) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Last path component of a `folder` value
pub fn folder_name(folder: &str) -> String {
    std::path::Path::new(folder)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}
