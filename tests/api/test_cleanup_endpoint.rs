// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for POST /cleanup

use axum::http::StatusCode;
use std::time::Duration;

use super::support::{body_json, TestApp};

#[tokio::test]
async fn test_cleanup_default() {
    let app = TestApp::new();
    let response = app.post("/cleanup").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["deleted_count"].is_u64());
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_cleanup_custom_days_keeps_fresh_records() {
    let app = TestApp::new();
    app.generate("example.com").await;

    let response = app.post("/cleanup?days=7").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted_count"], 0);
    assert_eq!(app.record_count(), 1);
}

#[tokio::test]
async fn test_cleanup_zero_days_deletes_everything() {
    let app = TestApp::new();
    for url in ["a.example", "b.example", "c.example"] {
        app.generate(url).await;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;

    let json = body_json(app.post("/cleanup?days=0").await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted_count"], 3);
    assert_eq!(app.record_count(), 0);
}

#[tokio::test]
async fn test_cleanup_rejects_negative_days() {
    let app = TestApp::new();
    let response = app.post("/cleanup?days=-1").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cleanup_rejects_non_numeric_days() {
    let app = TestApp::new();
    let response = app.post("/cleanup?days=week").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cleanup_get_not_allowed() {
    let app = TestApp::new();
    let response = app.get("/cleanup").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cleanup_max_days_keeps_everything() {
    let app = TestApp::new();
    app.generate("example.com").await;

    let response = app.post(&format!("/cleanup?days={}", u32::MAX)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted_count"], 0);
    assert_eq!(app.record_count(), 1);
}
