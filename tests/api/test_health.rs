// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Liveness, banner and routing tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};

use super::support::{body_json, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"status": "healthy", "service": "QR Code Generator"})
    );
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let app = TestApp::new();
    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "QR Code Generator API");
    let endpoints = json["endpoints"].as_object().unwrap();
    for key in ["generate", "retrieve_qr", "retrieve_metadata", "cleanup", "health"] {
        assert!(endpoints.contains_key(key), "missing endpoint {}", key);
    }
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/generate")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let response = app.get("/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_header_present() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("origin", "https://frontend.example")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
