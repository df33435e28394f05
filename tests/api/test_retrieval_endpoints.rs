// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for GET /qr, /metadata and /view

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use qr_code_api::api::REQUEST_ID_HEADER;
use qr_code_api::qr::PNG_SIGNATURE;

use super::support::{body_bytes, body_json, content_type, TestApp};

#[tokio::test]
async fn test_get_qr_image() {
    let app = TestApp::new();
    let id = app.generate("https://example.com").await;

    let response = app.get(&format!("/qr/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/png");

    let png = body_bytes(response).await;
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.width(), decoded.height());
}

#[tokio::test]
async fn test_get_qr_image_not_found() {
    let app = TestApp::new();
    let response = app.get("/qr/nonexistent_folder").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("not found"));
}

#[tokio::test]
async fn test_well_formed_but_unknown_id() {
    let app = TestApp::new();
    app.generate("example.com").await;

    let response = app.get("/qr/qr_20000101_000000_00000000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.get("/metadata/qr_20000101_000000_00000000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_traversal_is_not_found() {
    let app = TestApp::new();
    app.generate("example.com").await;

    for uri in ["/metadata/..", "/qr/..%2F..%2Fetc%2Fpasswd", "/metadata/%2E%2E"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_get_metadata() {
    let app = TestApp::new();
    let id = app.generate("https://example.com").await;

    let response = app.get(&format!("/metadata/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    for key in ["url", "created", "expires", "filename"] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(json["filename"], "qrcode.png");
}

#[tokio::test]
async fn test_metadata_url_is_normalized() {
    let app = TestApp::new();
    let id = app.generate("example.org/path?q=1").await;

    let json = body_json(app.get(&format!("/metadata/{}", id)).await).await;
    assert_eq!(json["url"], "https://example.org/path?q=1");
}

#[tokio::test]
async fn test_get_metadata_not_found() {
    let app = TestApp::new();
    let response = app.get("/metadata/nonexistent_folder").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_page() {
    let app = TestApp::new();
    let id = app.generate("example.com").await;

    let response = app.get(&format!("/view/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains(&ammonia::clean_text("https://example.com")));
    assert!(html.contains(&ammonia::clean_text("data:image/png;base64,")));
}

#[tokio::test]
async fn test_view_not_found() {
    let app = TestApp::new();
    let response = app.get("/view/qr_20000101_000000_00000000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_body_echoes_request_id() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/qr/qr_20000101_000000_00000000")
        .header(REQUEST_ID_HEADER, "req-1234")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-1234");
    let json = body_json(response).await;
    assert_eq!(json["request_id"], "req-1234");
    assert_eq!(json["error_type"], "not_found");
}

#[tokio::test]
async fn test_error_body_gets_generated_request_id() {
    let app = TestApp::new();
    let response = app.get("/metadata/nonexistent_folder").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response.headers()[REQUEST_ID_HEADER]
        .to_str()
        .unwrap()
        .to_string();
    assert!(!header.is_empty());
    assert_eq!(body_json(response).await["request_id"], header.as_str());
}
