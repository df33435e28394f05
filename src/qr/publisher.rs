// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Optional export of generated records to external object storage
//!
//! The Generator never needs a publisher. When one is configured and a
//! caller asks for it, the image and a small viewer page are uploaded under
//! `qrcodes/<suffix>/` and the public page URL is returned.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use super::errors::PublishError;
use super::generator::QrRecord;
use super::metadata::IMAGE_FILENAME;
use super::viewer::render_viewer_html;

const KEY_PREFIX: &str = "qrcodes";

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Upload the record and return the URL under which it can be viewed
    async fn publish(&self, record: &QrRecord, image: &[u8]) -> Result<String, PublishError>;

    fn name(&self) -> &str;
}

/// Object-store key for a file belonging to `record`
pub fn object_key(record: &QrRecord, file: &str) -> String {
    format!("{}/{}/{}", KEY_PREFIX, record.id.suffix(), file)
}

#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Base URL that accepts `PUT <base>/<key>` uploads
    pub upload_url: String,
    /// Base URL under which uploaded keys are publicly served
    pub public_url: String,
    pub bearer_token: Option<String>,
    pub timeout: Duration,
}

/// Publisher for any store accepting plain HTTP PUT uploads
/// (S3-compatible buckets behind a signing proxy, static hosting gateways)
pub struct HttpPublisher {
    client: reqwest::Client,
    upload_base: Url,
    public_base: Url,
    bearer_token: Option<String>,
}

impl HttpPublisher {
    pub fn new(config: &PublisherConfig) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublishError::Network(e.to_string()))?;

        Ok(Self {
            client,
            upload_base: parse_base(&config.upload_url)?,
            public_base: parse_base(&config.public_url)?,
            bearer_token: config.bearer_token.clone(),
        })
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), PublishError> {
        let target = self
            .upload_base
            .join(key)
            .map_err(|e| PublishError::InvalidUrl(e.to_string()))?;
        debug!("Uploading {} ({} bytes) to {}", key, body.len(), target);

        let mut request = self
            .client
            .put(target)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PublishError::UploadFailed {
                key: key.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Publisher for HttpPublisher {
    async fn publish(&self, record: &QrRecord, image: &[u8]) -> Result<String, PublishError> {
        let image_key = object_key(record, IMAGE_FILENAME);
        self.put(&image_key, image.to_vec(), "image/png").await?;

        let image_url = self
            .public_base
            .join(&image_key)
            .map_err(|e| PublishError::InvalidUrl(e.to_string()))?;
        let html = render_viewer_html(&record.url, image_url.as_str());
        self.put(&object_key(record, "index.html"), html.into_bytes(), "text/html")
            .await?;

        let page = self
            .public_base
            .join(&format!("{}/{}/", KEY_PREFIX, record.id.suffix()))
            .map_err(|e| PublishError::InvalidUrl(e.to_string()))?;
        info!("Published {} to {}", record.id, page);
        Ok(page.to_string())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// `Url::join` drops the last path segment unless the base ends in `/`
fn parse_base(raw: &str) -> Result<Url, PublishError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| PublishError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// In-memory publisher for tests
#[derive(Clone, Default)]
pub struct MockPublisher {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following publish fail with `reason`
    pub async fn inject_failure(&self, reason: &str) {
        *self.fail_with.lock().await = Some(reason.to_string());
    }

    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(key).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, record: &QrRecord, image: &[u8]) -> Result<String, PublishError> {
        if let Some(reason) = self.fail_with.lock().await.clone() {
            return Err(PublishError::UploadFailed {
                key: object_key(record, IMAGE_FILENAME),
                reason,
            });
        }

        let mut objects = self.objects.lock().await;
        objects.insert(object_key(record, IMAGE_FILENAME), image.to_vec());
        objects.insert(
            object_key(record, "index.html"),
            render_viewer_html(&record.url, IMAGE_FILENAME).into_bytes(),
        );
        Ok(format!("mock://{}/{}/", KEY_PREFIX, record.id.suffix()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
