// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! QR record generation and retention
//!
//! Each record lives in its own directory under the storage root:
//!
//! ```text
//! <storage_root>/
//!   qr_20260212_105235_58e0421c/
//!     qrcode.png
//!     metadata.txt
//! ```
//!
//! A record is complete once both files are written; only then is its
//! identifier returned to the caller. Records are removed exclusively by a
//! retention sweep.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::encoder::QrEncoder;
use super::errors::{QrError, QrResult};
use super::identifier::RecordId;
use super::metadata::{parse_pairs, RecordMetadata, IMAGE_FILENAME, METADATA_FILENAME};
use super::publisher::Publisher;
use super::viewer::{data_uri, render_viewer_html};

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding one subdirectory per record
    pub storage_root: PathBuf,
    /// Added to the creation time to produce the stored `expires` value
    pub expiry_window_days: u32,
    /// Sweep threshold used when a generation triggers cleanup
    pub default_sweep_days: u32,
    pub encoder: QrEncoder,
}

impl GeneratorConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            expiry_window_days: 1,
            default_sweep_days: 1,
            encoder: QrEncoder::default(),
        }
    }
}

/// One generated QR artifact
#[derive(Debug, Clone)]
pub struct QrRecord {
    pub id: RecordId,
    /// Normalized target URL
    pub url: String,
    pub folder: PathBuf,
    pub image_path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Run a sweep with the default window after writing the record
    pub cleanup: bool,
    /// Hand the record to the configured publisher
    pub publish: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            cleanup: true,
            publish: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Generation {
    pub record: QrRecord,
    pub published_url: Option<String>,
}

/// Tagged result of a generation, safe to hand to any caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutcome {
    pub success: bool,
    pub identifier: Option<String>,
    pub path: Option<String>,
    pub folder: Option<String>,
    pub message: String,
    pub published_url: Option<String>,
}

impl GenerateOutcome {
    pub fn from_generation(generation: &Generation) -> Self {
        let record = &generation.record;
        Self {
            success: true,
            identifier: Some(record.id.to_string()),
            path: Some(record.image_path.display().to_string()),
            folder: Some(record.folder.display().to_string()),
            message: format!("QR code generated successfully for {}", record.url),
            published_url: generation.published_url.clone(),
        }
    }

    pub fn from_result(result: &QrResult<Generation>) -> Self {
        match result {
            Ok(generation) => Self::from_generation(generation),
            Err(e) => Self {
                success: false,
                identifier: None,
                path: None,
                folder: None,
                message: e.to_string(),
                published_url: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleanupStats {
    pub deleted_count: usize,
    /// Directory name and error for every entry that could not be removed
    pub failures: Vec<(String, String)>,
}

/// Tagged result of a sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    pub success: bool,
    pub deleted_count: usize,
    pub message: String,
}

impl CleanupReport {
    pub fn from_stats(stats: &CleanupStats, days: u32) -> Self {
        if stats.failures.is_empty() {
            return Self {
                success: true,
                deleted_count: stats.deleted_count,
                message: format!(
                    "Deleted {} QR code folder(s) older than {} day(s)",
                    stats.deleted_count, days
                ),
            };
        }

        let failed: Vec<String> = stats
            .failures
            .iter()
            .map(|(name, err)| format!("{}: {}", name, err))
            .collect();
        Self {
            success: false,
            deleted_count: stats.deleted_count,
            message: format!(
                "Deleted {} QR code folder(s), failed to delete {}: {}",
                stats.deleted_count,
                stats.failures.len(),
                failed.join("; ")
            ),
        }
    }

    pub fn from_result(result: &QrResult<CleanupStats>, days: u32) -> Self {
        match result {
            Ok(stats) => Self::from_stats(stats, days),
            Err(e) => Self {
                success: false,
                deleted_count: 0,
                message: format!("Cleanup failed: {}", e),
            },
        }
    }
}

/// Add `https://` unless the input already carries an http(s) scheme.
///
/// Control characters are rejected; metadata is stored one `key: value`
/// pair per line.
pub fn normalize_url(raw: &str) -> QrResult<String> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(QrError::Validation("URL cannot be empty".to_string()));
    }
    if url.chars().any(char::is_control) {
        return Err(QrError::Validation(
            "URL cannot contain control characters".to_string(),
        ));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        debug!("Adding https:// prefix to {}", url);
        Ok(format!("https://{}", url))
    }
}

pub struct Generator {
    config: GeneratorConfig,
    publisher: Option<Arc<dyn Publisher>>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            publisher: None,
        }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn storage_root(&self) -> &Path {
        &self.config.storage_root
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn has_publisher(&self) -> bool {
        self.publisher.is_some()
    }

    fn record_dir(&self, id: &RecordId) -> PathBuf {
        self.config.storage_root.join(id.as_str())
    }

    pub async fn generate(&self, url: &str, do_cleanup: bool) -> QrResult<QrRecord> {
        let options = GenerateOptions {
            cleanup: do_cleanup,
            publish: false,
        };
        self.generate_with(url, options)
            .await
            .map(|generation| generation.record)
    }

    pub async fn generate_with(&self, url: &str, options: GenerateOptions) -> QrResult<Generation> {
        let url = normalize_url(url)?;
        let png = self.config.encoder.encode_png(&url)?;

        let created_at = Utc::now();
        let expiry_window = self.config.expiry_window_days;
        let expires_at = Duration::try_days(expiry_window as i64)
            .and_then(|window| created_at.checked_add_signed(window))
            .ok_or_else(|| {
                QrError::Unexpected(format!(
                    "expiry window of {} days is out of range",
                    expiry_window
                ))
            })?;
        let id = RecordId::generate(created_at);
        let folder = self.record_dir(&id);
        let image_path = folder.join(IMAGE_FILENAME);

        let metadata = RecordMetadata {
            url: url.clone(),
            created: created_at,
            expires: expires_at,
            filename: IMAGE_FILENAME.to_string(),
        };

        if let Err(e) = write_record(&folder, &image_path, &png, &metadata).await {
            // Leave no half-written record behind
            let _ = tokio::fs::remove_dir_all(&folder).await;
            return Err(e);
        }

        info!("Generated {} for {} ({} bytes)", id, url, png.len());

        let record = QrRecord {
            id,
            url,
            folder,
            image_path,
            created_at,
            expires_at,
        };

        if options.cleanup {
            let days = self.config.default_sweep_days;
            match self.sweep(days, Some(&record.id)).await {
                Ok(stats) if !stats.failures.is_empty() => warn!(
                    "Post-generation sweep left {} folder(s) behind",
                    stats.failures.len()
                ),
                Ok(stats) => debug!("Post-generation sweep deleted {}", stats.deleted_count),
                Err(e) => warn!("Post-generation sweep failed: {}", e),
            }
        }

        let published_url = if options.publish {
            self.publish(&record, &png).await
        } else {
            None
        };

        Ok(Generation {
            record,
            published_url,
        })
    }

    async fn publish(&self, record: &QrRecord, png: &[u8]) -> Option<String> {
        let Some(publisher) = &self.publisher else {
            warn!("Publish requested for {} but no publisher is configured", record.id);
            return None;
        };

        match publisher.publish(record, png).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    "Publishing {} via {} failed, keeping local copy only: {}",
                    record.id,
                    publisher.name(),
                    e
                );
                None
            }
        }
    }

    /// Delete every record created more than `days` days ago.
    ///
    /// The record's own `created` metadata decides its age. Directories
    /// without readable metadata fall back to filesystem timestamps. A failed
    /// removal does not stop the sweep; it is reported in `failures`.
    pub async fn cleanup_older_than(&self, days: u32) -> QrResult<CleanupStats> {
        self.sweep(days, None).await
    }

    /// Sweep that never removes `keep`, whatever the window
    async fn sweep(&self, days: u32, keep: Option<&RecordId>) -> QrResult<CleanupStats> {
        let root = &self.config.storage_root;
        let cutoff = sweep_cutoff(Utc::now(), days);
        let mut stats = CleanupStats::default();

        let mut entries = match tokio::fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!("Storage root {} absent, nothing to sweep", root.display());
                return Ok(stats);
            }
            Err(e) => return Err(QrError::storage("listing storage root", root, e)),
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(QrError::storage("listing storage root", root, e)),
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            }
            if keep.is_some_and(|id| id.as_str() == name) {
                continue;
            }

            let Some(created) = record_created_at(&path).await else {
                warn!("Skipping {}: creation time unavailable", path.display());
                continue;
            };
            if created >= cutoff {
                continue;
            }

            match tokio::fs::remove_dir_all(&path).await {
                Ok(()) => {
                    debug!("Deleted {} (created {})", name, created);
                    stats.deleted_count += 1;
                }
                Err(e) => {
                    warn!("Failed to delete {}: {}", path.display(), e);
                    stats.failures.push((name, e.to_string()));
                }
            }
        }

        info!(
            "Sweep older than {} day(s): {} deleted, {} failed",
            days,
            stats.deleted_count,
            stats.failures.len()
        );
        Ok(stats)
    }

    pub async fn read_image(&self, id: &RecordId) -> QrResult<Vec<u8>> {
        let path = self.record_dir(id).join(IMAGE_FILENAME);
        read_record_file(&path, id, "reading image").await
    }

    pub async fn read_metadata(&self, id: &RecordId) -> QrResult<BTreeMap<String, String>> {
        let path = self.record_dir(id).join(METADATA_FILENAME);
        let bytes = read_record_file(&path, id, "reading metadata").await?;
        let text = String::from_utf8(bytes).map_err(|e| QrError::Metadata {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(parse_pairs(&text))
    }

    /// Stand-alone HTML page with the image inlined
    pub async fn render_viewer(&self, id: &RecordId) -> QrResult<String> {
        let metadata = self.read_metadata(id).await?;
        let png = self.read_image(id).await?;
        let url = metadata.get("url").map(String::as_str).unwrap_or_default();
        Ok(render_viewer_html(url, &data_uri(&png)))
    }

    /// Identifiers of all stored records, oldest first
    pub async fn list_records(&self) -> QrResult<Vec<RecordId>> {
        let root = &self.config.storage_root;
        let mut entries = match tokio::fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(QrError::storage("listing storage root", root, e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| QrError::storage("listing storage root", root, e))?
        {
            if let Some(id) = RecordId::parse(&entry.file_name().to_string_lossy()) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

async fn write_record(
    folder: &Path,
    image_path: &Path,
    png: &[u8],
    metadata: &RecordMetadata,
) -> QrResult<()> {
    tokio::fs::create_dir_all(folder)
        .await
        .map_err(|e| QrError::storage("creating record folder", folder, e))?;
    tokio::fs::write(image_path, png)
        .await
        .map_err(|e| QrError::storage("writing image", image_path, e))?;

    let metadata_path = folder.join(METADATA_FILENAME);
    tokio::fs::write(&metadata_path, metadata.to_text())
        .await
        .map_err(|e| QrError::storage("writing metadata", &metadata_path, e))
}

async fn read_record_file(path: &Path, id: &RecordId, context: &'static str) -> QrResult<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == IoErrorKind::NotFound => Err(QrError::NotFound(id.to_string())),
        Err(e) => Err(QrError::storage(context, path, e)),
    }
}

/// Records created before this instant are swept. A window reaching past
/// the earliest representable time keeps everything.
fn sweep_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(days as i64)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

async fn record_created_at(folder: &Path) -> Option<DateTime<Utc>> {
    if let Ok(text) = tokio::fs::read_to_string(folder.join(METADATA_FILENAME)).await {
        if let Some(meta) = RecordMetadata::from_pairs(&parse_pairs(&text)) {
            return Some(meta.created);
        }
    }

    let fs_meta = tokio::fs::metadata(folder).await.ok()?;
    let time = fs_meta.created().or_else(|_| fs_meta.modified()).ok()?;
    Some(DateTime::<Utc>::from(time))
}
