// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use qr_code_api::qr::{CleanupReport, METADATA_FILENAME};
use qr_code_api::{Generator, GeneratorConfig};
use std::time::Duration;
use tempfile::TempDir;

fn generator(dir: &TempDir) -> Generator {
    Generator::new(GeneratorConfig::new(dir.path().join("QR code")))
}

#[tokio::test]
async fn test_zero_days_deletes_all() {
    let dir = TempDir::new().unwrap();
    let generator = generator(&dir);
    for url in ["a.example", "b.example", "c.example", "d.example"] {
        generator.generate(url, false).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(10)).await;

    let stats = generator.cleanup_older_than(0).await.unwrap();
    assert_eq!(stats.deleted_count, 4);
    assert!(stats.failures.is_empty());
    assert!(generator.list_records().await.unwrap().is_empty());
    // Root itself survives the sweep
    assert!(generator.storage_root().is_dir());
}

#[tokio::test]
async fn test_large_window_deletes_nothing() {
    let dir = TempDir::new().unwrap();
    let generator = generator(&dir);
    generator.generate("example.com", false).await.unwrap();
    generator.generate("example.org", false).await.unwrap();

    let stats = generator.cleanup_older_than(3650).await.unwrap();
    assert_eq!(stats.deleted_count, 0);
    assert_eq!(generator.list_records().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_root() {
    let dir = TempDir::new().unwrap();
    let generator = generator(&dir);

    let stats = generator.cleanup_older_than(1).await.unwrap();
    assert_eq!(stats.deleted_count, 0);

    let report = CleanupReport::from_stats(&stats, 1);
    assert!(report.success);
    assert_eq!(report.deleted_count, 0);
}

#[tokio::test]
async fn test_folder_without_metadata_uses_filesystem_time() {
    let dir = TempDir::new().unwrap();
    let generator = generator(&dir);
    let stray = generator.storage_root().join("leftover");
    std::fs::create_dir_all(&stray).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(generator.cleanup_older_than(1).await.unwrap().deleted_count, 0);
    assert!(stray.exists());

    assert_eq!(generator.cleanup_older_than(0).await.unwrap().deleted_count, 1);
    assert!(!stray.exists());
}

#[tokio::test]
async fn test_unparseable_metadata_falls_back() {
    let dir = TempDir::new().unwrap();
    let generator = generator(&dir);
    let record = generator.generate("example.com", false).await.unwrap();
    std::fs::write(
        record.folder.join(METADATA_FILENAME),
        "url: https://example.com\ncreated: yesterday\n",
    )
    .unwrap();

    assert_eq!(generator.cleanup_older_than(1).await.unwrap().deleted_count, 0);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(generator.cleanup_older_than(0).await.unwrap().deleted_count, 1);
}

#[tokio::test]
async fn test_stale_record_swept_on_generate() {
    let dir = TempDir::new().unwrap();
    let generator = generator(&dir);
    let old = generator.generate("old.example", false).await.unwrap();

    let backdated = chrono::Utc::now() - chrono::Duration::days(3);
    let text = format!(
        "url: https://old.example\ncreated: {}\nexpires: {}\nfilename: qrcode.png\n",
        qr_code_api::qr::metadata::format_timestamp(&backdated),
        qr_code_api::qr::metadata::format_timestamp(&backdated),
    );
    std::fs::write(old.folder.join(METADATA_FILENAME), text).unwrap();

    let fresh = generator.generate("new.example", true).await.unwrap();
    assert!(!old.folder.exists());
    assert!(fresh.folder.exists());
}
