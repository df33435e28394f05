// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! QR record generation, storage and retention

pub mod encoder;
pub mod errors;
pub mod generator;
pub mod identifier;
pub mod metadata;
pub mod publisher;
pub mod viewer;

pub use encoder::{QrEncoder, PNG_SIGNATURE};
pub use errors::{ErrorKind, PublishError, QrError, QrResult};
pub use generator::{
    normalize_url, CleanupReport, CleanupStats, GenerateOptions, GenerateOutcome, Generation,
    Generator, GeneratorConfig, QrRecord,
};
pub use identifier::RecordId;
pub use metadata::{RecordMetadata, IMAGE_FILENAME, METADATA_FILENAME};
pub use publisher::{HttpPublisher, MockPublisher, Publisher, PublisherConfig};
