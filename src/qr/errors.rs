// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for QR record generation and storage
//!
//! Every Generator operation returns one of these instead of panicking:
//! - Validation errors (empty or unusable input)
//! - Not-found errors (unknown record identifier)
//! - Storage errors (filesystem failures, with the underlying cause)
//! - Encoding errors (QR symbol or PNG rendering failed)

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Unexpected,
}

#[derive(Error, Debug)]
pub enum QrError {
    /// Caller supplied input that cannot produce a record
    #[error("{0}")]
    Validation(String),

    /// No record exists under the requested identifier
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Filesystem operation failed
    #[error("Storage error while {context} ({path}): {source}")]
    Storage {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// QR symbol could not be built or the PNG could not be written
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Stored metadata file is unreadable as key/value pairs
    #[error("Malformed metadata in {path}: {reason}")]
    Metadata { path: PathBuf, reason: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl QrError {
    pub fn storage(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QrError::Storage {
            context,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QrError::Validation(_) => ErrorKind::Validation,
            QrError::NotFound(_) => ErrorKind::NotFound,
            QrError::Storage { .. } => ErrorKind::Storage,
            QrError::Encoding(_) | QrError::Metadata { .. } | QrError::Unexpected(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

/// Errors raised by an external publisher
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Invalid publisher URL: {0}")]
    InvalidUrl(String),

    #[error("Upload of {key} failed: {reason}")]
    UploadFailed { key: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),
}

pub type QrResult<T> = std::result::Result<T, QrError>;
