// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Plain-text metadata stored next to each QR image
//!
//! The file is a list of `key: value` lines with the keys `url`, `created`,
//! `expires` and `filename`. Readers split every line on its first colon and
//! trim both halves, so values may themselves contain colons (timestamps and
//! URLs do).

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

pub const METADATA_FILENAME: &str = "metadata.txt";
pub const IMAGE_FILENAME: &str = "qrcode.png";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordMetadata {
    pub url: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub filename: String,
}

impl RecordMetadata {
    pub fn to_text(&self) -> String {
        format!(
            "url: {}\ncreated: {}\nexpires: {}\nfilename: {}\n",
            self.url,
            format_timestamp(&self.created),
            format_timestamp(&self.expires),
            self.filename
        )
    }

    /// Rebuild typed metadata from parsed pairs; `None` when a key is missing
    /// or a timestamp does not parse.
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            url: pairs.get("url")?.clone(),
            created: parse_timestamp(pairs.get("created")?)?,
            expires: parse_timestamp(pairs.get("expires")?)?,
            filename: pairs.get("filename")?.clone(),
        })
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Flatten a metadata file into a key/value mapping
pub fn parse_pairs(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
