// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Record identifiers: `qr_<YYYYMMDD_HHMMSS>_<8 hex chars>`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "qr_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const SUFFIX_LEN: usize = 8;

/// Storage key and external reference of a single QR record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Build a fresh identifier for a record created at `now`
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: u32 = rand::random();
        RecordId(format!(
            "{}{}_{:08x}",
            PREFIX,
            now.format(TIMESTAMP_FORMAT),
            suffix
        ))
    }

    /// Accept only identifiers of the generated shape.
    ///
    /// Anything else (arbitrary names, `..`, path separators) is treated as
    /// an unknown record, so callers can never address paths outside the
    /// storage root.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(PREFIX)?;
        let mut parts = rest.split('_');
        let date = parts.next()?;
        let time = parts.next()?;
        let suffix = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(date, 8) || !digits(time, 6) {
            return None;
        }
        if suffix.len() != SUFFIX_LEN
            || !suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return None;
        }

        Some(RecordId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Random part of the identifier
    pub fn suffix(&self) -> &str {
        &self.0[self.0.len() - SUFFIX_LEN..]
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
