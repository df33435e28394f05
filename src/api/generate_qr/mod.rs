// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! QR generation API endpoint module
//!
//! Provides POST /generate for URL-to-QR generation.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::generate_qr_handler;
pub use request::GenerateQrRequest;
pub use response::GenerateQrResponse;
