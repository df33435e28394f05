// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod generate_qr;
pub mod handlers;
pub mod http_server;
pub mod request_id;

pub use errors::{ApiError, ErrorResponse};
pub use generate_qr::{generate_qr_handler, GenerateQrRequest, GenerateQrResponse};
pub use handlers::{CleanupResponse, HealthResponse, ServiceInfoResponse};
pub use http_server::{create_app, start_server, AppState};
pub use request_id::REQUEST_ID_HEADER;
