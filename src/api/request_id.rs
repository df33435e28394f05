// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request ids on error bodies
//!
//! `SetRequestIdLayer` assigns `x-request-id` (or keeps the caller's) and
//! `PropagateRequestIdLayer` echoes it on the response. This middleware
//! copies the same id into the JSON body of any `ApiError` response.

use axum::{
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::errors::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let response = next.run(request).await;
    let error = response.extensions().get::<ApiError>().cloned();
    let (Some(request_id), Some(error)) = (request_id, error) else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    let (_, body) = Json(error.to_response(Some(request_id)))
        .into_response()
        .into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, body)
}
