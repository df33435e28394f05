// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::{HeaderName, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::generate_qr::generate_qr_handler;
use super::handlers::{
    cleanup_handler, health_handler, metadata_handler, qr_image_handler, root_handler,
    view_handler,
};
use super::request_id::{attach_request_id, REQUEST_ID_HEADER};
use crate::config::ServiceConfig;
use crate::qr::Generator;

/// Shared handler context, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig, generator: Generator) -> Self {
        Self {
            generator: Arc::new(generator),
            config: Arc::new(config),
        }
    }

    /// State backed by a plain Generator over `config.storage_root`
    pub fn from_config(config: ServiceConfig) -> Self {
        let generator = Generator::new(config.generator_config());
        Self::new(config, generator)
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/generate", post(generate_qr_handler))
        .route("/qr/:identifier", get(qr_image_handler))
        .route("/metadata/:identifier", get(metadata_handler))
        .route("/view/:identifier", get(view_handler))
        .route("/cleanup", post(cleanup_handler))
        .layer(middleware::from_fn(attach_request_id))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub async fn start_server(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.listen_addr.parse::<SocketAddr>()?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
