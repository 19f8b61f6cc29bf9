use std::io;
use std::sync::Arc;

use axum::{Json, Router};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::response::Response;
use axum::routing::{any, get};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::config::Config;
use crate::protocol::handler::{ApiResponse, handle_request};
use crate::service::lemma_service::LemmaService;

pub const HEALTH_PATH: &str = "/health";

#[derive(Clone)]
pub struct AppState {
    service: Arc<LemmaService>,
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    model: String,
    loaded: bool,
}

pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn build_router(service: Arc<LemmaService>, endpoint: &str) -> Router {
    Router::new()
        .route(&normalize_endpoint(endpoint), any(lemmatize))
        .route(HEALTH_PATH, get(health))
        .with_state(AppState { service })
}

pub fn into_http_response(api_response: ApiResponse) -> Response {
    let mut response = Response::new(Body::from(api_response.body));
    *response.status_mut() = api_response.status;

    let headers = response.headers_mut();
    for (name, value) in api_response.headers {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            headers.insert(name, HeaderValue::from_static(value));
        }
    }
    response
}

async fn lemmatize(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // An unreadable or oversized body goes through the core as an empty one,
    // so POST still answers 400 with the CORS headers.
    let body = body.unwrap_or_else(|rejection| {
        warn!("discarding request body: {}", rejection);
        Bytes::new()
    });
    let service = Arc::clone(&state.service);
    // Loading or downloading the model blocks.
    let outcome =
        tokio::task::spawn_blocking(move || handle_request(&service, &method, &body)).await;

    match outcome {
        Ok(api_response) => into_http_response(api_response),
        Err(e) => {
            error!("lemmatize task failed: {}", e);
            into_http_response(ApiResponse::internal_error())
        }
    }
}

// Reports state only; never triggers a load.
async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        model: state.service.model_name().to_string(),
        loaded: state.service.is_loaded(),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("shutting down");
}

pub async fn serve(config: &Config, service: Arc<LemmaService>) -> io::Result<()> {
    let endpoint = normalize_endpoint(&config.endpoint);
    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(
        "lemmatization endpoint listening on http://{}{}",
        listener.local_addr()?,
        endpoint
    );

    axum::serve(listener, build_router(service, &endpoint))
        .with_graceful_shutdown(shutdown_signal())
        .await
}
