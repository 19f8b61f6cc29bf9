use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::protocol::handler::{ApiResponse, METHOD_NOT_ALLOWED, handle_request};
use crate::service::lemma_service::LemmaService;

// Event and response in the API Gateway proxy shape that Netlify functions
// also use.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<ApiResponse> for FunctionResponse {
    fn from(response: ApiResponse) -> Self {
        Self {
            status_code: response.status.as_u16(),
            headers: response
                .headers
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body: response.body,
        }
    }
}

pub fn handle_event(service: &LemmaService, event: &FunctionEvent) -> FunctionResponse {
    let raw_method = event.http_method.as_deref().unwrap_or_default();
    let method = match Method::from_bytes(raw_method.trim().to_ascii_uppercase().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED).into();
        }
    };
    // A missing body reads as an empty object, which fails on the word.
    let body = event.body.as_deref().unwrap_or("{}");
    handle_request(service, &method, body.as_bytes()).into()
}

pub async fn dispatch(service: Arc<LemmaService>, event: FunctionEvent) -> FunctionResponse {
    match tokio::task::spawn_blocking(move || handle_event(&service, &event)).await {
        Ok(response) => response,
        Err(e) => {
            error!("function invocation failed: {}", e);
            ApiResponse::internal_error().into()
        }
    }
}
