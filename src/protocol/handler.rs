use axum::http::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, error};

use crate::protocol::types::{ErrorBody, LemmaRequest};
use crate::service::lemma_service::LemmaService;

pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed. Use POST.";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Transport-neutral response; the adapters only translate it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl ApiResponse {
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            headers: CORS_HEADERS.to_vec(),
            body: String::new(),
        }
    }

    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::with_json_body(status, body),
            Err(e) => {
                error!("failed to serialize response: {}", e);
                Self::internal_error()
            }
        }
    }

    pub fn error<E: std::fmt::Display>(status: StatusCode, message: E) -> Self {
        Self::json(status, &ErrorBody::new(message))
    }

    // Built by hand so it cannot fail itself.
    pub fn internal_error() -> Self {
        Self::with_json_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!(r#"{{"error":"{}"}}"#, INTERNAL_SERVER_ERROR),
        )
    }

    fn with_json_body(status: StatusCode, body: String) -> Self {
        let mut headers = CORS_HEADERS.to_vec();
        headers.push(CONTENT_TYPE_JSON);
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

pub fn handle_request(service: &LemmaService, method: &Method, body: &[u8]) -> ApiResponse {
    if *method == Method::OPTIONS {
        return ApiResponse::preflight();
    }
    if *method != Method::POST {
        return ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED);
    }

    let request = match LemmaRequest::parse(body) {
        Ok(request) => request,
        Err(e) => {
            debug!("rejected request: {}", e);
            return ApiResponse::error(StatusCode::BAD_REQUEST, e);
        }
    };

    // Lemmatization failures are still a 200; the body says success:false.
    let result = service.lemmatize(&request);
    ApiResponse::json(StatusCode::OK, &result)
}
