use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const UNKNOWN_POS: &str = "UNKNOWN";
pub const METHOD_DOWNLOADED: &str = "downloaded";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Word is required")]
    WordRequired,
}

/// A validated request: the word is trimmed and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LemmaRequest {
    word: String,
}

impl LemmaRequest {
    pub fn new(word: &str) -> Result<Self, RequestError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(RequestError::WordRequired);
        }
        Ok(Self {
            word: word.to_string(),
        })
    }

    pub fn parse(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RequestError::InvalidJson)?;
        let Value::Object(fields) = value else {
            return Err(RequestError::InvalidJson);
        };
        match fields.get("word") {
            Some(Value::String(word)) => Self::new(word),
            _ => Err(RequestError::WordRequired),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LemmaResult {
    pub original: String,
    pub lemma: String,
    pub pos: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl LemmaResult {
    pub fn lemmatized(original: &str, lemma: String, pos: String) -> Self {
        Self {
            original: original.to_string(),
            lemma,
            pos,
            success: true,
            error: None,
            method: None,
        }
    }

    /// Echoes the word back, flagged as a failure.
    pub fn degraded(original: &str, error: String) -> Self {
        Self {
            original: original.to_string(),
            lemma: original.to_string(),
            pos: UNKNOWN_POS.to_string(),
            success: false,
            error: Some(error),
            method: None,
        }
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new<E: std::fmt::Display>(error: E) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
