use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    // The only failure class that triggers an acquisition
    #[error("model package not found at {0}")]
    NotFound(PathBuf),

    #[error("invalid model package: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }

    pub fn invalid<E: std::fmt::Display>(e: E) -> Self {
        Self::Invalid(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("package source returned status {0}")]
    Status(u16),

    #[error("package could not be decoded: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AcquireError {
    pub fn decode<E: std::fmt::Display>(e: E) -> Self {
        Self::Decode(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("empty input")]
    EmptyInput,

    #[error("annotation produced no tokens")]
    NoTokens,

    #[error("{0}")]
    Failed(String),
}

// Display strings end up in the `error` field of degraded results.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to load model: {0}")]
    Load(LoadError),

    #[error("Failed to download model: {0}")]
    Acquire(AcquireError),

    #[error("Failed to download model: {0}")]
    Reload(LoadError),

    #[error("Model error: {0}")]
    Annotate(AnnotateError),

    #[error("Model error: annotation panicked")]
    Panicked,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
