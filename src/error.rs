//! Error types for the analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("sample size {requested} out of bounds (1..={max})")]
    InvalidSampleSize { requested: usize, max: usize },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source unavailable or malformed response: {0}")]
    Source(String),

    #[error("no comments to summarize")]
    EmptyBatch,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
