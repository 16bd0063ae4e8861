// src/error.rs
// Tagged error type for the generation pipeline

use thiserror::Error;

use crate::validate::ValidationError;

/// Stable error taxonomy surfaced to callers. Consumers switch on
/// `kind()`, never on downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Api,
    Timeout,
    Validation,
    Network,
    Unknown,
}

/// Every failure a `generate_dream` call can produce.
#[derive(Error, Debug)]
pub enum DreamError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DreamError>;

impl DreamError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DreamError::Config(_) => ErrorKind::Config,
            DreamError::Api { .. } => ErrorKind::Api,
            DreamError::Timeout(_) => ErrorKind::Timeout,
            DreamError::Validation(_) => ErrorKind::Validation,
            DreamError::Network(_) => ErrorKind::Network,
            DreamError::Other(_) => ErrorKind::Unknown,
        }
    }
}

impl From<reqwest::Error> for DreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // Transport-level timeout, same taxonomy slot as the deadline
            DreamError::Timeout(0)
        } else if err.is_connect() || err.is_request() || err.is_body() {
            DreamError::Network(err.to_string())
        } else {
            DreamError::Other(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_every_variant() {
        assert_eq!(DreamError::config("x").kind(), ErrorKind::Config);
        assert_eq!(DreamError::api(500, "boom").kind(), ErrorKind::Api);
        assert_eq!(DreamError::Timeout(180).kind(), ErrorKind::Timeout);
        assert_eq!(
            DreamError::Validation(ValidationError::MissingAdvice).kind(),
            ErrorKind::Validation
        );
        assert_eq!(DreamError::network("down").kind(), ErrorKind::Network);
        assert_eq!(DreamError::Other("?".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn validation_converts_without_rewrapping() {
        let err: DreamError = ValidationError::BadKeywords.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("keywords"));
    }

    #[test]
    fn api_error_displays_status() {
        let err = DreamError::api(429, "slow down");
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("slow down"));
    }
}
