// src/classify.rs
// Maps pipeline errors to user-facing notices

use crate::error::{DreamError, ErrorKind};

/// What the view layer shows for a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

/// Markers in an API error body that signal a rejected credential rather
/// than a generally failed request.
fn is_invalid_token(message: &str) -> bool {
    message.contains("4101")
        || message.contains("Bearer token")
        || message.to_lowercase().contains("token invalid")
        || message.to_lowercase().contains("invalid token")
}

/// Total mapping from any pipeline error to a displayable notice. Pure:
/// same error in, same notice out.
pub fn classify(err: &DreamError) -> Notice {
    let kind = err.kind();
    let message = match err {
        // Operator action needed, pass the detail through verbatim
        DreamError::Config(msg) => msg.clone(),

        DreamError::Api { status, message } => match status {
            400 => "The request was rejected, please adjust your input and retry".to_string(),
            401 | 403 if is_invalid_token(message) => {
                "Token authentication failed: check that the token is correct, \
                 has not expired, and does not need to be regenerated"
                    .to_string()
            }
            401 | 403 => "Authentication failed: check that the token is correct or has not expired"
                .to_string(),
            404 => "API endpoint not found: check the configured API URL".to_string(),
            429 => "Too many requests, please try again shortly".to_string(),
            500 => "The server hit an error, please try again later".to_string(),
            502 | 503 => "The service is temporarily unavailable, please try again later"
                .to_string(),
            504 => "Generation is taking longer than usual, please wait...".to_string(),
            _ => {
                if message.is_empty() {
                    format!("API error ({status})")
                } else {
                    format!("{message} ({status})")
                }
            }
        },

        DreamError::Timeout(_) => {
            "The request timed out: image generation can take a while, \
             please check your connection and retry"
                .to_string()
        }

        DreamError::Validation(inner) => {
            let detail = inner.to_string();
            if detail.is_empty() {
                "The reply had an unexpected format, please retry".to_string()
            } else {
                detail
            }
        }

        DreamError::Network(_) => {
            "Network connection failed, please check your connection and retry".to_string()
        }

        DreamError::Other(_) => "Something went wrong, please try again".to_string(),
    };

    Notice { kind, message }
}
