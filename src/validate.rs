// src/validate.rs
// Pure validators for user input, style selection, and extracted candidates

use serde_json::Value;
use thiserror::Error;

use crate::types::{DreamResult, StyleId};

/// Validation failures. Input-stage variants are resolved inline by the
/// caller; result-shape variants propagate through the orchestrator and
/// must never be reclassified as network failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter a dream description")]
    EmptyInput,

    #[error("dream description must be at least 3 characters")]
    InputTooShort,

    #[error("dream description must not exceed 1000 characters")]
    InputTooLong,

    #[error("please choose an art style")]
    MissingStyle,

    #[error("unknown art style")]
    InvalidStyle,

    #[error("agent reply is not a structured object")]
    NotAnObject,

    #[error("agent reply is missing the advice field")]
    MissingAdvice,

    #[error("agent reply keywords field is not a sequence")]
    BadKeywords,

    #[error("agent reply image_url field has the wrong type")]
    BadImageUrl,

    #[error("agent reply diagnosis field has the wrong type")]
    BadDiagnosis,
}

/// Check the dream description. Length limits apply to the trimmed text,
/// counted in characters.
pub fn validate_input(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let len = trimmed.chars().count();
    if len < 3 {
        return Err(ValidationError::InputTooShort);
    }
    if len > 1000 {
        return Err(ValidationError::InputTooLong);
    }

    Ok(())
}

/// Parse a style identifier arriving as a raw string (CLI argument, form
/// field). The typed API already guarantees membership; this is the
/// boundary check for untyped callers.
pub fn validate_style(raw: Option<&str>) -> Result<StyleId, ValidationError> {
    match raw {
        None => Err(ValidationError::MissingStyle),
        Some(s) if s.trim().is_empty() => Err(ValidationError::MissingStyle),
        Some(s) => s.parse(),
    }
}

/// Validate an extracted candidate and normalize it into a `DreamResult`.
/// `advice` is required text; `keywords` must be a sequence when present;
/// `image_url`/`diagnosis` must each be text or null. Missing optionals
/// normalize to `None`/empty.
pub fn validate_result(candidate: &Value) -> Result<DreamResult, ValidationError> {
    let Some(obj) = candidate.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    let advice = match obj.get("advice") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(ValidationError::MissingAdvice),
    };

    let keywords = match obj.get("keywords") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(_) => return Err(ValidationError::BadKeywords),
    };

    let image_url = match obj.get("image_url") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ValidationError::BadImageUrl),
    };

    let diagnosis = match obj.get("diagnosis") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ValidationError::BadDiagnosis),
    };

    Ok(DreamResult {
        image_url,
        diagnosis,
        advice,
        keywords,
    })
}
