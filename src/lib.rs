// src/lib.rs

pub mod classify;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod types;
pub mod validate;

pub use classify::{Notice, classify};
pub use client::DreamClient;
pub use config::DreamConfig;
pub use error::{DreamError, ErrorKind};
pub use types::{DreamRequest, DreamResult, Outcome, StyleId};
pub use validate::{ValidationError, validate_input, validate_result, validate_style};
