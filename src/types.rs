// src/types.rs
// Core domain types for the dream generation pipeline

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// The five supported art styles. Anything outside this set is rejected
/// before a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleId {
    Ghibli,
    VanGogh,
    Cthulhu,
    Minimalist,
    CyberXianxia,
}

impl StyleId {
    pub const ALL: [StyleId; 5] = [
        StyleId::Ghibli,
        StyleId::VanGogh,
        StyleId::Cthulhu,
        StyleId::Minimalist,
        StyleId::CyberXianxia,
    ];

    /// The identifier the agent expects on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleId::Ghibli => "Ghibli",
            StyleId::VanGogh => "Van Gogh",
            StyleId::Cthulhu => "Cthulhu",
            StyleId::Minimalist => "Minimalist",
            StyleId::CyberXianxia => "Cyber_Xianxia",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ghibli" => Ok(StyleId::Ghibli),
            "Van Gogh" => Ok(StyleId::VanGogh),
            "Cthulhu" => Ok(StyleId::Cthulhu),
            "Minimalist" => Ok(StyleId::Minimalist),
            "Cyber_Xianxia" => Ok(StyleId::CyberXianxia),
            _ => Err(ValidationError::InvalidStyle),
        }
    }
}

/// One submission: the dream text plus the chosen style.
/// Built on submit, consumed by a single `generate_dream` call.
#[derive(Debug, Clone)]
pub struct DreamRequest {
    pub text: String,
    pub style: StyleId,
}

/// One entry of the agent reply's `messages` array.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentMessage {
    #[serde(rename = "type", default)]
    pub msg_type: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// The canonical result recovered from an agent reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamResult {
    pub image_url: Option<String>,
    pub diagnosis: Option<String>,
    pub advice: String,
    pub keywords: Vec<String>,
}

/// How a validated result should be rendered. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a dream: the agent replied with guidance only.
    Guide,
    /// A full dream book: illustration plus diagnosis.
    Complete,
    /// Exactly one of image/diagnosis came back; treated as a format
    /// failure by callers, not a third UI state.
    Malformed,
}

impl DreamResult {
    pub fn outcome(&self) -> Outcome {
        match (&self.image_url, &self.diagnosis) {
            (None, None) => Outcome::Guide,
            (Some(_), Some(_)) => Outcome::Complete,
            _ => Outcome::Malformed,
        }
    }
}
