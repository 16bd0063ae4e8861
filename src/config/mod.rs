// src/config/mod.rs
// Environment-driven configuration for the generation client

use std::str::FromStr;

/// Default chat endpoint of the hosted agent. Overridable; the bot id and
/// token have no default and their absence is a configuration error at
/// call time, never a network error.
pub const DEFAULT_API_URL: &str = "https://api.coze.cn/open_api/v2/chat";

/// Stable user identifier sent with every request.
pub const DEFAULT_USER_ID: &str = "dream_painter_user";

/// Wall-clock deadline for one generation call, in seconds. Image
/// generation runs through several agent stages, hence the long default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

#[derive(Debug, Clone)]
pub struct DreamConfig {
    pub api_url: String,
    pub bot_id: Option<String>,
    pub api_token: Option<String>,
    pub user_id: String,
    pub request_timeout: u64,
    pub debug_logging: bool,
}

impl Default for DreamConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bot_id: None,
            api_token: None,
            user_id: DEFAULT_USER_ID.to_string(),
            request_timeout: DEFAULT_TIMEOUT_SECS,
            debug_logging: false,
        }
    }
}

// Handles values with trailing comments and extra whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            clean_val.parse::<T>().unwrap_or(default)
        }
        Err(_) => default,
    }
}

fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl DreamConfig {
    /// Load from the environment, reading a `.env` file first when one
    /// exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: env_var_or("DREAM_API_URL", DEFAULT_API_URL.to_string()),
            bot_id: env_var_opt("DREAM_BOT_ID"),
            api_token: env_var_opt("DREAM_API_TOKEN"),
            user_id: env_var_or("DREAM_USER_ID", DEFAULT_USER_ID.to_string()),
            request_timeout: env_var_or("DREAM_REQUEST_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            debug_logging: env_var_or("DREAM_DEBUG_LOGGING", false),
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug_logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_contract() {
        let config = DreamConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.user_id, "dream_painter_user");
        assert_eq!(config.request_timeout, 180);
        assert!(config.bot_id.is_none());
        assert!(config.api_token.is_none());
        assert!(!config.is_debug());
    }

    #[test]
    fn env_var_or_strips_comments_and_whitespace() {
        unsafe { std::env::set_var("DREAM_TEST_TIMEOUT", " 42 # generous ") };
        let parsed: u64 = env_var_or("DREAM_TEST_TIMEOUT", 0);
        assert_eq!(parsed, 42);
        unsafe { std::env::remove_var("DREAM_TEST_TIMEOUT") };
    }

    #[test]
    fn env_var_or_falls_back_on_parse_failure() {
        unsafe { std::env::set_var("DREAM_TEST_BAD", "not-a-number") };
        let parsed: u64 = env_var_or("DREAM_TEST_BAD", 7);
        assert_eq!(parsed, 7);
        unsafe { std::env::remove_var("DREAM_TEST_BAD") };
    }

    #[test]
    fn blank_required_values_read_as_absent() {
        unsafe { std::env::set_var("DREAM_TEST_BLANK", "   ") };
        assert_eq!(env_var_opt("DREAM_TEST_BLANK"), None);
        unsafe { std::env::remove_var("DREAM_TEST_BLANK") };
    }
}
