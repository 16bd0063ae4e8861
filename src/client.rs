// src/client.rs
// Request orchestrator: one call in, one typed result or typed error out

use std::time::Duration;

use reqwest::{Client as ReqwestClient, header};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::DreamConfig;
use crate::error::{DreamError, Result};
use crate::extract::extract_candidate;
use crate::types::{DreamRequest, DreamResult, StyleId};
use crate::validate::{validate_input, validate_result};

/// Client for the hosted dream-generation agent. Holds a connection pool
/// and the resolved configuration; every `generate_dream` call is
/// otherwise independent.
pub struct DreamClient {
    http: ReqwestClient,
    config: DreamConfig,
}

impl DreamClient {
    pub fn new(config: DreamConfig) -> Result<Self> {
        let http = ReqwestClient::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| DreamError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(DreamConfig::from_env())
    }

    pub fn config(&self) -> &DreamConfig {
        &self.config
    }

    /// Run one submission. The request is consumed by this single call;
    /// nothing is retained across calls.
    pub async fn generate(&self, request: &DreamRequest) -> Result<DreamResult> {
        self.generate_dream(&request.text, request.style).await
    }

    /// Submit a dream description and style, wait for the agent, and
    /// recover a validated `DreamResult`.
    ///
    /// Fails with `Config` when the bot id or token is missing, `Api` on a
    /// non-2xx status, `Timeout` when the deadline trips, `Validation`
    /// when the reply cannot be shaped into a result, and `Network` only
    /// for genuine transport failures.
    pub async fn generate_dream(&self, text: &str, style: StyleId) -> Result<DreamResult> {
        validate_input(text)?;

        let bot_id = self
            .config
            .bot_id
            .as_deref()
            .ok_or_else(|| DreamError::config("missing DREAM_BOT_ID: set it in the environment or .env"))?;
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(|| DreamError::config("missing DREAM_API_TOKEN: set it in the environment or .env"))?;

        // Pasted credentials often carry stray whitespace or line breaks
        let token = normalize_token(token);

        let query = format!("{}\nStyle: {}", text.trim(), style);
        let body = json!({
            "bot_id": bot_id,
            "user": self.config.user_id,
            "query": query,
            "stream": false,
        });

        debug!(
            url = %self.config.api_url,
            style = %style,
            timeout = self.config.request_timeout,
            "dispatching generation request"
        );

        let deadline = Duration::from_secs(self.config.request_timeout);
        let call = self.dispatch(&token, &body);

        // The deadline and the request race; losing the race drops the
        // in-flight future, which cancels the request and the timer alike.
        let reply = match tokio::time::timeout(deadline, call).await {
            Ok(reply) => reply?,
            Err(_) => {
                warn!(secs = self.config.request_timeout, "generation request hit the deadline");
                return Err(DreamError::Timeout(self.config.request_timeout));
            }
        };

        let candidate = extract_candidate(&reply);
        let result = validate_result(&candidate)?;

        debug!(outcome = ?result.outcome(), "generation request settled");
        Ok(result)
    }

    /// One POST to the agent, returning the parsed success body or a typed
    /// failure. Runs entirely under the caller's deadline.
    async fn dispatch(&self, token: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .post(&self.config.api_url)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &raw));
        }

        let reply = response.json::<Value>().await.map_err(|e| {
            DreamError::network(format!("failed to read agent reply: {e}"))
        })?;
        Ok(reply)
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().replace(['\n', '\r'], "")
}

/// Build an `Api` error from a failure body of shape
/// `{ code?, msg?, message?, error? }`, best-effort. A 4101 code or a
/// bearer-token marker gets credential-specific wording.
fn api_error(status: u16, raw_body: &str) -> DreamError {
    let parsed: Value = serde_json::from_str(raw_body).unwrap_or(Value::Null);

    let mut message = ["msg", "message", "error"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("API request failed: {status}"));

    let code = parsed.get("code").and_then(Value::as_i64);
    if code == Some(4101) || message.contains("Bearer token") || message.contains("token invalid") {
        message = format!(
            "invalid credential (4101): check the token for stray whitespace, \
             expiry, or regenerate it on the platform ({message})"
        );
    }

    DreamError::api(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::validate::ValidationError;

    fn offline_client() -> DreamClient {
        DreamClient::new(DreamConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn input_is_validated_before_config() {
        // No bot id or token configured, but the short input fails first.
        let client = offline_client();
        let err = client.generate_dream("ab", StyleId::Ghibli).await.unwrap_err();
        assert!(matches!(
            err,
            DreamError::Validation(ValidationError::InputTooShort)
        ));
    }

    #[tokio::test]
    async fn missing_bot_id_is_a_config_error() {
        let client = offline_client();
        let err = client
            .generate_dream("a vivid dream", StyleId::Minimalist)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("DREAM_BOT_ID"));
    }

    #[tokio::test]
    async fn missing_token_is_a_config_error() {
        let config = DreamConfig {
            bot_id: Some("bot-1".into()),
            ..DreamConfig::default()
        };
        let client = DreamClient::new(config).unwrap();
        let err = client
            .generate_dream("a vivid dream", StyleId::Minimalist)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("DREAM_API_TOKEN"));
    }

    #[test]
    fn token_normalization_strips_whitespace_and_linebreaks() {
        assert_eq!(normalize_token("  pat_abc\n"), "pat_abc");
        assert_eq!(normalize_token("pat_\r\nabc "), "pat_abc");
        assert_eq!(normalize_token("pat_abc"), "pat_abc");
    }

    #[test]
    fn api_error_prefers_msg_then_message_then_error() {
        let err = api_error(500, r#"{"msg": "from msg", "message": "from message"}"#);
        assert!(err.to_string().contains("from msg"));

        let err = api_error(500, r#"{"message": "from message"}"#);
        assert!(err.to_string().contains("from message"));

        let err = api_error(500, r#"{"error": "from error"}"#);
        assert!(err.to_string().contains("from error"));
    }

    #[test]
    fn api_error_survives_non_json_bodies() {
        let err = api_error(502, "<html>bad gateway</html>");
        match err {
            DreamError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("502"));
            }
            other => panic!("expected Api error, got {other}"),
        }
    }

    #[test]
    fn code_4101_gets_credential_wording() {
        let err = api_error(401, r#"{"code": 4101, "msg": "auth failed"}"#);
        assert!(err.to_string().contains("invalid credential (4101)"));
    }
}
