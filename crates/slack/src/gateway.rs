//! Messaging Gateway - the only component that talks to the Slack Web API.
//!
//! Wraps `chat.postMessage` and `chat.update`. Every platform-reported
//! failure surfaces as a structured `GatewayError`; there are no retries,
//! a single failed call is reported to the caller as-is.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::blocks::{Block, MessageTemplate};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("slack api rejected the call: {code}")]
    Api { code: String },
    #[error("slack api transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("slack api response was malformed: {0}")]
    MalformedResponse(String),
}

/// Opaque identity of a sent message, used to update it in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: String,
    pub ts: String,
}

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn post_message(
        &self,
        channel: &str,
        message: &MessageTemplate,
    ) -> Result<MessageRef, GatewayError>;

    async fn update_message(
        &self,
        target: &MessageRef,
        message: &MessageTemplate,
    ) -> Result<MessageRef, GatewayError>;
}

pub struct SlackApiGateway {
    client: Client,
    bot_token: SecretString,
    base_url: String,
}

impl SlackApiGateway {
    pub fn new(bot_token: SecretString, base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), bot_token, base_url: base_url.into() }
    }

    async fn call(
        &self,
        method: &'static str,
        body: &ApiRequest<'_>,
    ) -> Result<MessageRef, GatewayError> {
        let url = format!("{}/{method}", self.base_url.trim_end_matches('/'));
        debug!(event_name = "egress.slack.api_call", method, channel = body.channel, "calling slack api");

        let response = self
            .client
            .post(url)
            .bearer_auth(self.bot_token.expose_secret())
            .json(body)
            .send()
            .await?
            .json::<ApiResponse>()
            .await?;

        message_ref_from_response(response, body.channel)
    }
}

#[async_trait]
impl MessagingGateway for SlackApiGateway {
    async fn post_message(
        &self,
        channel: &str,
        message: &MessageTemplate,
    ) -> Result<MessageRef, GatewayError> {
        self.call(
            "chat.postMessage",
            &ApiRequest {
                channel,
                ts: None,
                text: &message.fallback_text,
                blocks: &message.blocks,
            },
        )
        .await
    }

    async fn update_message(
        &self,
        target: &MessageRef,
        message: &MessageTemplate,
    ) -> Result<MessageRef, GatewayError> {
        self.call(
            "chat.update",
            &ApiRequest {
                channel: &target.channel,
                ts: Some(&target.ts),
                text: &message.fallback_text,
                blocks: &message.blocks,
            },
        )
        .await
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<&'a str>,
    text: &'a str,
    blocks: &'a [Block],
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

fn message_ref_from_response(
    response: ApiResponse,
    requested_channel: &str,
) -> Result<MessageRef, GatewayError> {
    if !response.ok {
        return Err(GatewayError::Api {
            code: response.error.unwrap_or_else(|| "unknown_error".to_string()),
        });
    }

    let ts = response.ts.ok_or_else(|| {
        GatewayError::MalformedResponse("ok response is missing `ts`".to_string())
    })?;
    let channel = response.channel.unwrap_or_else(|| requested_channel.to_string());

    Ok(MessageRef { channel, ts })
}

#[cfg(test)]
mod tests {
    use super::{message_ref_from_response, ApiResponse, GatewayError, MessageRef};

    fn response(raw: &str) -> ApiResponse {
        serde_json::from_str(raw).expect("test response should deserialize")
    }

    #[test]
    fn ok_response_yields_message_ref() {
        let parsed = message_ref_from_response(
            response(r#"{"ok": true, "channel": "C456", "ts": "1730000000.1000"}"#),
            "C456",
        )
        .expect("ok response");

        assert_eq!(
            parsed,
            MessageRef { channel: "C456".to_string(), ts: "1730000000.1000".to_string() }
        );
    }

    #[test]
    fn ok_response_without_channel_falls_back_to_requested() {
        let parsed = message_ref_from_response(
            response(r#"{"ok": true, "ts": "1730000000.1000"}"#),
            "C456",
        )
        .expect("ok response");

        assert_eq!(parsed.channel, "C456");
    }

    #[test]
    fn platform_error_surfaces_as_api_error_code() {
        let error = message_ref_from_response(
            response(r#"{"ok": false, "error": "channel_not_found"}"#),
            "C456",
        )
        .expect_err("platform rejection must fail");

        assert!(matches!(error, GatewayError::Api { ref code } if code == "channel_not_found"));
    }

    #[test]
    fn error_without_code_maps_to_unknown() {
        let error = message_ref_from_response(response(r#"{"ok": false}"#), "C456")
            .expect_err("platform rejection must fail");

        assert!(matches!(error, GatewayError::Api { ref code } if code == "unknown_error"));
    }

    #[test]
    fn ok_response_missing_ts_is_malformed() {
        let error = message_ref_from_response(response(r#"{"ok": true}"#), "C456")
            .expect_err("missing ts must fail");

        assert!(matches!(error, GatewayError::MalformedResponse(_)));
    }
}
