//! Inbound interaction payloads. Slack delivers block actions as a
//! form-encoded `payload` field whose value is a JSON document; only the
//! fields the bot acts on are modeled here.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractionParseError {
    #[error("malformed interaction payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("interaction payload carries no actions")]
    MissingAction,
}

/// The one interaction shape the bot handles: a button press on a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockActionEvent {
    pub action_id: String,
    pub channel_id: String,
    pub message_ts: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
struct RawInteraction {
    #[serde(default)]
    actions: Vec<RawAction>,
    channel: RawChannel,
    message: RawMessage,
    user: RawUser,
}

#[derive(Debug, Deserialize)]
struct RawAction {
    action_id: String,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    ts: String,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
}

pub fn parse_interaction(payload: &str) -> Result<BlockActionEvent, InteractionParseError> {
    let raw: RawInteraction = serde_json::from_str(payload)?;
    let action = raw.actions.into_iter().next().ok_or(InteractionParseError::MissingAction)?;

    Ok(BlockActionEvent {
        action_id: action.action_id,
        channel_id: raw.channel.id,
        message_ts: raw.message.ts,
        user_id: raw.user.id,
    })
}
