//! Slack integration for jobtally.
//!
//! - **Block Kit** (`blocks`) - typed message model and builders
//! - **Messages** (`messages`) - the reminder, confirmation, and daily
//!   report composers
//! - **Interactions** (`interactions`) - inbound block-action payload
//!   parsing
//! - **Gateway** (`gateway`) - `chat.postMessage` / `chat.update` over the
//!   Slack Web API

pub mod blocks;
pub mod gateway;
pub mod interactions;
pub mod messages;

pub use blocks::{Block, ButtonElement, ButtonStyle, MessageBuilder, MessageTemplate, TextObject};
pub use gateway::{GatewayError, MessageRef, MessagingGateway, SlackApiGateway};
pub use interactions::{parse_interaction, BlockActionEvent, InteractionParseError};
pub use messages::{
    confirmation_message, daily_report_message, reminder_message, APPLIED_ACTION_ID,
};
