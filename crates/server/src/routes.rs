//! The HTTP surface: three externally triggered entry points translating
//! inbound triggers into counter, composer, and gateway calls.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use jobtally_core::config::AppConfig;
use jobtally_slack::{
    confirmation_message, daily_report_message, gateway::MessageRef, parse_interaction,
    reminder_message, MessagingGateway, APPLIED_ACTION_ID,
};
use jobtally_store::CounterStore;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::health;

#[derive(Clone)]
pub struct AppState {
    pub alerts_channel: String,
    pub report_channel: String,
    pub daily_target: u32,
    pub store: Arc<dyn CounterStore>,
    pub gateway: Arc<dyn MessagingGateway>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn CounterStore>,
        gateway: Arc<dyn MessagingGateway>,
    ) -> Self {
        Self {
            alerts_channel: config.slack.alerts_channel.clone(),
            report_channel: config.slack.report_channel.clone(),
            daily_target: config.goal.daily_target,
            store,
            gateway,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/actions", post(slack_actions))
        .route("/slack/send_alert", get(send_alert))
        .route("/slack/daily_report", get(daily_report))
        .route("/health", get(health::health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ActionCallback {
    payload: String,
}

fn error_text(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "text": message }))).into_response()
}

/// Button-click callback. A matching applied action increments the counter
/// and swaps the originating reminder for a confirmation; anything else is
/// acknowledged and ignored.
async fn slack_actions(
    State(state): State<AppState>,
    Form(callback): Form<ActionCallback>,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    let event = match parse_interaction(&callback.payload) {
        Ok(event) => event,
        Err(error) => {
            warn!(
                event_name = "ingress.slack.action_malformed",
                correlation_id = %correlation_id,
                error = %error,
                "rejecting unparseable interaction payload"
            );
            return error_text(format!("Error: {error}"));
        }
    };

    if event.action_id != APPLIED_ACTION_ID {
        info!(
            event_name = "ingress.slack.action_ignored",
            correlation_id = %correlation_id,
            action_id = %event.action_id,
            "ignoring unrelated action"
        );
        return StatusCode::OK.into_response();
    }

    let count = match state.store.increment().await {
        Ok(count) => count,
        Err(error) => return error_text(format!("Error: {error}")),
    };
    info!(
        event_name = "action.applied.recorded",
        correlation_id = %correlation_id,
        user_id = %event.user_id,
        count,
        "application marked as applied"
    );

    let message =
        match confirmation_message(&event.user_id, count, state.daily_target, Local::now()) {
            Ok(message) => message,
            Err(error) => return error_text(format!("Error: {error}")),
        };

    let target = MessageRef { channel: event.channel_id, ts: event.message_ts };
    match state.gateway.update_message(&target, &message).await {
        Ok(_) => {
            info!(
                event_name = "egress.slack.message_updated",
                correlation_id = %correlation_id,
                channel = %target.channel,
                ts = %target.ts,
                "reminder replaced with confirmation"
            );
            (StatusCode::OK, Json(json!({ "text": "Applied!" }))).into_response()
        }
        Err(error) => {
            warn!(
                event_name = "egress.slack.update_failed",
                correlation_id = %correlation_id,
                channel = %target.channel,
                error = %error,
                "confirmation update failed"
            );
            (StatusCode::OK, Json(json!({ "text": format!("Failed to update message: {error}") })))
                .into_response()
        }
    }
}

/// Posts the reminder with its applied button to the alerts channel.
async fn send_alert(State(state): State<AppState>) -> (StatusCode, String) {
    let correlation_id = Uuid::new_v4().to_string();
    let message = reminder_message(state.daily_target);

    match state.gateway.post_message(&state.alerts_channel, &message).await {
        Ok(sent) => {
            info!(
                event_name = "egress.slack.reminder_posted",
                correlation_id = %correlation_id,
                channel = %sent.channel,
                ts = %sent.ts,
                "job application reminder posted"
            );
            (StatusCode::OK, format!("Message posted successfully! {}", sent.ts))
        }
        Err(error) => {
            warn!(
                event_name = "egress.slack.reminder_failed",
                correlation_id = %correlation_id,
                channel = %state.alerts_channel,
                error = %error,
                "job application reminder failed"
            );
            (StatusCode::OK, format!("Error sending message: {error}"))
        }
    }
}

/// Posts the end-of-day summary and resets the counter. The reset happens
/// whether or not the send succeeded; the failure text is still returned.
async fn daily_report(State(state): State<AppState>) -> (StatusCode, String) {
    let correlation_id = Uuid::new_v4().to_string();

    let count = match state.store.read().await {
        Ok(count) => count,
        Err(error) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error reading counter: {error}"),
            )
        }
    };

    let date = Local::now().format("%B %d, %Y").to_string();
    let message = match daily_report_message(count, state.daily_target, &date) {
        Ok(message) => message,
        Err(error) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error composing daily report: {error}"),
            )
        }
    };

    let send_result = state.gateway.post_message(&state.report_channel, &message).await;

    if let Err(error) = state.store.reset().await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Daily report attempted but counter reset failed: {error}"),
        );
    }
    info!(
        event_name = "counter.reset",
        correlation_id = %correlation_id,
        previous_count = count,
        "daily counter reset to zero"
    );

    match send_result {
        Ok(sent) => {
            info!(
                event_name = "egress.slack.report_posted",
                correlation_id = %correlation_id,
                channel = %sent.channel,
                ts = %sent.ts,
                count,
                "daily report posted"
            );
            (StatusCode::OK, format!("Daily report sent successfully and counter reset to 0! {}", sent.ts))
        }
        Err(error) => {
            warn!(
                event_name = "egress.slack.report_failed",
                correlation_id = %correlation_id,
                channel = %state.report_channel,
                error = %error,
                "daily report failed; counter was still reset"
            );
            (StatusCode::OK, format!("Error sending daily report: {error}"))
        }
    }
}
