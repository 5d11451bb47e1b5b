//! The three outbound message composers. Pure functions from counter state
//! and clock to a `MessageTemplate`; nothing here talks to Slack.

use chrono::{DateTime, Local};
use jobtally_core::progress::{Achievement, ProgressError, ReportStatus};

use crate::blocks::{ButtonElement, ButtonStyle, MessageBuilder, MessageTemplate};

/// Action id carried by the reminder button and matched on the inbound
/// callback.
pub const APPLIED_ACTION_ID: &str = "application.applied.v1";

pub fn reminder_message(target: u32) -> MessageTemplate {
    MessageBuilder::new("Job Application Reminder")
        .section("reminder.header.v1", |section| {
            section.mrkdwn(":bell: *Job Application Reminder* :bell:");
        })
        .section("reminder.pep.v1", |section| {
            section.mrkdwn(
                "Time to apply for a job! Regular applications increase your chances of landing interviews.",
            );
        })
        .section("reminder.goal.v1", |section| {
            section.mrkdwn(format!("Today's goal: *{target} applications*"));
        })
        .actions("reminder.actions.v1", |actions| {
            actions.button(
                ButtonElement::new(APPLIED_ACTION_ID, "I've Applied!").style(ButtonStyle::Primary),
            );
        })
        .build()
}

/// Replaces the reminder after a click. Carries no actions block, so the
/// button disappears from the updated message.
pub fn confirmation_message(
    user_id: &str,
    count: u64,
    target: u32,
    now: DateTime<Local>,
) -> Result<MessageTemplate, ProgressError> {
    let achievement = Achievement::new(count, target)?;
    let time = now.format("%I:%M %p");
    let date = now.format("%B %d, %Y");

    Ok(MessageBuilder::new("Job Application Marked as Applied")
        .header("confirm.header.v1", "Job Application Confirmed")
        .section("confirm.summary.v1", |section| {
            section.mrkdwn(format!(
                ":white_check_mark: *Application marked as completed*\n• User: <@{user_id}>\n• Time: {time}\n• Date: {date}"
            ));
        })
        .divider("confirm.divider.v1")
        .fields("confirm.progress.v1", |fields| {
            fields
                .mrkdwn(format!("*Today's Progress:*\n{count}/{target} applications"))
                .mrkdwn(format!("*Completion:*\n{achievement}%"));
        })
        .context("confirm.context.v1", |context| {
            context.mrkdwn(
                "Keep up the great work! Each application increases your chances of landing an interview.",
            );
        })
        .build())
}

pub fn daily_report_message(
    count: u64,
    target: u32,
    date: &str,
) -> Result<MessageTemplate, ProgressError> {
    let achievement = Achievement::new(count, target)?;
    let status = ReportStatus::for_achievement(achievement);

    Ok(MessageBuilder::new(format!("Daily Job Application Report - {date}"))
        .header("report.header.v1", format!("Daily Job Application Report - {date}"))
        .section("report.tally.v1", |section| {
            section.mrkdwn(format!(
                "{} *{count}/{target}* applications completed today ({achievement}%)",
                status.emoji()
            ));
        })
        .section("report.status.v1", |section| {
            section.mrkdwn(status.text());
        })
        .fields("report.summary.v1", |fields| {
            fields
                .mrkdwn(format!("*Daily Goal:* {target} applications"))
                .mrkdwn(format!("*Completion:* {achievement}%"));
        })
        .context("report.context.v1", |context| {
            context.mrkdwn("The counter has been reset for tomorrow.");
        })
        .build())
}
