//! Roster query command handlers
//!
//! Handles: today, list, find, stats
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Monthly breakdown in /stats
//! - 1.0.0: Extracted from the roster handler

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::commands::slash::get_string_option;
use crate::core::response::truncate_for_message;
use crate::features::birthdays::evaluator::{age_at, birthdays_on, statistics_at};
use crate::features::roster::Person;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Handler for the read-only roster queries
pub struct BirthdayHandler;

#[async_trait]
impl SlashCommandHandler for BirthdayHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["today", "list", "find", "stats"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "today" => self.handle_today(&ctx, serenity_ctx, command).await,
            "list" => self.handle_list(&ctx, serenity_ctx, command).await,
            "find" => self.handle_find(&ctx, serenity_ctx, command).await,
            "stats" => self.handle_stats(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl BirthdayHandler {
    /// Handle /today command
    async fn handle_today(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let today = ctx.today();
        let roster = ctx.store.list().await;
        let due = birthdays_on(today, &roster);

        let reply = if due.is_empty() {
            "No birthdays today.".to_string()
        } else {
            let lines: Vec<String> = due
                .iter()
                .map(|p| match age_at(p, today) {
                    Some(age) => format!("🎂 {} turns {age} today!", p.mention()),
                    None => format!("🎂 {} has their birthday today!", p.mention()),
                })
                .collect();
            lines.join("\n")
        };
        respond(serenity_ctx, command, &reply).await
    }

    /// Handle /list command
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let roster = ctx.store.list().await;
        let reply = if roster.is_empty() {
            "The roster is empty. Admins can `/add` people to it.".to_string()
        } else {
            let today = ctx.today();
            let mut lines = vec![format!("**Birthday roster** ({} people):", roster.len())];
            lines.extend(roster.iter().map(|p| roster_line(p, today)));
            truncate_for_message(&lines.join("\n"))
        };
        respond(serenity_ctx, command, &reply).await
    }

    /// Handle /find command
    async fn handle_find(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let term = get_string_option(&command.data.options, "term")
            .ok_or_else(|| anyhow::anyhow!("Missing term parameter"))?;

        let matches = ctx.store.find_by_name_substring(&term).await;
        let reply = if matches.is_empty() {
            format!("Nobody on the roster matches \"{term}\".")
        } else {
            let today = ctx.today();
            let lines: Vec<String> = matches.iter().map(|p| roster_line(p, today)).collect();
            truncate_for_message(&lines.join("\n"))
        };
        respond(serenity_ctx, command, &reply).await
    }

    /// Handle /stats command
    async fn handle_stats(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let today = ctx.today();
        let roster = ctx.store.list().await;
        let stats = statistics_at(today, &roster);

        let mut lines = vec![
            format!("**Birthday statistics** — {} people tracked", stats.total),
            format!("This month: {}", stats.this_month),
            format!("Next month: {}", stats.next_month),
            format!("Average per month: {:.1}", stats.average_per_month),
        ];
        let breakdown: Vec<String> = MONTH_NAMES
            .iter()
            .zip(stats.per_month.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(month, count)| format!("  {month}: {count}"))
            .collect();
        if !breakdown.is_empty() {
            lines.push("By month:".to_string());
            lines.extend(breakdown);
        }

        respond(serenity_ctx, command, &truncate_for_message(&lines.join("\n"))).await
    }
}

/// One roster listing line: ID, name, date, handle and current age.
fn roster_line(person: &Person, today: chrono::NaiveDate) -> String {
    let handle = person
        .handle
        .as_deref()
        .map(|h| format!(" (@{h})"))
        .unwrap_or_default();
    match age_at(person, today) {
        Some(age) => format!(
            "#{} **{}**{handle} — {} (age {age})",
            person.id, person.name, person.birth_date
        ),
        None => format!(
            "#{} **{}**{handle} — {}",
            person.id, person.name, person.birth_date
        ),
    }
}
