//! Utility command handlers
//!
//! Handles: ping, help, uptime
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::features::get_bot_version;

/// Handler for utility commands: ping, help, uptime
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help", "uptime"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => respond(serenity_ctx, command, "Pong!").await,
            "help" => self.handle_help(serenity_ctx, command).await,
            "uptime" => self.handle_uptime(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /help command
    async fn handle_help(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let help_text = format!(
            r#"**Birthday bot v{}**

`/today` - Who has their birthday today
`/list` - Everyone on the roster with dates and ages
`/find <term>` - Search the roster by part of a name
`/stats` - Birthday counts by month
`/ping` - Test bot responsiveness
`/uptime` - How long the bot has been running

**Admin only:**
`/add <name> <date> [handle]` - Add a person (date as DD.MM.YYYY)
`/remove <id or name>` - Remove a person"#,
            get_bot_version()
        );
        respond(serenity_ctx, command, &help_text).await
    }

    /// Handle /uptime command
    async fn handle_uptime(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let uptime = format_uptime(ctx.start_time.elapsed().as_secs());
        respond(serenity_ctx, command, &format!("⏱️ Up for {uptime}")).await
    }
}

/// Render seconds as a compact `1d 2h 3m` string.
fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
