//! Roster mutation command handlers
//!
//! Handles: add, remove
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::commands::slash::get_string_option;
use crate::features::roster::NewPerson;

/// Handler for roster mutations; the dispatch layer only routes these to
/// callers on the admin allow-list.
pub struct RosterHandler;

#[async_trait]
impl SlashCommandHandler for RosterHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add", "remove"]
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "add" => self.handle_add(&ctx, serenity_ctx, command).await,
            "remove" => self.handle_remove(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl RosterHandler {
    /// Handle /add command - insert a validated person
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = get_string_option(&command.data.options, "name")
            .ok_or_else(|| anyhow::anyhow!("Missing name parameter"))?;
        let date = get_string_option(&command.data.options, "date")
            .ok_or_else(|| anyhow::anyhow!("Missing date parameter"))?;
        let handle = get_string_option(&command.data.options, "handle");

        let mut candidate = NewPerson::new(name, date);
        if let Some(handle) = handle {
            candidate = candidate.with_handle(handle);
        }

        let reply = match ctx.store.add(candidate).await {
            Ok(person) => {
                info!(
                    "Roster add by {}: #{} {}",
                    command.user.name, person.id, person.name
                );
                format!(
                    "✅ Added **{}** (#{}) — birthday {}",
                    person.name, person.id, person.birth_date
                )
            }
            Err(e) => format!("❌ {e}"),
        };
        respond(serenity_ctx, command, &reply).await
    }

    /// Handle /remove command - numeric IDs remove by ID, anything else
    /// is an exact case-insensitive name
    async fn handle_remove(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let who = get_string_option(&command.data.options, "who")
            .ok_or_else(|| anyhow::anyhow!("Missing who parameter"))?;
        let who = who.trim();

        let reply = if let Ok(id) = who.parse::<u64>() {
            if ctx.store.remove_by_id(id).await {
                format!("🗑️ Removed #{id} from the roster")
            } else {
                format!("❌ No person with ID {id}")
            }
        } else {
            match ctx.store.remove_by_name(who).await {
                Ok(()) => format!("🗑️ Removed **{who}** from the roster"),
                Err(e) => format!("❌ {e}"),
            }
        };
        respond(serenity_ctx, command, &reply).await
    }
}
