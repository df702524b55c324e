//! Slash command handler trait
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Admin-only flag for roster mutations
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// Trait for slash command handlers.
///
/// Each handler processes one or more related commands and is dispatched
/// by name through the [`CommandRegistry`](super::registry::CommandRegistry).
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Whether these commands require the caller to be on the admin
    /// allow-list. Enforced by the dispatch layer, in front of the store.
    fn admin_only(&self) -> bool {
        false
    }

    /// Handle the slash command
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The trait must stay object-safe for registry dispatch
    fn _assert_object_safe(_: &dyn SlashCommandHandler) {}
}
