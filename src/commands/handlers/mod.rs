//! # Command Handlers
//!
//! One handler per command group, dispatched by the registry.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0

pub mod birthday;
pub mod roster;
pub mod utility;

pub use birthday::BirthdayHandler;
pub use roster::RosterHandler;
pub use utility::UtilityHandler;

use anyhow::Result;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

/// Reply to an interaction with plain message content.
pub async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    text: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(text))
        })
        .await?;
    Ok(())
}
