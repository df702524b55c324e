//! Roster mutation slash commands (admin-gated)

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates the roster mutation commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_add_command(), create_remove_command()]
}

/// Creates the add command
fn create_add_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("add")
        .description("Add a person to the birthday roster")
        .create_option(|option| {
            option
                .name("name")
                .description("Display name")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("date")
                .description("Birth date in DD.MM.YYYY")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("handle")
                .description("Mention handle (optional, must be unique)")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .to_owned()
}

/// Creates the remove command
fn create_remove_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("remove")
        .description("Remove a person from the roster")
        .create_option(|option| {
            option
                .name("who")
                .description("Numeric ID or exact name")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}
