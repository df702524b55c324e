//! Roster query slash commands

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates the roster query commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        CreateApplicationCommand::default()
            .name("today")
            .description("Who has their birthday today?")
            .to_owned(),
        CreateApplicationCommand::default()
            .name("list")
            .description("List everyone on the birthday roster")
            .to_owned(),
        create_find_command(),
        CreateApplicationCommand::default()
            .name("stats")
            .description("Birthday statistics by month")
            .to_owned(),
    ]
}

/// Creates the find command
fn create_find_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("find")
        .description("Find people by part of their name")
        .create_option(|option| {
            option
                .name("term")
                .description("Name fragment to search for")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}
