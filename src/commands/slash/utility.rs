//! Utility slash commands

use serenity::builder::CreateApplicationCommand;

/// Creates the utility commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        CreateApplicationCommand::default()
            .name("ping")
            .description("Test bot responsiveness")
            .to_owned(),
        CreateApplicationCommand::default()
            .name("help")
            .description("Show available commands")
            .to_owned(),
        CreateApplicationCommand::default()
            .name("uptime")
            .description("How long the bot has been running")
            .to_owned(),
    ]
}
