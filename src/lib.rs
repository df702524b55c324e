// Core layer - configuration, domain errors, reply helpers
pub mod core;

// Features layer - roster store and birthday logic
pub mod features;

// Application layer - slash command handling
pub mod commands;

// Re-export core config for convenience
pub use core::{Config, RosterError};

// Re-export feature items
pub use features::{
    // Roster
    JsonFileBackend, MemoryBackend, NewPerson, Person, RosterBackend, RosterStore,
    // Birthdays
    BirthdayNotifier, BirthdayScheduler, ChannelNotifier, RosterStats,
};

// Re-export command infrastructure
pub use commands::{CommandContext, CommandRegistry, SlashCommandHandler};
