//! # Features Layer
//!
//! Feature modules of the birthday bot.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0

pub mod birthdays;
pub mod roster;

pub use birthdays::{BirthdayNotifier, BirthdayScheduler, ChannelNotifier, RosterStats};
pub use roster::{JsonFileBackend, MemoryBackend, NewPerson, Person, RosterBackend, RosterStore};

/// Crate version, embedded at compile time
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
