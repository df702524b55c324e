//! Shared context for command handlers

use crate::core::Config;
use crate::features::roster::RosterStore;

/// Services shared by all command handlers: the roster store, the loaded
/// configuration (timezone, admin allow-list) and the process start time
/// for /uptime.
#[derive(Clone)]
pub struct CommandContext {
    pub store: RosterStore,
    pub config: Config,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(store: RosterStore, config: Config) -> Self {
        CommandContext {
            store,
            config,
            start_time: std::time::Instant::now(),
        }
    }

    /// Today's date in the configured timezone; every command evaluates
    /// against this, not against UTC.
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Utc::now()
            .with_timezone(&self.config.timezone)
            .date_naive()
    }
}
