//! # Feature: Birthdays
//!
//! Pure birthday evaluation plus the daily announcement trigger.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod evaluator;
pub mod notifier;
pub mod scheduler;

pub use evaluator::{age_at, birthdays_on, is_birthday_on, statistics_at, RosterStats};
pub use notifier::{birthday_message, BirthdayNotifier, ChannelNotifier};
pub use scheduler::BirthdayScheduler;
