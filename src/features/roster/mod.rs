//! # Feature: Roster
//!
//! The tracked people and their durable storage.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod person;
pub mod persistence;
pub mod store;

pub use person::{parse_birth_date, NewPerson, Person};
pub use persistence::{JsonFileBackend, MemoryBackend, RosterBackend};
pub use store::RosterStore;
