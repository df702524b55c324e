//! # Configuration
//!
//! Environment-based configuration loaded once at startup.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add optional birthday image path and UTC+/-HH:MM timezone tokens
//! - 1.0.0: Initial creation with token, channel, schedule and admin list

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, NaiveTime};
use std::env;
use std::path::PathBuf;

/// Default local time of day for the birthday announcement
pub const DEFAULT_ANNOUNCE_TIME: &str = "11:00";

/// Runtime configuration for the bot
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// Optional guild ID for guild-scoped command registration (faster during development)
    pub discord_guild_id: Option<String>,
    /// Channel that receives the daily birthday announcements
    pub birthday_channel_id: u64,
    /// Path of the JSON roster file; `None` keeps the roster in memory only
    pub roster_path: Option<String>,
    /// Local time of day at which the daily check fires
    pub announce_time: NaiveTime,
    /// Fixed UTC offset the announcement schedule runs in
    pub timezone: FixedOffset,
    /// Handles allowed to run roster mutations, lowercased
    pub admin_handles: Vec<String>,
    /// Optional image attached to birthday announcements
    pub birthday_image: Option<PathBuf>,
    /// Log level filter for env_logger
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DISCORD_TOKEN` and `BIRTHDAY_CHANNEL_ID` are required; everything
    /// else falls back to a sensible default.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_TOKEN").context("DISCORD_TOKEN environment variable not set")?;

        let birthday_channel_id = env::var("BIRTHDAY_CHANNEL_ID")
            .context("BIRTHDAY_CHANNEL_ID environment variable not set")?
            .parse::<u64>()
            .context("BIRTHDAY_CHANNEL_ID must be a numeric channel ID")?;

        let announce_time = parse_announce_time(
            &env::var("ANNOUNCE_TIME").unwrap_or_else(|_| DEFAULT_ANNOUNCE_TIME.to_string()),
        )?;

        let timezone =
            parse_timezone(&env::var("TIMEZONE").unwrap_or_else(|_| "UTC".to_string()))?;

        let admin_handles = env::var("ADMIN_HANDLES")
            .unwrap_or_default()
            .split(',')
            .map(|h| h.trim().trim_start_matches('@').to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        Ok(Config {
            discord_token,
            discord_guild_id: env::var("DISCORD_GUILD_ID").ok(),
            birthday_channel_id,
            roster_path: env::var("ROSTER_PATH").ok(),
            announce_time,
            timezone,
            admin_handles,
            birthday_image: env::var("BIRTHDAY_IMAGE").ok().map(PathBuf::from),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Check whether a handle is on the admin allow-list (case-insensitive,
    /// leading `@` ignored).
    pub fn is_admin(&self, handle: &str) -> bool {
        let handle = handle.trim_start_matches('@').to_lowercase();
        self.admin_handles.iter().any(|h| h == &handle)
    }
}

/// Parse an `HH:MM` time of day.
pub fn parse_announce_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|e| anyhow!("Invalid ANNOUNCE_TIME '{input}' (expected HH:MM): {e}"))
}

/// Parse a timezone token into a fixed UTC offset.
///
/// Accepts `UTC`/`GMT`, common abbreviations (`CET`, `MSK`, `EST`, ...) and
/// numeric offsets in the form `UTC+3`, `UTC-05:30` or `+02:00`.
pub fn parse_timezone(input: &str) -> Result<FixedOffset> {
    let token = input.trim().to_uppercase();

    let hours = |h: i32| FixedOffset::east_opt(h * 3600).expect("offset in range");
    match token.as_str() {
        "UTC" | "GMT" | "Z" => return Ok(hours(0)),
        "EST" => return Ok(hours(-5)),
        "EDT" => return Ok(hours(-4)),
        "CST" => return Ok(hours(-6)),
        "CDT" => return Ok(hours(-5)),
        "MST" => return Ok(hours(-7)),
        "MDT" => return Ok(hours(-6)),
        "PST" => return Ok(hours(-8)),
        "PDT" => return Ok(hours(-7)),
        "CET" => return Ok(hours(1)),
        "CEST" => return Ok(hours(2)),
        "BST" => return Ok(hours(1)),
        "EET" => return Ok(hours(2)),
        "MSK" => return Ok(hours(3)),
        _ => {}
    }

    // Numeric forms: "UTC+3", "GMT-8", "+02:00", "-05:30"
    let rest = token
        .strip_prefix("UTC")
        .or_else(|| token.strip_prefix("GMT"))
        .unwrap_or(&token);
    let (sign, digits) = match rest.as_bytes().first() {
        Some(b'+') => (1, &rest[1..]),
        Some(b'-') => (-1, &rest[1..]),
        _ => return Err(anyhow!("Unrecognized TIMEZONE '{input}'")),
    };

    let (h, m) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None => (digits, "0"),
    };
    let h: i32 = h
        .parse()
        .map_err(|_| anyhow!("Unrecognized TIMEZONE '{input}'"))?;
    let m: i32 = m
        .parse()
        .map_err(|_| anyhow!("Unrecognized TIMEZONE '{input}'"))?;
    if h > 14 || m > 59 {
        return Err(anyhow!("TIMEZONE offset '{input}' out of range"));
    }

    FixedOffset::east_opt(sign * (h * 3600 + m * 60))
        .ok_or_else(|| anyhow!("TIMEZONE offset '{input}' out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_admins(admins: &[&str]) -> Config {
        Config {
            discord_token: "token".to_string(),
            discord_guild_id: None,
            birthday_channel_id: 1,
            roster_path: None,
            announce_time: parse_announce_time("11:00").unwrap(),
            timezone: parse_timezone("UTC").unwrap(),
            admin_handles: admins.iter().map(|a| a.to_lowercase()).collect(),
            birthday_image: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_parse_announce_time() {
        assert_eq!(
            parse_announce_time("11:00").unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap()
        );
        assert_eq!(
            parse_announce_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_announce_time("25:00").is_err());
        assert!(parse_announce_time("eleven").is_err());
    }

    #[test]
    fn test_parse_timezone_abbreviations() {
        assert_eq!(parse_timezone("UTC").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_timezone("msk").unwrap().local_minus_utc(), 3 * 3600);
        assert_eq!(parse_timezone("EST").unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(parse_timezone("CET").unwrap().local_minus_utc(), 3600);
    }

    #[test]
    fn test_parse_timezone_numeric() {
        assert_eq!(parse_timezone("UTC+3").unwrap().local_minus_utc(), 3 * 3600);
        assert_eq!(
            parse_timezone("UTC-05:30").unwrap().local_minus_utc(),
            -(5 * 3600 + 30 * 60)
        );
        assert_eq!(parse_timezone("+02:00").unwrap().local_minus_utc(), 2 * 3600);
        assert!(parse_timezone("UTC+99").is_err());
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_is_admin_case_insensitive() {
        let config = config_with_admins(&["alice", "bob"]);
        assert!(config.is_admin("Alice"));
        assert!(config.is_admin("@ALICE"));
        assert!(config.is_admin("bob"));
        assert!(!config.is_admin("mallory"));
    }

    #[test]
    fn test_is_admin_empty_list() {
        let config = config_with_admins(&[]);
        assert!(!config.is_admin("anyone"));
        assert!(!config.is_admin(""));
    }
}
