//! # Birthday Evaluator
//!
//! Pure date logic over roster records: birthday matching, age and
//! per-month statistics. Stateless with respect to the store; callers
//! pass person values and a reference "today".
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Monthly statistics for /stats
//! - 1.0.0: Initial creation with matching and age computation

use crate::features::roster::person::Person;
use chrono::{Datelike, NaiveDate};
use log::warn;

/// True iff the person's birth day-of-month and month both equal the
/// reference date's. The birth year is ignored, so a Feb 29 birth date
/// matches only when the reference is itself Feb 29.
///
/// An unparseable stored birth date is logged and never matches.
pub fn is_birthday_on(person: &Person, reference: NaiveDate) -> bool {
    match person.parsed_birth_date() {
        Some(birth) => birth.day() == reference.day() && birth.month() == reference.month(),
        None => {
            warn!(
                "Skipping #{} {}: unparseable birth date '{}'",
                person.id, person.name, person.birth_date
            );
            false
        }
    }
}

/// Whole number of completed years between the birth date and the
/// reference date: 0 on the birth date itself, incrementing exactly on
/// each anniversary. `None` when the stored birth date does not parse.
pub fn age_at(person: &Person, reference: NaiveDate) -> Option<u32> {
    let birth = person.parsed_birth_date()?;
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Everyone whose birthday falls on the reference date, in roster order.
pub fn birthdays_on(reference: NaiveDate, roster: &[Person]) -> Vec<Person> {
    roster
        .iter()
        .filter(|p| is_birthday_on(p, reference))
        .cloned()
        .collect()
}

/// Aggregate roster statistics relative to a reference date.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    /// Total number of tracked people
    pub total: usize,
    /// Birthdays in the reference month
    pub this_month: u32,
    /// Birthdays in the month after the reference month (December wraps
    /// to January)
    pub next_month: u32,
    /// Birthday counts per calendar month, January first
    pub per_month: [u32; 12],
    /// total / 12, rounded to one decimal
    pub average_per_month: f64,
}

/// Compute roster statistics. People with unparseable birth dates count
/// toward the total but not toward any month bucket.
pub fn statistics_at(reference: NaiveDate, roster: &[Person]) -> RosterStats {
    let mut per_month = [0u32; 12];
    for person in roster {
        match person.parsed_birth_date() {
            Some(birth) => per_month[birth.month0() as usize] += 1,
            None => warn!(
                "Excluding #{} {} from month breakdown: unparseable birth date '{}'",
                person.id, person.name, person.birth_date
            ),
        }
    }

    let this = reference.month0() as usize;
    let next = (this + 1) % 12;
    let total = roster.len();

    RosterStats {
        total,
        this_month: per_month[this],
        next_month: per_month[next],
        per_month,
        average_per_month: (total as f64 / 12.0 * 10.0).round() / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, birth_date: &str) -> Person {
        Person {
            id: 1,
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            handle: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_matches_day_and_month_only() {
        let alice = person("Alice", "15.06.1990");
        assert!(is_birthday_on(&alice, date(2024, 6, 15)));
        // Year is irrelevant, the birth date itself matches too
        assert!(is_birthday_on(&alice, date(1990, 6, 15)));
        assert!(!is_birthday_on(&alice, date(2024, 6, 16)));
        assert!(!is_birthday_on(&alice, date(2024, 7, 15)));
    }

    #[test]
    fn test_unparseable_birth_date_never_matches() {
        let broken = person("Broken", "garbage");
        assert!(!is_birthday_on(&broken, date(2024, 6, 15)));
        assert_eq!(age_at(&broken, date(2024, 6, 15)), None);
    }

    #[test]
    fn test_leap_day_matches_only_on_leap_years() {
        let leapling = person("Leapling", "29.02.2000");
        assert!(is_birthday_on(&leapling, date(2024, 2, 29)));
        // No Feb 28 fallback in common years
        assert!(!is_birthday_on(&leapling, date(2023, 2, 28)));
        assert!(!is_birthday_on(&leapling, date(2023, 3, 1)));
    }

    #[test]
    fn test_age_increments_exactly_on_anniversary() {
        let alice = person("Alice", "15.06.1990");
        assert_eq!(age_at(&alice, date(1990, 6, 15)), Some(0));
        assert_eq!(age_at(&alice, date(1991, 6, 14)), Some(0));
        assert_eq!(age_at(&alice, date(1991, 6, 15)), Some(1));
        assert_eq!(age_at(&alice, date(2024, 6, 14)), Some(33));
        assert_eq!(age_at(&alice, date(2024, 6, 15)), Some(34));
        assert_eq!(age_at(&alice, date(2024, 12, 31)), Some(34));
    }

    #[test]
    fn test_age_on_new_years_birthday() {
        let a = person("A", "01.01.2000");
        assert_eq!(age_at(&a, date(2025, 1, 1)), Some(25));
        assert_eq!(age_at(&a, date(2024, 12, 31)), Some(24));
    }

    #[test]
    fn test_birthdays_on_preserves_roster_order() {
        let roster = vec![
            person("B", "01.01.2000"),
            person("X", "05.05.1999"),
            person("A", "01.01.1985"),
        ];
        let due = birthdays_on(date(2025, 1, 1), &roster);
        let names: Vec<&str> = due.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_statistics_all_in_reference_month() {
        let roster = vec![
            person("A", "01.06.1990"),
            person("B", "15.06.1985"),
            person("C", "30.06.2001"),
        ];
        let stats = statistics_at(date(2024, 6, 10), &roster);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.this_month, 3);
        assert_eq!(stats.next_month, 0);
        assert_eq!(stats.per_month[5], 3);
        assert_eq!(stats.average_per_month, 0.3);
    }

    #[test]
    fn test_statistics_december_wraps_to_january() {
        let roster = vec![person("A", "31.12.1990"), person("B", "01.01.1991")];
        let stats = statistics_at(date(2024, 12, 5), &roster);
        assert_eq!(stats.this_month, 1);
        assert_eq!(stats.next_month, 1);
    }

    #[test]
    fn test_statistics_skip_unparseable_in_months() {
        let roster = vec![person("A", "15.06.1990"), person("Broken", "??")];
        let stats = statistics_at(date(2024, 6, 1), &roster);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.per_month.iter().sum::<u32>(), 1);
        assert_eq!(stats.average_per_month, 0.2);
    }

    #[test]
    fn test_statistics_empty_roster() {
        let stats = statistics_at(date(2024, 6, 1), &[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.this_month, 0);
        assert_eq!(stats.average_per_month, 0.0);
    }
}
