//! # Daily Scheduler Trigger
//!
//! One recurring job: every day at the configured local time, look up
//! whose birthday it is and announce each of them in the configured
//! channel. Fires are deduplicated per calendar day and never overlap;
//! a per-person send failure is logged and does not stop the rest of
//! that day's announcements.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Per-day dedup and overlap guard
//! - 1.0.0: Initial creation with the sleep-until-next-fire loop

use crate::features::birthdays::evaluator::birthdays_on;
use crate::features::birthdays::notifier::{birthday_message, deliver, BirthdayNotifier};
use crate::features::roster::store::RosterStore;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The recurring daily birthday check.
pub struct BirthdayScheduler {
    store: RosterStore,
    timezone: FixedOffset,
    announce_time: NaiveTime,
    image: Option<PathBuf>,
    running: AtomicBool,
    last_announced: Mutex<Option<NaiveDate>>,
}

impl BirthdayScheduler {
    pub fn new(
        store: RosterStore,
        timezone: FixedOffset,
        announce_time: NaiveTime,
        image: Option<PathBuf>,
    ) -> Self {
        BirthdayScheduler {
            store,
            timezone,
            announce_time,
            image,
            running: AtomicBool::new(false),
            last_announced: Mutex::new(None),
        }
    }

    /// Sleep-until-fire loop; spawned once from main and never returns.
    pub async fn run(self: Arc<Self>, notifier: Arc<dyn BirthdayNotifier>) {
        info!(
            "Birthday scheduler armed for {} at UTC{}",
            self.announce_time, self.timezone
        );
        loop {
            let now = Utc::now().with_timezone(&self.timezone).naive_local();
            let next = next_fire_after(now, self.announce_time);
            let wait = (next - now)
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            debug!("Next birthday check at {next} (in {}s)", wait.as_secs());
            tokio::time::sleep(wait).await;

            let today = Utc::now().with_timezone(&self.timezone).date_naive();
            self.run_once(notifier.as_ref(), today).await;
        }
    }

    /// Execute one fire for the given calendar day. Returns the number of
    /// people successfully notified.
    ///
    /// Strictly single-shot: a fire that observes a run still in progress
    /// skips instead of running concurrently, since message sends are not
    /// idempotent.
    pub async fn run_once(&self, notifier: &dyn BirthdayNotifier, today: NaiveDate) -> usize {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Birthday run already in progress, skipping fire for {today}");
            return 0;
        }
        let sent = self.announce(notifier, today).await;
        self.running.store(false, Ordering::SeqCst);
        sent
    }

    async fn announce(&self, notifier: &dyn BirthdayNotifier, today: NaiveDate) -> usize {
        {
            let mut last = self.last_announced.lock().await;
            if *last == Some(today) {
                info!("Birthdays for {today} already announced, skipping");
                return 0;
            }
            *last = Some(today);
        }

        // Resolve the roster once per run; sends below do not re-check it
        let roster = self.store.list().await;
        let due = birthdays_on(today, &roster);
        if due.is_empty() {
            info!("No birthdays on {today} ({} people tracked)", roster.len());
            return 0;
        }

        info!("{} birthday(s) on {today}", due.len());
        let mut sent = 0;
        for person in &due {
            let text = birthday_message(person, today);
            match deliver(notifier, self.image.as_deref(), &text).await {
                Ok(()) => {
                    info!("Announced birthday of #{} {}", person.id, person.name);
                    sent += 1;
                }
                Err(e) => {
                    error!("Failed to announce #{} {}: {e}", person.id, person.name);
                }
            }
        }
        sent
    }
}

/// Next occurrence of the given time of day strictly after `now`: today
/// if still ahead, otherwise tomorrow.
pub fn next_fire_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if now < today {
        today
    } else {
        today + chrono::Duration::days(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::roster::persistence::MemoryBackend;
    use crate::features::roster::person::NewPerson;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::path::Path;
    use std::time::Duration;

    /// Scriptable notifier: records successful texts, optionally failing
    /// for texts containing a needle, optionally slow.
    #[derive(Default)]
    struct ScriptedNotifier {
        sent: Mutex<Vec<String>>,
        fail_containing: Option<&'static str>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl BirthdayNotifier for ScriptedNotifier {
        async fn send(&self, text: &str) -> anyhow::Result<()> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(needle) = self.fail_containing {
                if text.contains(needle) {
                    return Err(anyhow!("scripted failure"));
                }
            }
            self.sent.lock().await.push(text.to_string());
            Ok(())
        }

        async fn send_with_image(&self, _image: &Path, caption: &str) -> anyhow::Result<()> {
            self.send(caption).await
        }
    }

    async fn roster_store(people: &[(&str, &str)]) -> RosterStore {
        let store = RosterStore::new(Vec::new(), Arc::new(MemoryBackend));
        for (name, date) in people {
            store.add(NewPerson::new(*name, *date)).await.unwrap();
        }
        store
    }

    fn scheduler(store: RosterStore) -> BirthdayScheduler {
        BirthdayScheduler::new(
            store,
            FixedOffset::east_opt(0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            None,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_fire_after() {
        let at = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        let morning = date(2024, 6, 15).and_hms_opt(8, 30, 0).unwrap();
        let evening = date(2024, 6, 15).and_hms_opt(14, 0, 0).unwrap();
        let exactly = date(2024, 6, 15).and_hms_opt(11, 0, 0).unwrap();

        assert_eq!(
            next_fire_after(morning, at),
            date(2024, 6, 15).and_hms_opt(11, 0, 0).unwrap()
        );
        assert_eq!(
            next_fire_after(evening, at),
            date(2024, 6, 16).and_hms_opt(11, 0, 0).unwrap()
        );
        // A fire exactly on the mark schedules the next day
        assert_eq!(
            next_fire_after(exactly, at),
            date(2024, 6, 16).and_hms_opt(11, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_run_once_announces_todays_birthdays() {
        let store = roster_store(&[("A", "01.01.2000"), ("B", "02.01.2000")]).await;
        let scheduler = scheduler(store);
        let notifier = ScriptedNotifier::default();

        let sent = scheduler.run_once(&notifier, date(2025, 1, 1)).await;
        assert_eq!(sent, 1);
        let sent = notifier.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("A"));
        assert!(sent[0].contains("25"));
    }

    #[tokio::test]
    async fn test_run_once_empty_day_sends_nothing() {
        let store = roster_store(&[("A", "01.01.2000")]).await;
        let scheduler = scheduler(store);
        let notifier = ScriptedNotifier::default();

        assert_eq!(scheduler.run_once(&notifier, date(2025, 3, 3)).await, 0);
        assert!(notifier.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_remaining_sends() {
        let store = roster_store(&[
            ("Alice", "01.01.2000"),
            ("Bob", "01.01.1990"),
            ("Carol", "01.01.1980"),
        ])
        .await;
        let scheduler = scheduler(store);
        let notifier = ScriptedNotifier {
            fail_containing: Some("Bob"),
            ..Default::default()
        };

        let sent = scheduler.run_once(&notifier, date(2025, 1, 1)).await;
        assert_eq!(sent, 2);
        let sent = notifier.sent.lock().await;
        assert!(sent[0].contains("Alice"));
        assert!(sent[1].contains("Carol"));
    }

    #[tokio::test]
    async fn test_same_day_fires_deduplicated() {
        let store = roster_store(&[("A", "01.01.2000")]).await;
        let scheduler = scheduler(store);
        let notifier = ScriptedNotifier::default();

        assert_eq!(scheduler.run_once(&notifier, date(2025, 1, 1)).await, 1);
        assert_eq!(scheduler.run_once(&notifier, date(2025, 1, 1)).await, 0);
        assert_eq!(notifier.sent.lock().await.len(), 1);

        // The next calendar day fires again
        assert_eq!(scheduler.run_once(&notifier, date(2025, 1, 2)).await, 0);
    }

    #[tokio::test]
    async fn test_overlapping_fire_is_skipped() {
        let store = roster_store(&[("A", "01.01.2000")]).await;
        let scheduler = Arc::new(scheduler(store));
        let notifier = Arc::new(ScriptedNotifier {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        });

        let first = {
            let scheduler = scheduler.clone();
            let notifier = notifier.clone();
            tokio::spawn(async move { scheduler.run_once(notifier.as_ref(), date(2025, 1, 1)).await })
        };
        // Give the first run time to take the guard and park in the send
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = scheduler.run_once(notifier.as_ref(), date(2025, 1, 2)).await;

        assert_eq!(second, 0, "overlapping fire must not run");
        assert_eq!(first.await.unwrap(), 1);
        assert_eq!(notifier.sent.lock().await.len(), 1);
    }
}
