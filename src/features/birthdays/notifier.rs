//! Birthday announcement delivery
//!
//! The scheduler talks to the chat transport through [`BirthdayNotifier`];
//! the production implementation posts to the configured Discord channel,
//! optionally with an attached celebration image.

use crate::features::birthdays::evaluator::age_at;
use crate::features::roster::person::Person;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use serenity::http::Http;
use serenity::model::channel::AttachmentType;
use serenity::model::id::ChannelId;
use std::path::Path;
use std::sync::Arc;

/// Outbound notification seam for the daily announcement.
#[async_trait]
pub trait BirthdayNotifier: Send + Sync {
    /// Post a plain text announcement.
    async fn send(&self, text: &str) -> Result<()>;

    /// Post an announcement with an attached image.
    async fn send_with_image(&self, image: &Path, caption: &str) -> Result<()>;
}

/// Send through the notifier, falling back to plain text when the image
/// variant fails.
pub async fn deliver(
    notifier: &dyn BirthdayNotifier,
    image: Option<&Path>,
    text: &str,
) -> Result<()> {
    if let Some(image) = image {
        match notifier.send_with_image(image, text).await {
            Ok(()) => return Ok(()),
            Err(e) => warn!(
                "Image announcement failed ({}), falling back to text: {e}",
                image.display()
            ),
        }
    }
    notifier.send(text).await
}

/// Announcement copy for one person, mentioning the handle when present
/// and the age turned today when the birth date parses.
pub fn birthday_message(person: &Person, reference: NaiveDate) -> String {
    match age_at(person, reference) {
        Some(age) => format!("🎂 Happy birthday, {}! {age} today! 🎉", person.mention()),
        None => format!("🎂 Happy birthday, {}! 🎉", person.mention()),
    }
}

/// Notifier posting into a fixed Discord channel.
pub struct ChannelNotifier {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelNotifier {
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        ChannelNotifier {
            http,
            channel_id: ChannelId(channel_id),
        }
    }
}

#[async_trait]
impl BirthdayNotifier for ChannelNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.channel_id
            .send_message(&*self.http, |message| message.content(text))
            .await?;
        Ok(())
    }

    async fn send_with_image(&self, image: &Path, caption: &str) -> Result<()> {
        self.channel_id
            .send_message(&*self.http, |message| {
                message.content(caption).add_file(AttachmentType::Path(image))
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::path::PathBuf;
    use tokio::sync::Mutex;

    #[derive(Debug, PartialEq)]
    pub enum Sent {
        Text(String),
        Image(PathBuf, String),
    }

    /// Test double recording every delivery attempt.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<Sent>>,
        pub fail_image: bool,
        pub fail_text_containing: Option<String>,
    }

    #[async_trait]
    impl BirthdayNotifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<()> {
            if let Some(needle) = &self.fail_text_containing {
                if text.contains(needle.as_str()) {
                    return Err(anyhow!("simulated send failure"));
                }
            }
            self.sent.lock().await.push(Sent::Text(text.to_string()));
            Ok(())
        }

        async fn send_with_image(&self, image: &Path, caption: &str) -> Result<()> {
            if self.fail_image {
                return Err(anyhow!("simulated image failure"));
            }
            self.sent
                .lock()
                .await
                .push(Sent::Image(image.to_path_buf(), caption.to_string()));
            Ok(())
        }
    }

    fn person(name: &str, birth_date: &str, handle: Option<&str>) -> Person {
        Person {
            id: 1,
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            handle: handle.map(String::from),
        }
    }

    #[test]
    fn test_birthday_message_with_handle_and_age() {
        let alice = person("Alice", "15.06.1990", Some("alice"));
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            birthday_message(&alice, reference),
            "🎂 Happy birthday, @alice! 34 today! 🎉"
        );
    }

    #[test]
    fn test_birthday_message_falls_back_to_name() {
        let bob = person("Bob", "not-a-date", None);
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(birthday_message(&bob, reference), "🎂 Happy birthday, Bob! 🎉");
    }

    #[tokio::test]
    async fn test_deliver_without_image_sends_text() {
        let notifier = RecordingNotifier::default();
        deliver(&notifier, None, "hello").await.unwrap();
        assert_eq!(*notifier.sent.lock().await, [Sent::Text("hello".to_string())]);
    }

    #[tokio::test]
    async fn test_deliver_prefers_image() {
        let notifier = RecordingNotifier::default();
        deliver(&notifier, Some(Path::new("cake.png")), "hello")
            .await
            .unwrap();
        assert_eq!(
            *notifier.sent.lock().await,
            [Sent::Image(PathBuf::from("cake.png"), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn test_deliver_image_failure_falls_back_to_text() {
        let notifier = RecordingNotifier {
            fail_image: true,
            ..Default::default()
        };
        deliver(&notifier, Some(Path::new("cake.png")), "hello")
            .await
            .unwrap();
        assert_eq!(*notifier.sent.lock().await, [Sent::Text("hello".to_string())]);
    }
}
