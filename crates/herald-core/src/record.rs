//! Message records: the unresolved templates and delivery settings for one key.

use std::collections::HashMap;
use std::time::Duration;

use crate::RecordKey;

/// Delivery channel for a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Channel {
    /// One chat line per line of the message body.
    #[default]
    Chat,
    /// On-screen title and subtitle.
    Title,
}

/// Title fade timings, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitleTiming {
    pub fade_in: u32,
    pub stay: u32,
    pub fade_out: u32,
}

impl Default for TitleTiming {
    fn default() -> Self {
        Self {
            fade_in: 10,
            stay: 70,
            fade_out: 20,
        }
    }
}

/// Unresolved message definition for a key.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use herald_core::{MessageRecord, RecordKey};
///
/// let record = MessageRecord::new(RecordKey::new("GREETING").unwrap())
///     .with_message("Hello %PLAYER%")
///     .with_repeat_delay(Duration::from_secs(30));
/// assert!(record.enabled);
/// assert!(record.has_cooldown());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub key: RecordKey,
    pub enabled: bool,
    pub message: String,
    pub title: String,
    pub subtitle: String,
    /// Minimum interval before the record is delivered again to the same
    /// recipient. Zero disables the cooldown.
    pub repeat_delay: Duration,
    pub channel: Channel,
    pub title_timing: TitleTiming,
    /// Bindings injected when the caller did not bind the key itself.
    pub item_defaults: HashMap<RecordKey, String>,
}

impl MessageRecord {
    #[must_use]
    pub fn new(key: RecordKey) -> Self {
        Self {
            key,
            enabled: true,
            message: String::new(),
            title: String::new(),
            subtitle: String::new(),
            repeat_delay: Duration::ZERO,
            channel: Channel::Chat,
            title_timing: TitleTiming::default(),
            item_defaults: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set title and subtitle and switch the channel to [`Channel::Title`].
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self.channel = Channel::Title;
        self
    }

    #[must_use]
    pub fn with_title_timing(mut self, timing: TitleTiming) -> Self {
        self.title_timing = timing;
        self
    }

    #[must_use]
    pub fn with_repeat_delay(mut self, delay: Duration) -> Self {
        self.repeat_delay = delay;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_item_default(mut self, key: RecordKey, value: impl Into<String>) -> Self {
        self.item_defaults.insert(key, value.into());
        self
    }

    /// Whether a delivery should start a cooldown.
    #[must_use]
    pub fn has_cooldown(&self) -> bool {
        !self.repeat_delay.is_zero()
    }
}

/// A record after macro substitution, ready for a sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub message: String,
    pub title: String,
    pub subtitle: String,
}

impl ResolvedRecord {
    /// True when there is nothing to show on `channel`.
    ///
    /// Chat shows only the message body; titles show only the title and
    /// subtitle.
    #[must_use]
    pub fn is_blank_for(&self, channel: Channel) -> bool {
        match channel {
            Channel::Chat => self.message.trim().is_empty(),
            Channel::Title => self.title.trim().is_empty() && self.subtitle.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_judged_per_channel() {
        let title_only = ResolvedRecord {
            title: "Welcome".to_owned(),
            ..ResolvedRecord::default()
        };
        assert!(title_only.is_blank_for(Channel::Chat));
        assert!(!title_only.is_blank_for(Channel::Title));

        let body_only = ResolvedRecord {
            message: "Hello".to_owned(),
            subtitle: " ".to_owned(),
            ..ResolvedRecord::default()
        };
        assert!(!body_only.is_blank_for(Channel::Chat));
        assert!(body_only.is_blank_for(Channel::Title));
    }
}
