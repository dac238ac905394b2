//! Per-recipient message cooldowns.
//!
//! A [`MessageRecord`] with a non-zero `repeat_delay` is delivered to the
//! same recipient at most once per delay. [`CooldownMap`] remembers, for
//! each `(recipient, message key)` pair, the instant the cooldown ends.
//!
//! Only entity recipients (those reporting a
//! [`unique_id`](Recipient::unique_id)) are tracked. Everyone else is
//! never cooling.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald_core::{MessageRecord, Recipient, RecordKey};
//! use herald_cooldown::{CooldownMap, ManualClock};
//! use uuid::Uuid;
//!
//! struct Player(Uuid);
//!
//! impl Recipient for Player {
//!     fn name(&self) -> &str { "Alex" }
//!     fn unique_id(&self) -> Option<Uuid> { Some(self.0) }
//!     fn send_message(&self, _message: &str) {}
//! }
//!
//! let clock = Arc::new(ManualClock::default());
//! let cooldowns = CooldownMap::with_clock(clock.clone());
//! let player = Player(Uuid::new_v4());
//! let record = MessageRecord::new(RecordKey::new("TIP").unwrap())
//!     .with_repeat_delay(Duration::from_secs(60));
//!
//! cooldowns.put_expiration_time(&player, &record);
//! assert!(!cooldowns.not_cooling(&player, &record));
//!
//! clock.advance(Duration::from_secs(60));
//! assert!(cooldowns.not_cooling(&player, &record));
//! ```

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use herald_core::{MessageRecord, Recipient, RecordKey};
use uuid::Uuid;

/// Identity of one cooldown entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    pub recipient: Uuid,
    pub message: RecordKey,
}

impl CooldownKey {
    #[must_use]
    pub fn new(recipient: Uuid, message: RecordKey) -> Self {
        Self { recipient, message }
    }

    /// Key for `recipient` receiving `message`, or `None` for recipients
    /// that are not entities.
    #[must_use]
    pub fn for_recipient(recipient: &dyn Recipient, message: &RecordKey) -> Option<Self> {
        recipient
            .unique_id()
            .map(|id| Self::new(id, message.clone()))
    }
}

/// Concurrent map of cooldown expiration instants.
///
/// Safe to share between threads: all operations take `&self`.
pub struct CooldownMap {
    entries: DashMap<CooldownKey, DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl Default for CooldownMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CooldownMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CooldownMap")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl CooldownMap {
    /// Create an empty map driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Start the cooldown for `record` on `recipient`.
    ///
    /// Does nothing when the record has no repeat delay or the recipient is
    /// not an entity. An existing entry is overwritten.
    pub fn put_expiration_time(&self, recipient: &dyn Recipient, record: &MessageRecord) {
        if !record.has_cooldown() {
            return;
        }
        let Some(key) = CooldownKey::for_recipient(recipient, &record.key) else {
            return;
        };
        let delay = TimeDelta::from_std(record.repeat_delay).unwrap_or(TimeDelta::MAX);
        let expires = self
            .clock
            .now()
            .checked_add_signed(delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        tracing::debug!(
            key = %key.message,
            recipient = %key.recipient,
            expires = %expires,
            "Cooldown started"
        );
        self.entries.insert(key, expires);
    }

    /// True when `record` may be delivered to `recipient` now.
    ///
    /// A cooldown ending exactly now no longer blocks delivery.
    #[must_use]
    pub fn not_cooling(&self, recipient: &dyn Recipient, record: &MessageRecord) -> bool {
        if !record.has_cooldown() {
            return true;
        }
        let Some(key) = CooldownKey::for_recipient(recipient, &record.key) else {
            return true;
        };
        let now = self.clock.now();
        self.expiration(&key).is_none_or(|expires| expires <= now)
    }

    /// Time left before `record` may be delivered to `recipient` again.
    #[must_use]
    pub fn remaining(&self, recipient: &dyn Recipient, record: &MessageRecord) -> Option<Duration> {
        let key = CooldownKey::for_recipient(recipient, &record.key)?;
        let expires = self.expiration(&key)?;
        (expires - self.clock.now())
            .to_std()
            .ok()
            .filter(|left| !left.is_zero())
    }

    /// Stored expiration instant for `key`, expired or not.
    #[must_use]
    pub fn expiration(&self, key: &CooldownKey) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| *entry.value())
    }

    /// Drop every entry whose cooldown has ended. Returns how many were
    /// removed.
    pub fn remove_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.entries.retain(|_, expires| {
            let keep = *expires > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!(removed, "Removed expired cooldowns");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
