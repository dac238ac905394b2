//! The send orchestrator.

use std::sync::Arc;

use herald_config::Config;
use herald_cooldown::CooldownMap;
use herald_core::{Channel, ContextMap, MacroError, Recipient, RecordKey};
use herald_macro::MacroReplacer;

use crate::error::PipelineError;
use crate::sender::{ChatSender, MessageSender, TitleSender};
use crate::source::RecordSource;

/// What happened to one send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The record was delivered and its cooldown started.
    Sent,
    /// No record is registered under the key.
    NotFound,
    /// The record exists but is disabled.
    Disabled,
    /// The recipient received this record too recently.
    Cooling,
    /// The text shown on the record's channel resolved to blank; nothing
    /// was delivered.
    Empty,
}

/// Looks up records, gates them on cooldowns, resolves and delivers them.
///
/// Per request the order is: look up the record, check that it is enabled
/// and not cooling, bind macros, resolve, send, then record the cooldown.
/// A record is never delivered and cooled on a failed bind.
pub struct MessagePipeline {
    source: Arc<dyn RecordSource>,
    replacer: MacroReplacer,
    cooldowns: Arc<CooldownMap>,
    chat: Box<dyn MessageSender>,
    title: Box<dyn MessageSender>,
}

impl MessagePipeline {
    /// Create a pipeline with a fresh cooldown map and the chat and title
    /// senders.
    #[must_use]
    pub fn new(config: Arc<Config>, source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            replacer: MacroReplacer::new(config),
            cooldowns: Arc::new(CooldownMap::new()),
            chat: Box::new(ChatSender),
            title: Box::new(TitleSender),
        }
    }

    /// Share a cooldown map, e.g. between pipelines or with a sweeper.
    #[must_use]
    pub fn with_cooldowns(mut self, cooldowns: Arc<CooldownMap>) -> Self {
        self.cooldowns = cooldowns;
        self
    }

    #[must_use]
    pub fn with_replacer(mut self, replacer: MacroReplacer) -> Self {
        self.replacer = replacer;
        self
    }

    /// Replace the sender used for `channel`.
    #[must_use]
    pub fn with_sender(mut self, channel: Channel, sender: impl MessageSender + 'static) -> Self {
        match channel {
            Channel::Chat => self.chat = Box::new(sender),
            Channel::Title => self.title = Box::new(sender),
        }
        self
    }

    #[must_use]
    pub fn cooldowns(&self) -> &Arc<CooldownMap> {
        &self.cooldowns
    }

    #[must_use]
    pub fn replacer(&self) -> &MacroReplacer {
        &self.replacer
    }

    fn sender(&self, channel: Channel) -> &dyn MessageSender {
        match channel {
            Channel::Chat => self.chat.as_ref(),
            Channel::Title => self.title.as_ref(),
        }
    }

    /// Deliver the record registered under `key` to `recipient`.
    ///
    /// `bind` adds the caller's macros to the composition context.
    ///
    /// # Errors
    ///
    /// Returns the error raised by `bind`. Nothing is sent in that case.
    pub fn send<F>(
        &self,
        recipient: &Arc<dyn Recipient>,
        key: &RecordKey,
        bind: F,
    ) -> Result<SendOutcome, PipelineError>
    where
        F: FnOnce(&mut ContextMap) -> Result<(), MacroError>,
    {
        let Some(record) = self.source.record(key) else {
            tracing::debug!(key = %key, "Record not found");
            return Ok(SendOutcome::NotFound);
        };
        if !record.enabled {
            tracing::debug!(key = %key, "Record is disabled");
            return Ok(SendOutcome::Disabled);
        }
        if !self.cooldowns.not_cooling(recipient.as_ref(), &record) {
            tracing::debug!(key = %key, recipient = recipient.name(), "Record is cooling");
            return Ok(SendOutcome::Cooling);
        }

        let mut context = ContextMap::new(Arc::clone(recipient), key.clone());
        bind(&mut context)?;
        let resolved = self.replacer.replace_record(&mut context, &record);
        if resolved.is_blank_for(record.channel) {
            tracing::debug!(key = %key, "Record resolved to blank text");
            return Ok(SendOutcome::Empty);
        }

        self.sender(record.channel)
            .send(recipient.as_ref(), &record, &resolved);
        self.cooldowns.put_expiration_time(recipient.as_ref(), &record);
        Ok(SendOutcome::Sent)
    }

    /// Like [`send`](Self::send), taking the key as a string.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::InvalidKey`] for a malformed key, or the error
    /// raised by `bind`.
    pub fn send_str<F>(
        &self,
        recipient: &Arc<dyn Recipient>,
        key: &str,
        bind: F,
    ) -> Result<SendOutcome, PipelineError>
    where
        F: FnOnce(&mut ContextMap) -> Result<(), MacroError>,
    {
        let key: RecordKey = key.parse()?;
        self.send(recipient, &key, bind)
    }

    /// Send the record under `key` to each recipient, binding per recipient.
    ///
    /// Outcomes are returned in recipient order.
    ///
    /// # Errors
    ///
    /// Stops at the first error raised by `bind`.
    pub fn broadcast<F>(
        &self,
        recipients: &[Arc<dyn Recipient>],
        key: &RecordKey,
        bind: F,
    ) -> Result<Vec<SendOutcome>, PipelineError>
    where
        F: Fn(&mut ContextMap) -> Result<(), MacroError>,
    {
        let outcomes = recipients
            .iter()
            .map(|recipient| self.send(recipient, key, &bind))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            key = %key,
            recipients = outcomes.len(),
            sent = outcomes.iter().filter(|o| **o == SendOutcome::Sent).count(),
            "Broadcast completed"
        );
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use herald_cooldown::{Clock, ManualClock};
    use herald_core::{ItemStack, MessageRecord, ResolvedRecord};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sender::tests::Inbox;
    use crate::source::MemoryRecordSource;

    fn key(s: &str) -> RecordKey {
        RecordKey::new(s).unwrap()
    }

    fn no_bindings(_: &mut ContextMap) -> Result<(), MacroError> {
        Ok(())
    }

    struct Fixture {
        clock: Arc<ManualClock>,
        pipeline: MessagePipeline,
    }

    fn fixture(records: Vec<MessageRecord>) -> Fixture {
        let source = records
            .into_iter()
            .fold(MemoryRecordSource::new(), MemoryRecordSource::with_record);
        let clock = Arc::new(ManualClock::default());
        let cooldowns = Arc::new(CooldownMap::with_clock(Arc::clone(&clock) as Arc<dyn Clock>));
        let pipeline = MessagePipeline::new(Arc::new(Config::default()), Arc::new(source))
            .with_cooldowns(cooldowns);
        Fixture { clock, pipeline }
    }

    fn recipient(inbox: &Arc<Inbox>) -> Arc<dyn Recipient> {
        Arc::clone(inbox) as Arc<dyn Recipient>
    }

    #[test]
    fn test_send_resolves_and_delivers() {
        let fx = fixture(vec![
            MessageRecord::new(key("LOOT"))
                .with_message("Hello %PLAYER_NAME%, you have %ITEM_QUANTITY% %ITEM%"),
        ]);
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send(&recipient(&inbox), &key("LOOT"), |ctx| {
                ctx.bind("ITEM_QUANTITY", 3)?;
                ctx.bind(
                    "ITEM",
                    ItemStack::new("DIAMOND", 3).with_display_name("Diamonds"),
                )
            })
            .unwrap();

        assert_eq!(outcome, SendOutcome::Sent);
        assert_eq!(inbox.chat(), vec!["Hello Alex, you have 3 Diamonds"]);
    }

    #[test]
    fn test_missing_record() {
        let fx = fixture(Vec::new());
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send(&recipient(&inbox), &key("NOPE"), no_bindings)
            .unwrap();
        assert_eq!(outcome, SendOutcome::NotFound);
        assert!(inbox.chat().is_empty());
    }

    #[test]
    fn test_disabled_record() {
        let fx = fixture(vec![
            MessageRecord::new(key("OFF"))
                .with_message("hidden")
                .with_enabled(false),
        ]);
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send(&recipient(&inbox), &key("OFF"), no_bindings)
            .unwrap();
        assert_eq!(outcome, SendOutcome::Disabled);
        assert!(inbox.chat().is_empty());
    }

    #[test]
    fn test_cooldown_blocks_repeat_until_elapsed() {
        let fx = fixture(vec![
            MessageRecord::new(key("TIP"))
                .with_message("Drink water")
                .with_repeat_delay(Duration::from_secs(60)),
        ]);
        let inbox = Arc::new(Inbox::player());
        let to = recipient(&inbox);

        let send = || fx.pipeline.send(&to, &key("TIP"), no_bindings).unwrap();
        assert_eq!(send(), SendOutcome::Sent);
        assert_eq!(send(), SendOutcome::Cooling);

        fx.clock.advance(Duration::from_secs(60));
        assert_eq!(send(), SendOutcome::Sent);
        assert_eq!(inbox.chat().len(), 2);
    }

    #[test]
    fn test_blank_resolution_is_not_sent_or_cooled() {
        let fx = fixture(vec![
            MessageRecord::new(key("BLANK"))
                .with_message("  ")
                .with_repeat_delay(Duration::from_secs(60)),
        ]);
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send(&recipient(&inbox), &key("BLANK"), no_bindings)
            .unwrap();
        assert_eq!(outcome, SendOutcome::Empty);
        assert!(fx.pipeline.cooldowns().is_empty());
    }

    #[test]
    fn test_chat_record_with_only_a_title_is_empty() {
        let mut record = MessageRecord::new(key("HEADLINE"))
            .with_title("Breaking", "")
            .with_repeat_delay(Duration::from_secs(60));
        record.channel = Channel::Chat;
        let fx = fixture(vec![record]);
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send(&recipient(&inbox), &key("HEADLINE"), no_bindings)
            .unwrap();
        assert_eq!(outcome, SendOutcome::Empty);
        assert!(inbox.chat().is_empty());
        assert!(inbox.titles().is_empty());
        assert!(fx.pipeline.cooldowns().is_empty());
    }

    #[test]
    fn test_title_record_without_body_is_sent() {
        let fx = fixture(vec![
            MessageRecord::new(key("JOIN"))
                .with_title("", "Welcome back")
                .with_repeat_delay(Duration::from_secs(60)),
        ]);
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send(&recipient(&inbox), &key("JOIN"), no_bindings)
            .unwrap();
        assert_eq!(outcome, SendOutcome::Sent);
        assert_eq!(inbox.titles().len(), 1);
        assert_eq!(fx.pipeline.cooldowns().len(), 1);
    }

    #[test]
    fn test_bind_error_aborts_without_cooldown() {
        let fx = fixture(vec![
            MessageRecord::new(key("TIP"))
                .with_message("x")
                .with_repeat_delay(Duration::from_secs(60)),
        ]);
        let inbox = Arc::new(Inbox::player());

        let err = fx
            .pipeline
            .send(&recipient(&inbox), &key("TIP"), |ctx| ctx.bind("1BAD", 1))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Macro(MacroError::InvalidKey(_))));
        assert!(inbox.chat().is_empty());
        assert!(fx.pipeline.cooldowns().is_empty());
    }

    #[test]
    fn test_send_str_rejects_malformed_key() {
        let fx = fixture(Vec::new());
        let inbox = Arc::new(Inbox::player());

        let err = fx
            .pipeline
            .send_str(&recipient(&inbox), "not a key", no_bindings)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid macro key: \"not a key\"");
    }

    #[test]
    fn test_title_channel() {
        let fx = fixture(vec![
            MessageRecord::new(key("JOIN")).with_title("Welcome", "%PLAYER%"),
        ]);
        let inbox = Arc::new(Inbox::player());

        let outcome = fx
            .pipeline
            .send_str(&recipient(&inbox), "JOIN", no_bindings)
            .unwrap();
        assert_eq!(outcome, SendOutcome::Sent);
        let titles = inbox.titles();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].0, "Welcome");
        assert_eq!(titles[0].1, "Alex");
        assert!(inbox.chat().is_empty());
    }

    #[test]
    fn test_custom_sender() {
        struct Shout;

        impl MessageSender for Shout {
            fn send(&self, recipient: &dyn Recipient, _: &MessageRecord, resolved: &ResolvedRecord) {
                recipient.send_message(&resolved.message.to_uppercase());
            }
        }

        let fx = fixture(vec![MessageRecord::new(key("HI")).with_message("hi %PLAYER%")]);
        let pipeline = fx.pipeline.with_sender(Channel::Chat, Shout);
        let inbox = Arc::new(Inbox::player());

        pipeline
            .send(&recipient(&inbox), &key("HI"), no_bindings)
            .unwrap();
        assert_eq!(inbox.chat(), vec!["HI ALEX"]);
    }

    #[test]
    fn test_broadcast_tracks_cooldown_per_recipient() {
        let fx = fixture(vec![
            MessageRecord::new(key("NEWS"))
                .with_message("News for %PLAYER%: %HEADLINE%")
                .with_repeat_delay(Duration::from_secs(30)),
        ]);
        let alex = Arc::new(Inbox::player());
        let sam = Arc::new(Inbox::player());
        let console = Arc::new(Inbox::default());

        let first = fx
            .pipeline
            .send(&recipient(&alex), &key("NEWS"), no_bindings)
            .unwrap();
        assert_eq!(first, SendOutcome::Sent);

        let recipients = vec![recipient(&alex), recipient(&sam), recipient(&console)];
        let outcomes = fx
            .pipeline
            .broadcast(&recipients, &key("NEWS"), |ctx| ctx.bind("HEADLINE", "restart soon"))
            .unwrap();

        assert_eq!(
            outcomes,
            vec![SendOutcome::Cooling, SendOutcome::Sent, SendOutcome::Sent]
        );
        assert_eq!(sam.chat(), vec!["News for Alex: restart soon"]);
        assert_eq!(fx.pipeline.cooldowns().len(), 2);
    }
}
