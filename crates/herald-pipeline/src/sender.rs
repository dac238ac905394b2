//! Delivery of resolved records.

use herald_core::{MessageRecord, Recipient, ResolvedRecord};

/// Delivers a resolved record over one channel.
pub trait MessageSender: Send + Sync {
    fn send(&self, recipient: &dyn Recipient, record: &MessageRecord, resolved: &ResolvedRecord);
}

/// Sends the message body as chat, one line per `\n`-separated line.
pub struct ChatSender;

impl MessageSender for ChatSender {
    fn send(&self, recipient: &dyn Recipient, _record: &MessageRecord, resolved: &ResolvedRecord) {
        if resolved.message.is_empty() {
            return;
        }
        for line in resolved.message.split('\n') {
            recipient.send_message(line);
        }
    }
}

/// Sends title and subtitle with the record's fade timings.
pub struct TitleSender;

impl MessageSender for TitleSender {
    fn send(&self, recipient: &dyn Recipient, record: &MessageRecord, resolved: &ResolvedRecord) {
        recipient.send_title(&resolved.title, &resolved.subtitle, record.title_timing);
    }
}
