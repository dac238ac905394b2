//! Message recipients.

use uuid::Uuid;

use crate::{Location, TitleTiming};

/// Someone (or something) a message can be delivered to.
///
/// Entity recipients report a [`unique_id`](Self::unique_id); recipients
/// without one (a console, a log sink) are never subject to cooldowns.
pub trait Recipient: Send + Sync {
    /// Raw name of the recipient.
    fn name(&self) -> &str;

    /// Name shown to other recipients. Defaults to [`name`](Self::name).
    fn display_name(&self) -> String {
        self.name().to_owned()
    }

    /// Stable identity, if the recipient is an entity.
    fn unique_id(&self) -> Option<Uuid> {
        None
    }

    /// Locale tag such as `en_US`, if known.
    fn locale(&self) -> Option<String> {
        None
    }

    /// Current location, if the recipient is location-capable.
    fn location(&self) -> Option<Location> {
        None
    }

    /// Deliver a single chat line.
    fn send_message(&self, message: &str);

    /// Show an on-screen title.
    ///
    /// Recipients without a title channel fall back to chat lines.
    fn send_title(&self, title: &str, subtitle: &str, _timing: TitleTiming) {
        for line in [title, subtitle] {
            if !line.is_empty() {
                self.send_message(line);
            }
        }
    }
}
