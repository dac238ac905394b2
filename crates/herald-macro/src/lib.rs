//! Placeholder extraction, typed macro resolution and substitution.
//!
//! This crate turns a message template plus a [`ContextMap`](herald_core::ContextMap)
//! into the final text shown to a recipient.
//!
//! # Architecture
//!
//! Resolution runs in four steps, driven by [`MacroReplacer`]:
//!
//! 1. **Extraction** ([`PlaceholderExtractor`]): find the keys referenced by
//!    `%KEY%` (or `{KEY}`) tokens.
//! 2. **Defaults**: bind the recipient, its name and location, and the
//!    record's item defaults where the caller did not.
//! 3. **Adaptation** ([`AdapterRegistry`]) then **resolution** ([`Resolvers`]):
//!    narrow generic host objects, then turn each bound value into one or
//!    more keyed strings.
//! 4. **Substitution**: replace tokens in one pass. Unresolved tokens stay
//!    as they are.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald_config::Config;
//! use herald_core::{ContextMap, Recipient, RecordKey};
//! use herald_macro::MacroReplacer;
//!
//! struct Console;
//!
//! impl Recipient for Console {
//!     fn name(&self) -> &str { "CONSOLE" }
//!     fn send_message(&self, _message: &str) {}
//! }
//!
//! let replacer = MacroReplacer::new(Arc::new(Config::default()));
//! let mut ctx = ContextMap::new(Arc::new(Console), RecordKey::new("RESTART").unwrap());
//! ctx.bind("DELAY", Duration::from_secs(90)).unwrap();
//!
//! let text = replacer.replace(&mut ctx, "Restart in %DELAY%, %PLAYER%!");
//! assert_eq!(text, "Restart in 1 minute 30 seconds, CONSOLE!");
//! ```

mod adapter;
mod extractor;
mod naming;
mod replacer;
mod resolver;

pub use adapter::{Adapter, AdapterRegistry, LocationAdapter, RecipientAdapter, WebAddressAdapter};
pub use extractor::{Delimiters, PlaceholderExtractor, Placeholders};
pub use naming::{AliasWorldNamer, PlainWorldNamer, WorldNamer};
pub use replacer::{LOCATION, MacroReplacer, PLAYER, PLAYER_NAME, WORLD};
pub use resolver::{
    DurationResolver, IdentityResolver, ItemResolver, LocationResolver, NullResolver,
    NumberResolver, ObjectResolver, RecipientResolver, Resolver, Resolvers, TextResolver,
    WorldResolver, format_duration,
};
