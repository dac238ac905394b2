//! Template resolution: extract, bind defaults, adapt, resolve, substitute.

use std::sync::Arc;

use herald_config::Config;
use herald_core::{ContextMap, MacroValue, MessageRecord, RecordKey, ResolvedRecord, ResultMap};

use crate::adapter::AdapterRegistry;
use crate::extractor::PlaceholderExtractor;
use crate::resolver::Resolvers;

/// Implicit binding: the recipient itself.
pub const PLAYER: &str = "PLAYER";
/// Implicit binding: the recipient's display name.
pub const PLAYER_NAME: &str = "PLAYER_NAME";
/// Implicit binding: the recipient's location, when it has one.
pub const LOCATION: &str = "LOCATION";
/// Implicit binding: the world of the recipient's location.
pub const WORLD: &str = "WORLD";

fn builtin_key(name: &str) -> RecordKey {
    RecordKey::new(name).expect("built-in key is valid")
}

/// Resolves placeholders in message templates against a [`ContextMap`].
///
/// Substitution is single-pass: resolved text is never scanned for further
/// placeholders, and placeholders without a resolvable binding stay in the
/// output as their literal token.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use herald_config::Config;
/// use herald_core::{ContextMap, ItemStack, Recipient, RecordKey};
/// use herald_macro::MacroReplacer;
///
/// struct Player;
///
/// impl Recipient for Player {
///     fn name(&self) -> &str { "Alex" }
///     fn send_message(&self, _message: &str) {}
/// }
///
/// let replacer = MacroReplacer::new(Arc::new(Config::default()));
/// let mut ctx = ContextMap::new(Arc::new(Player), RecordKey::new("LOOT").unwrap());
/// ctx.bind("ITEM_QUANTITY", 3).unwrap();
/// ctx.bind("ITEM", ItemStack::new("DIAMOND", 3).with_display_name("Diamonds")).unwrap();
///
/// let text = replacer.replace(&mut ctx, "Hello %PLAYER_NAME%, you have %ITEM_QUANTITY% %ITEM%");
/// assert_eq!(text, "Hello Alex, you have 3 Diamonds");
/// ```
pub struct MacroReplacer {
    extractor: PlaceholderExtractor,
    resolvers: Resolvers,
    adapters: AdapterRegistry,
}

impl MacroReplacer {
    /// Build a replacer with the configured delimiters, the default resolver
    /// set and the built-in adapters.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            extractor: PlaceholderExtractor::new(config.placeholders.style.into()),
            resolvers: Resolvers::new(config),
            adapters: AdapterRegistry::default(),
        }
    }

    /// Replace the adapter registry.
    #[must_use]
    pub fn with_adapters(mut self, adapters: AdapterRegistry) -> Self {
        self.adapters = adapters;
        self
    }

    /// Replace the resolver set (for example, one with a custom world namer).
    #[must_use]
    pub fn with_resolvers(mut self, resolvers: Resolvers) -> Self {
        self.resolvers = resolvers;
        self
    }

    #[must_use]
    pub fn extractor(&self) -> &PlaceholderExtractor {
        &self.extractor
    }

    /// Bind the implicit defaults the caller did not bind.
    ///
    /// Binds [`PLAYER`] and [`PLAYER_NAME`]; [`LOCATION`] and [`WORLD`] when the
    /// recipient reports a location; and the record's item defaults.
    pub fn inject_defaults(&self, context: &mut ContextMap, record: Option<&MessageRecord>) {
        let recipient = Arc::clone(context.recipient());
        context.put_if_absent(builtin_key(PLAYER), MacroValue::Recipient(Arc::clone(&recipient)));
        context.put_if_absent(builtin_key(PLAYER_NAME), recipient.display_name());

        if let Some(location) = recipient.location() {
            if let Some(world) = &location.world {
                context.put_if_absent(builtin_key(WORLD), world.clone());
            }
            context.put_if_absent(builtin_key(LOCATION), location);
        }

        if let Some(record) = record {
            for (key, value) in &record.item_defaults {
                context.put_if_absent(key.clone(), value.as_str());
            }
        }
    }

    /// Resolve every bound key referenced by `referenced`.
    ///
    /// A referenced child key such as `HOME.X` is served by the nearest bound
    /// ancestor (`HOME`). Each bound key is adapted, then resolved, once.
    /// Fragments merge last-writer-wins, resolving shallower keys first so a
    /// binding for `HOME.X` overrides the `HOME.X` derived from `HOME`.
    #[must_use]
    pub fn resolve_keys(&self, context: &ContextMap, referenced: &[&str]) -> ResultMap {
        let mut bound: Vec<RecordKey> = Vec::new();
        for raw in referenced {
            let Some(key) = RecordKey::new(raw) else {
                continue;
            };
            let nearest = std::iter::once(key.clone())
                .chain(key.ancestors())
                .find(|candidate| context.contains(candidate.as_str()));
            if let Some(nearest) = nearest
                && !bound.contains(&nearest)
            {
                bound.push(nearest);
            }
        }
        bound.sort_by_key(|key| key.segments().count());

        let mut results = ResultMap::new();
        for key in &bound {
            let Some(value) = context.get(key.as_str()) else {
                continue;
            };
            let adapted = self.adapters.adapt(value);
            let value = adapted.as_ref().unwrap_or(value);
            results.put_all(self.resolvers.resolve_value(key, value, context));
        }
        results
    }

    /// Resolve a single template.
    pub fn replace(&self, context: &mut ContextMap, text: &str) -> String {
        self.inject_defaults(context, None);
        let referenced = self.extractor.distinct_keys(&[text]);
        let results = self.resolve_keys(context, &referenced);
        self.log_composition(context, referenced.len(), &results);
        self.extractor.substitute(text, &results).into_owned()
    }

    /// Resolve a record's message, title and subtitle together.
    pub fn replace_record(&self, context: &mut ContextMap, record: &MessageRecord) -> ResolvedRecord {
        self.inject_defaults(context, Some(record));
        let targets = [
            record.message.as_str(),
            record.title.as_str(),
            record.subtitle.as_str(),
        ];
        let referenced = self.extractor.distinct_keys(&targets);
        let results = self.resolve_keys(context, &referenced);
        self.log_composition(context, referenced.len(), &results);

        let [message, title, subtitle] =
            targets.map(|text| self.extractor.substitute(text, &results).into_owned());
        ResolvedRecord {
            message,
            title,
            subtitle,
        }
    }

    #[allow(clippy::unused_self)]
    fn log_composition(&self, context: &ContextMap, referenced: usize, results: &ResultMap) {
        tracing::debug!(
            key = %context.message_key(),
            recipient = context.recipient().name(),
            placeholders = referenced,
            resolved = results.len(),
            "Message composed"
        );
    }
}
