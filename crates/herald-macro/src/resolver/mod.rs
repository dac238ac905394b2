//! Type-directed value resolution.
//!
//! Every [`MacroValue`] variant has exactly one resolver. [`Resolvers`] picks
//! it with an exhaustive `match`, so a new value kind cannot be added without
//! deciding how it resolves.
//!
//! | Kind | Emits |
//! |------|-------|
//! | recipient, identity | `KEY` → display name |
//! | item | `KEY` → display name, else type name |
//! | location | `KEY` → `"<world> [x, y, z]"`, plus `KEY.WORLD`, `KEY.X`, `KEY.Y`, `KEY.Z` |
//! | world | `KEY` and `KEY.NAME` → alias or name |
//! | duration | `KEY` → localized duration |
//! | number | `KEY` → decimal text (nothing for a null number) |
//! | text | `KEY` → the text |
//! | null | `KEY` → `"NULL"` |
//! | object | `KEY` → `Display` text |

mod duration;
mod identity;
mod item;
mod scalar;
mod spatial;

pub use duration::{DurationResolver, format_duration};
pub use identity::{IdentityResolver, RecipientResolver};
pub use item::ItemResolver;
pub use scalar::{NullResolver, NumberResolver, ObjectResolver, TextResolver};
pub use spatial::{LocationResolver, WorldResolver};

use std::sync::Arc;

use herald_config::Config;
use herald_core::{ContextMap, MacroValue, RecordKey, ResultMap};

use crate::naming::{AliasWorldNamer, WorldNamer};

/// Resolves one value kind into one or more keyed strings.
///
/// Implementations must be free of side effects and must not mutate the
/// context.
pub trait Resolver<T: ?Sized>: Send + Sync {
    fn resolve(&self, key: &RecordKey, value: &T, context: &ContextMap) -> ResultMap;
}

/// Put `key.segment → value` into `map`.
fn put_child(map: &mut ResultMap, key: &RecordKey, segment: &str, value: impl Into<String>) {
    if let Some(child) = key.child(segment) {
        map.put(child, value);
    }
}

/// The resolver set, dispatching on value kind.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use herald_config::Config;
/// use herald_core::{ContextMap, Location, Recipient, RecordKey, World};
/// use herald_macro::Resolvers;
///
/// struct Console;
///
/// impl Recipient for Console {
///     fn name(&self) -> &str { "CONSOLE" }
///     fn send_message(&self, _message: &str) {}
/// }
///
/// let resolvers = Resolvers::new(Arc::new(Config::default()));
/// let mut ctx = ContextMap::new(Arc::new(Console), RecordKey::new("MSG").unwrap());
/// ctx.bind("HOME", Location::new(Some(World::new("world")), 1.5, 64.0, -2.5)).unwrap();
///
/// let out = resolvers.resolve(&RecordKey::new("HOME").unwrap(), &ctx);
/// assert_eq!(out.get("HOME"), Some("world [1, 64, -2]"));
/// assert_eq!(out.get("HOME.Z"), Some("-2"));
/// ```
pub struct Resolvers {
    recipient: RecipientResolver,
    identity: IdentityResolver,
    item: ItemResolver,
    location: LocationResolver,
    world: WorldResolver,
    duration: DurationResolver,
    number: NumberResolver,
    text: TextResolver,
    null: NullResolver,
    object: ObjectResolver,
}

impl Resolvers {
    /// Build the resolver set from configuration.
    ///
    /// World names come from an [`AliasWorldNamer`] over `[worlds.aliases]`.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let namer = Arc::new(AliasWorldNamer::new(
            config
                .worlds
                .aliases
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        ));
        Self::with_world_namer(config, namer)
    }

    /// Build the resolver set with a custom world naming collaborator.
    #[must_use]
    pub fn with_world_namer(config: Arc<Config>, namer: Arc<dyn WorldNamer>) -> Self {
        let unknown = config.resolution.unknown_text.clone();
        Self {
            recipient: RecipientResolver,
            identity: IdentityResolver::new(unknown.clone()),
            item: ItemResolver,
            location: LocationResolver::new(Arc::clone(&namer), unknown.clone()),
            world: WorldResolver::new(namer, unknown),
            duration: DurationResolver::new(Arc::clone(&config)),
            number: NumberResolver,
            text: TextResolver,
            null: NullResolver::new(config.resolution.null_text.clone()),
            object: ObjectResolver,
        }
    }

    /// Resolve the binding for `key` in `context`.
    ///
    /// An unbound key resolves like an explicit null.
    #[must_use]
    pub fn resolve(&self, key: &RecordKey, context: &ContextMap) -> ResultMap {
        match context.get(key.as_str()) {
            Some(value) => self.resolve_value(key, value, context),
            None => self.null.resolve(key, &(), context),
        }
    }

    /// Resolve `value` as if it were bound to `key`.
    #[must_use]
    pub fn resolve_value(&self, key: &RecordKey, value: &MacroValue, context: &ContextMap) -> ResultMap {
        let results = match value {
            MacroValue::Recipient(recipient) => self.recipient.resolve(key, recipient, context),
            MacroValue::Identity(identity) => self.identity.resolve(key, identity, context),
            MacroValue::Item(item) => self.item.resolve(key, item, context),
            MacroValue::Location(location) => self.location.resolve(key, location, context),
            MacroValue::World(world) => self.world.resolve(key, world, context),
            MacroValue::Duration(duration) => self.duration.resolve(key, duration, context),
            MacroValue::Number(number) => self.number.resolve(key, number, context),
            MacroValue::Text(text) => self.text.resolve(key, text.as_str(), context),
            MacroValue::Null => self.null.resolve(key, &(), context),
            MacroValue::Object(object) => self.object.resolve(key, object, context),
        };
        tracing::trace!(
            key = %key,
            kind = value.kind(),
            values = results.len(),
            "Resolved binding"
        );
        results
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fmt;
    use std::sync::Arc;
    use std::time::Duration;

    use herald_core::{HostObject, Identity, ItemStack, Location, Recipient, World};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    pub(crate) struct Player {
        pub name: &'static str,
        pub locale: Option<&'static str>,
    }

    impl Recipient for Player {
        fn name(&self) -> &str {
            self.name
        }

        fn locale(&self) -> Option<String> {
            self.locale.map(str::to_owned)
        }

        fn send_message(&self, _message: &str) {}
    }

    struct Crate;

    impl fmt::Display for Crate {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Crate#7")
        }
    }

    impl HostObject for Crate {}

    pub(crate) fn context() -> ContextMap {
        ContextMap::new(
            Arc::new(Player {
                name: "Alex",
                locale: None,
            }),
            RecordKey::new("TEST").unwrap(),
        )
    }

    pub(crate) fn key(s: &str) -> RecordKey {
        RecordKey::new(s).unwrap()
    }

    fn resolvers() -> Resolvers {
        Resolvers::new(Arc::new(Config::default()))
    }

    fn resolve_bound(value: impl Into<MacroValue>) -> ResultMap {
        let mut ctx = context();
        ctx.put(key("K"), value);
        resolvers().resolve(&key("K"), &ctx)
    }

    #[test]
    fn test_dispatch_each_kind() {
        let recipient: Arc<dyn Recipient> = Arc::new(Player {
            name: "Sam",
            locale: None,
        });
        assert_eq!(resolve_bound(recipient).get("K"), Some("Sam"));
        assert_eq!(
            resolve_bound(Identity::new(Uuid::nil(), Some("Robin".to_owned()))).get("K"),
            Some("Robin")
        );
        assert_eq!(resolve_bound(ItemStack::new("DIAMOND", 3)).get("K"), Some("DIAMOND"));
        assert_eq!(resolve_bound(World::new("world")).get("K.NAME"), Some("world"));
        assert_eq!(resolve_bound(Duration::from_secs(2)).get("K"), Some("2 seconds"));
        assert_eq!(resolve_bound(42).get("K"), Some("42"));
        assert_eq!(resolve_bound("hello").get("K"), Some("hello"));
        assert_eq!(resolve_bound(MacroValue::Null).get("K"), Some("NULL"));
        let object: Arc<dyn HostObject> = Arc::new(Crate);
        assert_eq!(resolve_bound(object).get("K"), Some("Crate#7"));
    }

    #[test]
    fn test_unbound_key_resolves_to_null() {
        let out = resolvers().resolve(&key("MISSING"), &context());
        assert_eq!(out.get("MISSING"), Some("NULL"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_null_resolution_is_idempotent() {
        let mut ctx = context();
        ctx.put(key("N"), MacroValue::Null);
        let resolvers = resolvers();
        let first = resolvers.resolve(&key("N"), &ctx);
        let second = resolvers.resolve(&key("N"), &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_null_number_resolves_to_nothing() {
        assert!(resolve_bound(None::<i64>).is_empty());
    }

    #[test]
    fn test_location_deterministic_truncation() {
        let out = resolve_bound(Location::new(Some(World::new("test_world")), 123.9, 64.0, -789.1));
        assert_eq!(out.get("K"), Some("test_world [123, 64, -789]"));
        assert_eq!(out.get("K.X"), Some("123"));
        assert_eq!(out.get("K.Y"), Some("64"));
        assert_eq!(out.get("K.Z"), Some("-789"));
        assert_eq!(out.get("K.WORLD"), Some("test_world"));
    }

    #[test]
    fn test_configured_sentinels() {
        let config = Config::from_toml_str(
            "[resolution]\nnull_text = \"<none>\"\nunknown_text = \"--\"\n",
        )
        .unwrap();
        let resolvers = Resolvers::new(Arc::new(config));
        let mut ctx = context();
        ctx.put(key("N"), MacroValue::Null);
        ctx.put(key("L"), Location::new(None, 0.0, 0.0, 0.0));

        assert_eq!(resolvers.resolve(&key("N"), &ctx).get("N"), Some("<none>"));
        assert_eq!(resolvers.resolve(&key("L"), &ctx).get("L.WORLD"), Some("--"));
    }

    #[test]
    fn test_world_alias_from_config() {
        let config =
            Config::from_toml_str("[worlds.aliases]\nworld_nether = \"The Nether\"\n").unwrap();
        let resolvers = Resolvers::new(Arc::new(config));
        let mut ctx = context();
        ctx.put(key("W"), World::new("world_nether"));

        let out = resolvers.resolve(&key("W"), &ctx);
        assert_eq!(out.get("W"), Some("The Nether"));
        assert_eq!(out.get("W.NAME"), Some("The Nether"));
    }

    #[test]
    fn test_resolution_does_not_mutate_context() {
        let mut ctx = context();
        ctx.put(key("A"), 1);
        let _ = resolvers().resolve(&key("A"), &ctx);
        assert_eq!(ctx.len(), 1);
    }
}
