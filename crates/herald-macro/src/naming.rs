//! World display names.

use std::collections::HashMap;

use herald_core::World;

/// Turns a world handle into the name shown to recipients.
///
/// Returning `None` means no usable name exists; resolvers then emit the
/// configured unknown-value sentinel.
pub trait WorldNamer: Send + Sync {
    fn display_name(&self, world: &World) -> Option<String>;
}

/// Uses the raw world name.
pub struct PlainWorldNamer;

impl WorldNamer for PlainWorldNamer {
    fn display_name(&self, world: &World) -> Option<String> {
        non_blank(world.name())
    }
}

/// Prefers a configured alias over the raw world name.
///
/// # Example
///
/// ```
/// use herald_core::World;
/// use herald_macro::{AliasWorldNamer, WorldNamer};
///
/// let namer = AliasWorldNamer::new([("world_nether".to_owned(), "The Nether".to_owned())]);
/// assert_eq!(namer.display_name(&World::new("world_nether")).as_deref(), Some("The Nether"));
/// assert_eq!(namer.display_name(&World::new("world")).as_deref(), Some("world"));
/// ```
#[derive(Debug, Default)]
pub struct AliasWorldNamer {
    aliases: HashMap<String, String>,
}

impl AliasWorldNamer {
    #[must_use]
    pub fn new(aliases: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            aliases: aliases.into_iter().collect(),
        }
    }
}

impl WorldNamer for AliasWorldNamer {
    fn display_name(&self, world: &World) -> Option<String> {
        self.aliases
            .get(world.name())
            .and_then(|alias| non_blank(alias))
            .or_else(|| non_blank(world.name()))
    }
}

fn non_blank(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
