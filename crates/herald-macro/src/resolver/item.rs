//! Item stack resolver.

use herald_core::{ContextMap, ItemStack, RecordKey, ResultMap};

use super::Resolver;

/// Resolves an item to its custom display name, or its type name when it has
/// none.
pub struct ItemResolver;

impl Resolver<ItemStack> for ItemResolver {
    fn resolve(&self, key: &RecordKey, value: &ItemStack, _context: &ContextMap) -> ResultMap {
        let name = value
            .display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(value.kind.as_str());
        ResultMap::single(key.clone(), name)
    }
}
