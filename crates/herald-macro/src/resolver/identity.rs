//! Resolvers for identity-bearing values.

use std::sync::Arc;

use herald_core::{ContextMap, Identity, Recipient, RecordKey, ResultMap};

use super::Resolver;

/// Resolves a recipient to its display name.
pub struct RecipientResolver;

impl Resolver<Arc<dyn Recipient>> for RecipientResolver {
    fn resolve(&self, key: &RecordKey, value: &Arc<dyn Recipient>, _context: &ContextMap) -> ResultMap {
        ResultMap::single(key.clone(), value.display_name())
    }
}

/// Resolves a possibly-offline identity to its last known name.
pub struct IdentityResolver {
    unknown: String,
}

impl IdentityResolver {
    #[must_use]
    pub fn new(unknown: impl Into<String>) -> Self {
        Self {
            unknown: unknown.into(),
        }
    }
}

impl Resolver<Identity> for IdentityResolver {
    fn resolve(&self, key: &RecordKey, value: &Identity, _context: &ContextMap) -> ResultMap {
        let name = value
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.unknown.as_str());
        ResultMap::single(key.clone(), name)
    }
}
