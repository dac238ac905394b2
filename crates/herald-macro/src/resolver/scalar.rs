//! Resolvers for numbers, text, null and generic objects.

use std::sync::Arc;

use herald_core::{ContextMap, HostObject, Number, RecordKey, ResultMap};

use super::Resolver;

/// Resolves a number to decimal text. A null number resolves to nothing.
pub struct NumberResolver;

impl Resolver<Option<Number>> for NumberResolver {
    fn resolve(&self, key: &RecordKey, value: &Option<Number>, _context: &ContextMap) -> ResultMap {
        match value {
            Some(number) => ResultMap::single(key.clone(), number.to_string()),
            None => ResultMap::new(),
        }
    }
}

/// Passes text through unchanged.
pub struct TextResolver;

impl Resolver<str> for TextResolver {
    fn resolve(&self, key: &RecordKey, value: &str, _context: &ContextMap) -> ResultMap {
        ResultMap::single(key.clone(), value)
    }
}

/// Emits a visible sentinel for null bindings.
pub struct NullResolver {
    text: String,
}

impl NullResolver {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Resolver<()> for NullResolver {
    fn resolve(&self, key: &RecordKey, _value: &(), _context: &ContextMap) -> ResultMap {
        ResultMap::single(key.clone(), self.text.as_str())
    }
}

/// Fallback for objects no adapter narrowed: their `Display` text.
pub struct ObjectResolver;

impl Resolver<Arc<dyn HostObject>> for ObjectResolver {
    fn resolve(&self, key: &RecordKey, value: &Arc<dyn HostObject>, _context: &ContextMap) -> ResultMap {
        ResultMap::single(key.clone(), value.to_string())
    }
}
